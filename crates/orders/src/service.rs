use std::sync::Arc;

use tracing::instrument;

use warehouse_core::{DomainError, DomainResult, ProductId};
use warehouse_products::{ProductStore, validation};

/// A one-shot order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOrder {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Order placement: validate, then one atomic check-and-decrement.
pub struct OrderService {
    store: Arc<dyn ProductStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Place an order, returning the remaining stock.
    ///
    /// The product's existence is validated up front (a missing product is a
    /// `product_id` field violation, like any other bad input). The decrement
    /// itself re-checks existence and sufficiency atomically at the store,
    /// because the product can be deleted or drained between validation and
    /// commit.
    #[instrument(skip(self), fields(product_id = %order.product_id, quantity = order.quantity), err)]
    pub async fn place_order(&self, order: PlaceOrder) -> DomainResult<i64> {
        validation::validate_order_quantity(order.quantity)?;

        match self.store.get(order.product_id).await {
            Ok(_) => {}
            Err(DomainError::NotFound) => {
                return Err(DomainError::validation(
                    "product_id",
                    format!("product with id {} does not exist", order.product_id),
                ));
            }
            Err(e) => return Err(e),
        }

        self.store
            .deduct_stock(order.product_id, order.quantity)
            .await
    }
}
