use std::sync::Arc;

use tracing::instrument;

use warehouse_core::{DomainResult, ProductId};
use warehouse_products::{ProductStore, validation};

/// Restocking: validated, atomic stock increments.
pub struct StockService {
    store: Arc<dyn ProductStore>,
}

impl StockService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Add `amount` to a product's stock and return the new total.
    ///
    /// `amount` must be positive and at most
    /// [`warehouse_products::MAX_TOP_UP`] per call; the resulting total is
    /// not capped. The increment itself is a single atomic store operation.
    #[instrument(skip(self), fields(product_id = %product_id), err)]
    pub async fn add_stock(&self, product_id: ProductId, amount: i64) -> DomainResult<i64> {
        validation::validate_top_up(amount)?;
        self.store.add_stock(product_id, amount).await
    }
}
