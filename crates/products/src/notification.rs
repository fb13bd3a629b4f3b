use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warehouse_core::ProductId;
use warehouse_events::Event;

use crate::product::{LOW_STOCK_THRESHOLD, Product};

/// Post-commit notification published by stores after a successful product
/// mutation (create, update, stock top-up, order decrement).
///
/// Carries just enough state for the low-stock monitor; it is not a change
/// record and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSaved {
    pub product_id: ProductId,
    pub name: String,
    pub stock: i64,
    pub occurred_at: DateTime<Utc>,
}

impl ProductSaved {
    pub fn of(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            stock: product.stock,
            occurred_at: Utc::now(),
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

impl Event for ProductSaved {
    fn event_type(&self) -> &'static str {
        "warehouse.product.saved"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
