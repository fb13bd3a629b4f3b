use serde::{Deserialize, Serialize};

use warehouse_core::ProductId;

/// SKU length bounds.
pub const SKU_MIN_LEN: usize = 4;
pub const SKU_MAX_LEN: usize = 10;

/// Name length bounds.
pub const NAME_MIN_LEN: usize = 5;
pub const NAME_MAX_LEN: usize = 50;

/// Description length ceiling (description itself is optional).
pub const DESCRIPTION_MAX_LEN: usize = 100;

/// Stock assigned at creation when the caller does not provide one.
pub const DEFAULT_STOCK: i64 = 100;

/// Largest amount a single top-up may add. A per-call bound only; the
/// resulting total stock is not capped.
pub const MAX_TOP_UP: i64 = 10_000;

/// Stock level below which a low-stock notification is emitted.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// A stored product record.
///
/// `stock` is never negative after any committed operation; the store
/// enforces this on the decrement path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub stock: i64,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

/// Fields accepted when creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    /// Initial stock; `DEFAULT_STOCK` when omitted.
    pub stock: Option<i64>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.sku.is_none() && self.name.is_none() && self.description.is_none()
    }

    /// Apply the provided fields onto an existing record. Stock is never
    /// touched here: it only moves through the dedicated stock operations.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(sku) = &self.sku {
            product.sku = sku.clone();
        }
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
    }
}
