use serde::Deserialize;

use warehouse_products::{NewProduct, Product, ProductPatch};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
}

impl CreateProductRequest {
    /// Initial stock is not part of the public surface; it always defaults.
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            sku: self.sku,
            name: self.name,
            description: self.description,
            stock: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            sku: self.sku,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TopUpStockRequest {
    /// Amount to add, not an absolute level.
    pub stock: i64,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    /// Parsed by the handler so a malformed id surfaces as a field-level
    /// validation failure, not a body-rejection.
    pub product_id: String,
    pub quantity: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Public product representation. Stock is intentionally excluded; it only
/// surfaces through the stock-mutating endpoints' responses.
pub fn product_to_json(p: Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id.to_string(),
        "sku": p.sku,
        "name": p.name,
        "description": p.description,
    })
}
