//! `warehouse-products` — the product record, its validation rules, and the
//! store contract the rest of the system builds on.
//!
//! The store trait lives here (domain-owned port); implementations live in
//! `warehouse-infra`.

pub mod notification;
pub mod product;
pub mod store;
pub mod validation;

pub use notification::ProductSaved;
pub use product::{
    DEFAULT_STOCK, DESCRIPTION_MAX_LEN, LOW_STOCK_THRESHOLD, MAX_TOP_UP, NAME_MAX_LEN,
    NAME_MIN_LEN, NewProduct, Product, ProductPatch, SKU_MAX_LEN, SKU_MIN_LEN,
};
pub use store::ProductStore;
