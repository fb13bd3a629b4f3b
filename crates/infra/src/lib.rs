//! `warehouse-infra` — store implementations behind the
//! `warehouse_products::ProductStore` contract.
//!
//! Two implementations: an in-memory store for dev/test and a Postgres store
//! for deployments. See `schema.sql` for the persistent table definition.

pub mod product_store;

pub use product_store::{InMemoryProductStore, PostgresProductStore};
