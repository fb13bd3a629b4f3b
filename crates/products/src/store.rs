//! Persistence contract for products.

use async_trait::async_trait;

use warehouse_core::{DomainResult, ProductId};

use crate::product::{NewProduct, Product, ProductPatch};

/// Store interface consumed by the services and the HTTP layer.
///
/// Implementations own the unit of mutual exclusion: concurrent mutations of
/// the same product must serialize at the store, so the final stock reflects
/// every committed operation exactly once. In particular `deduct_stock` is a
/// single atomic check-and-decrement ("decrement by Q where stock >= Q"), not
/// a read followed by a write.
///
/// After every successful mutation that leaves the product in place, the
/// store publishes a [`crate::ProductSaved`] notification. Publishing is
/// best-effort and never fails the operation.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product. Stock defaults to
    /// [`crate::DEFAULT_STOCK`] when omitted. Fails with `DuplicateSku` when
    /// the SKU is already taken.
    async fn create(&self, new: NewProduct) -> DomainResult<Product>;

    async fn get(&self, id: ProductId) -> DomainResult<Product>;

    /// All products in creation order.
    async fn list(&self) -> DomainResult<Vec<Product>>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids and
    /// `DuplicateSku` when a changed SKU collides.
    async fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product>;

    async fn delete(&self, id: ProductId) -> DomainResult<()>;

    /// Atomically add `amount` to the product's stock; returns the
    /// post-update value. The caller validates the amount beforehand.
    async fn add_stock(&self, id: ProductId, amount: i64) -> DomainResult<i64>;

    /// Atomically decrement stock by `quantity` only when enough remains;
    /// returns the remaining stock. On insufficient stock nothing is mutated
    /// and `InsufficientStock` reports the requested and available amounts.
    async fn deduct_stock(&self, id: ProductId, quantity: i64) -> DomainResult<i64>;
}
