//! In-memory product store for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use warehouse_core::{DomainError, DomainResult, ProductId};
use warehouse_events::{EventBus, InMemoryEventBus};
use warehouse_products::{DEFAULT_STOCK, NewProduct, Product, ProductPatch, ProductSaved,
    ProductStore};

/// In-memory store backed by a locked map.
///
/// The write lock is the serialization unit: every read-compare-write runs
/// inside one critical section, so concurrent orders against the same product
/// cannot both pass the sufficiency check. Single-process only; deployments
/// use `PostgresProductStore`.
#[derive(Debug)]
pub struct InMemoryProductStore<B> {
    inner: RwLock<HashMap<ProductId, Product>>,
    bus: B,
}

impl InMemoryProductStore<InMemoryEventBus<ProductSaved>> {
    /// Store with a private notification bus (convenient in tests that don't
    /// observe notifications).
    pub fn new() -> Self {
        Self::with_bus(InMemoryEventBus::new())
    }
}

impl Default for InMemoryProductStore<InMemoryEventBus<ProductSaved>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> InMemoryProductStore<B>
where
    B: EventBus<ProductSaved>,
{
    pub fn with_bus(bus: B) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            bus,
        }
    }

    fn notify_saved(&self, product: &Product) {
        if let Err(e) = self.bus.publish(ProductSaved::of(product)) {
            tracing::warn!("product notification publish failed: {e:?}");
        }
    }
}

fn poisoned() -> DomainError {
    DomainError::storage("product store lock poisoned")
}

#[async_trait]
impl<B> ProductStore for InMemoryProductStore<B>
where
    B: EventBus<ProductSaved>,
{
    async fn create(&self, new: NewProduct) -> DomainResult<Product> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;

        if map.values().any(|p| p.sku == new.sku) {
            return Err(DomainError::duplicate_sku(new.sku));
        }

        let product = Product {
            id: ProductId::new(),
            sku: new.sku,
            name: new.name,
            description: new.description,
            stock: new.stock.unwrap_or(DEFAULT_STOCK),
        };
        map.insert(product.id, product.clone());
        drop(map);

        self.notify_saved(&product);
        Ok(product)
    }

    async fn get(&self, id: ProductId) -> DomainResult<Product> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        map.get(&id).cloned().ok_or_else(DomainError::not_found)
    }

    async fn list(&self) -> DomainResult<Vec<Product>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut products: Vec<Product> = map.values().cloned().collect();
        // UUIDv7 ids are time-ordered, so this is creation order.
        products.sort_by_key(|p| *p.id.as_uuid());
        Ok(products)
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;

        if let Some(sku) = &patch.sku {
            if map.values().any(|p| p.id != id && p.sku == *sku) {
                return Err(DomainError::duplicate_sku(sku.clone()));
            }
        }

        let product = map.get_mut(&id).ok_or_else(DomainError::not_found)?;
        patch.apply_to(product);
        let updated = product.clone();
        drop(map);

        self.notify_saved(&updated);
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(&id).map(|_| ()).ok_or_else(DomainError::not_found)
    }

    async fn add_stock(&self, id: ProductId, amount: i64) -> DomainResult<i64> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let product = map.get_mut(&id).ok_or_else(DomainError::not_found)?;
        product.stock += amount;
        let updated = product.clone();
        drop(map);

        self.notify_saved(&updated);
        Ok(updated.stock)
    }

    async fn deduct_stock(&self, id: ProductId, quantity: i64) -> DomainResult<i64> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let product = map.get_mut(&id).ok_or_else(DomainError::not_found)?;

        if product.stock < quantity {
            return Err(DomainError::InsufficientStock {
                requested: quantity,
                available: product.stock,
            });
        }

        product.stock -= quantity;
        let updated = product.clone();
        drop(map);

        self.notify_saved(&updated);
        Ok(updated.stock)
    }
}
