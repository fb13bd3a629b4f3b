//! Service wiring: product store selection and the low-stock monitor.

use std::sync::Arc;

use warehouse_events::{Event, EventBus, InMemoryEventBus};
use warehouse_infra::{InMemoryProductStore, PostgresProductStore};
use warehouse_inventory::StockService;
use warehouse_orders::OrderService;
use warehouse_products::{LOW_STOCK_THRESHOLD, ProductSaved, ProductStore};

/// Application services shared by all handlers.
pub struct AppServices {
    products: Arc<dyn ProductStore>,
    stock: StockService,
    orders: OrderService,
}

impl AppServices {
    pub fn products(&self) -> &dyn ProductStore {
        &*self.products
    }

    pub fn stock(&self) -> &StockService {
        &self.stock
    }

    pub fn orders(&self) -> &OrderService {
        &self.orders
    }
}

/// Wire the store (env-selected), the notification bus, and the services.
///
/// `USE_PERSISTENT_STORE=true` selects Postgres (requires `DATABASE_URL`);
/// anything else runs on the in-memory store (dev/test).
pub async fn build_services() -> AppServices {
    let bus = Arc::new(InMemoryEventBus::<ProductSaved>::new());
    spawn_low_stock_monitor(&bus);

    let use_persistent = std::env::var("USE_PERSISTENT_STORE")
        .map(|v| v == "true")
        .unwrap_or(false);

    let store: Arc<dyn ProductStore> = if use_persistent {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set when USE_PERSISTENT_STORE=true");
        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .expect("failed to connect to Postgres");
        Arc::new(PostgresProductStore::with_bus(pool, bus))
    } else {
        Arc::new(InMemoryProductStore::with_bus(bus))
    };

    AppServices {
        products: store.clone(),
        stock: StockService::new(store.clone()),
        orders: OrderService::new(store),
    }
}

/// Background subscriber: bus -> low-stock warnings.
///
/// Informational only; nothing in the mutation path waits on this loop.
fn spawn_low_stock_monitor(bus: &Arc<InMemoryEventBus<ProductSaved>>) {
    let sub = bus.subscribe();
    tokio::task::spawn_blocking(move || {
        loop {
            match sub.recv() {
                Ok(ev) => {
                    if ev.stock < LOW_STOCK_THRESHOLD {
                        tracing::warn!(
                            event = ev.event_type(),
                            product_id = %ev.product_id,
                            stock = ev.stock,
                            "low stock for product '{}'",
                            ev.name,
                        );
                    }
                }
                Err(_) => break,
            }
        }
    });
}
