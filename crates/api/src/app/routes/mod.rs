use axum::Router;

pub mod inventories;
pub mod orders;
pub mod products;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/inventories", inventories::router())
        .nest("/orders", orders::router())
}
