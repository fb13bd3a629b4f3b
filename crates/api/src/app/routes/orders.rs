use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use warehouse_core::{DomainError, ProductId};
use warehouse_orders::PlaceOrder;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(place_order))
}

/// POST /orders decrements a product's stock by `quantity`.
pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PlaceOrderRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::domain_error_to_response(DomainError::validation(
                "product_id",
                "must be a valid product id",
            ));
        }
    };

    let order = PlaceOrder {
        product_id,
        quantity: body.quantity,
    };

    match services.orders().place_order(order).await {
        Ok(remaining_stock) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "order placed successfully",
                "remaining_stock": remaining_stock,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
