use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::patch,
};

use warehouse_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/product/:id", patch(top_up_stock))
}

/// PATCH /inventories/product/:id adds `stock` to the product's quantity.
pub async fn top_up_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::TopUpStockRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services.stock().add_stock(product_id, body.stock).await {
        Ok(new_stock) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "stock updated successfully",
                "new_stock": new_stock,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
