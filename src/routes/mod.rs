pub mod car_routes;
pub mod policy_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la API
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(root_endpoint))
        .merge(car_routes::create_car_router())
        .merge(policy_routes::create_policy_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de prueba simple
async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Car insurance policy API",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
