use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::PolicyController;
use crate::database::Record;
use crate::dto::policy_dto::{
    CommitRequest, ComputeRequest, ComputeResponse, StatusResponse, UpdateDebugRequest,
    UpdatePremiumRequest,
};
use crate::middleware::ValidatedJson;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_policy_router() -> Router<AppState> {
    Router::new()
        .route("/customer", get(list_customers))
        .route("/customer/:id", delete(delete_customer))
        .route("/compute", post(compute))
        .route("/commit", post(commit))
        .route("/update", post(update_premium))
        .route("/updatedebug", post(update_debug))
}

async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    let controller = PolicyController::new(&state);
    Ok(Json(controller.list_customers().await?))
}

async fn compute(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ComputeRequest>,
) -> Result<Json<ComputeResponse>, AppError> {
    let controller = PolicyController::new(&state);
    Ok(Json(controller.compute(request).await?))
}

async fn commit(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CommitRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = PolicyController::new(&state);
    Ok(Json(controller.commit(request).await?))
}

async fn update_premium(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdatePremiumRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = PolicyController::new(&state);
    Ok(Json(controller.update_premium(request).await?))
}

async fn update_debug(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateDebugRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = PolicyController::new(&state);
    Ok(Json(controller.update_debug(request).await?))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = PolicyController::new(&state);
    Ok(Json(controller.delete(&id).await?))
}
