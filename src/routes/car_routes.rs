use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::CarController;
use crate::database::Record;
use crate::dto::car_dto::{CreateCarRequest, UpdateCarRequest};
use crate::dto::policy_dto::StatusResponse;
use crate::middleware::ValidatedJson;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/car", get(list_cars).post(create_car))
        .route("/car/update", post(update_car))
        .route("/car/:car_id", delete(delete_car))
}

async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn create_car(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCarRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.create(request).await?))
}

async fn update_car(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateCarRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.update(request).await?))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let controller = CarController::new(&state);
    Ok(Json(controller.delete(&car_id).await?))
}
