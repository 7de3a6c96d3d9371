use crate::database::Record;
use crate::dto::car_dto::{CreateCarRequest, UpdateCarRequest};
use crate::dto::policy_dto::StatusResponse;
use crate::models::{to_record, Car};
use crate::repositories::CarRepository;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

pub struct CarController {
    repository: CarRepository,
}

impl CarController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: CarRepository::new(state.store.clone()),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Record>> {
        self.repository.list().await
    }

    pub async fn create(&self, request: CreateCarRequest) -> AppResult<StatusResponse> {
        let car = Car::from(request);
        if !self.repository.create(&car).await? {
            return Err(conflict_error("Car", "CarId", &car.car_id));
        }
        log::info!("🚗 Vehículo '{}' añadido al catálogo", car.car_id);
        Ok(StatusResponse::ok())
    }

    /// Los cambios no se propagan a las pólizas ya emitidas
    pub async fn update(&self, request: UpdateCarRequest) -> AppResult<StatusResponse> {
        let car_id = request.car_id.clone();
        let patch = to_record(&request).map_err(|e| AppError::Internal(e.to_string()))?;

        if !self.repository.update(patch).await? {
            return Err(not_found_error("Car", &car_id));
        }
        Ok(StatusResponse::ok())
    }

    pub async fn delete(&self, car_id: &str) -> AppResult<StatusResponse> {
        if !self.repository.delete(car_id).await? {
            return Err(not_found_error("Car", car_id));
        }
        Ok(StatusResponse::ok())
    }
}
