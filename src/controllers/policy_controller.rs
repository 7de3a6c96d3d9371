use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::database::Record;
use crate::dto::policy_dto::{
    CommitRequest, ComputeRequest, ComputeResponse, StatusResponse, UpdateDebugRequest,
    UpdatePremiumRequest,
};
use crate::models::{to_record, Car, Customer, PolicyStatus};
use crate::repositories::{CarRepository, CustomerRepository};
use crate::services::PremiumService;
use crate::state::AppState;
use crate::utils::errors::{
    conflict_error, not_found_error, unknown_reference_error, AppError, AppResult,
};

pub struct PolicyController {
    cars: CarRepository,
    customers: CustomerRepository,
    premium: PremiumService,
}

impl PolicyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cars: CarRepository::new(state.store.clone()),
            customers: CustomerRepository::new(state.store.clone()),
            premium: state.premium.clone(),
        }
    }

    pub async fn list_customers(&self) -> AppResult<Vec<Record>> {
        self.customers.list().await
    }

    /// Estimar la prima. Car desconocido -> 400; modelo caído -> -1.
    pub async fn compute(&self, request: ComputeRequest) -> AppResult<ComputeResponse> {
        let car = self.resolve_car(&request.car_id).await?;
        let model_predict = self.premium.quote(&request, &car).await?;
        Ok(ComputeResponse { model_predict })
    }

    /// Emitir una póliza nueva con estado `active`
    pub async fn commit(&self, request: CommitRequest) -> AppResult<StatusResponse> {
        let car = self.resolve_car(&request.car_id).await?;

        let customer = issue_customer(request, &car, Utc::now());
        if !self.customers.create(&customer).await? {
            return Err(conflict_error("Customer", "id", &customer.id));
        }
        log::info!("📄 Póliza emitida para '{}' (car {})", customer.id, customer.car_id);

        Ok(StatusResponse::ok())
    }

    /// Renovar: Status=active, Premium=newPremium
    pub async fn update_premium(&self, request: UpdatePremiumRequest) -> AppResult<StatusResponse> {
        let mut patch = Record::new();
        patch.insert("id".to_string(), Value::String(request.id.clone()));
        patch.insert("Status".to_string(), PolicyStatus::Active.as_str().into());
        patch.insert("Premium".to_string(), request.new_premium.into());

        if !self.customers.update(patch).await? {
            return Err(not_found_error("Customer", &request.id));
        }
        Ok(StatusResponse::ok())
    }

    /// Sobrescribir la póliza con los campos recibidos (CreatedAt se conserva)
    pub async fn update_debug(&self, request: UpdateDebugRequest) -> AppResult<StatusResponse> {
        let id = request.id.clone();
        let patch = to_record(&request).map_err(|e| AppError::Internal(e.to_string()))?;

        if !self.customers.update(patch).await? {
            return Err(not_found_error("Customer", &id));
        }
        Ok(StatusResponse::ok())
    }

    pub async fn delete(&self, id: &str) -> AppResult<StatusResponse> {
        if !self.customers.delete(id).await? {
            return Err(not_found_error("Customer", id));
        }
        Ok(StatusResponse::ok())
    }

    async fn resolve_car(&self, car_id: &str) -> AppResult<Car> {
        self.cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| unknown_reference_error("Car", car_id))
    }
}

/// Póliza desnormalizada: datos del solicitante + copia del vehículo
pub fn issue_customer(request: CommitRequest, car: &Car, created_at: DateTime<Utc>) -> Customer {
    Customer {
        id: request.id,
        first_name: request.first_name,
        last_name: request.last_name,
        birth_date: request.birth_date,
        driving_experience: request.driving_experience,
        address: request.address,
        car_id: car.car_id.clone(),
        car_brand: car.car_brand.clone(),
        car_model: car.car_model.clone(),
        car_year: car.car_year,
        total_policy: request.total_policy,
        total_claim: request.total_claim,
        claim_rate: request.claim_rate,
        premium: request.premium,
        new_premium: None,
        status: PolicyStatus::Active,
        created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
