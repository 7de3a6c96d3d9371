use std::sync::Arc;

use serde_json::Value;

use crate::database::schema::normalize_key;
use crate::database::{Record, RecordStore};
use crate::models::{from_record, to_record, Car, CAR_ENTITY, CAR_KEY};
use crate::utils::errors::AppError;

pub struct CarRepository {
    store: Arc<RecordStore>,
}

impl CarRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Registros tal cual están en `car.csv`
    pub async fn list(&self) -> Result<Vec<Record>, AppError> {
        Ok(self.store.read(CAR_ENTITY).await?)
    }

    pub async fn find_by_id(&self, car_id: &str) -> Result<Option<Car>, AppError> {
        let record = self
            .list()
            .await?
            .into_iter()
            .find(|r| r.get(CAR_KEY).map(normalize_key).as_deref() == Some(car_id));

        match record {
            Some(record) => {
                let car = from_record(record).map_err(|e| {
                    AppError::Internal(format!("Car '{}' is malformed: {}", car_id, e))
                })?;
                Ok(Some(car))
            }
            None => Ok(None),
        }
    }

    /// Alta si la clave es nueva; `false` si ya existe
    pub async fn create(&self, car: &Car) -> Result<bool, AppError> {
        let record = to_record(car).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(self.store.insert_unique(CAR_ENTITY, CAR_KEY, record).await?)
    }

    /// Fusionar `patch` (debe incluir `CarId`); `false` si no existe
    pub async fn update(&self, patch: Record) -> Result<bool, AppError> {
        Ok(self.store.update(CAR_ENTITY, CAR_KEY, patch).await?)
    }

    pub async fn delete(&self, car_id: &str) -> Result<bool, AppError> {
        Ok(self
            .store
            .delete(CAR_ENTITY, CAR_KEY, &Value::String(car_id.to_string()))
            .await?)
    }
}
