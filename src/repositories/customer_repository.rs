use std::sync::Arc;

use serde_json::Value;

use crate::database::{Record, RecordStore};
use crate::models::{to_record, Customer, CUSTOMER_ENTITY, CUSTOMER_KEY};
use crate::utils::errors::AppError;

pub struct CustomerRepository {
    store: Arc<RecordStore>,
}

impl CustomerRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Registros tal cual están en `customer.csv`
    pub async fn list(&self) -> Result<Vec<Record>, AppError> {
        Ok(self.store.read(CUSTOMER_ENTITY).await?)
    }

    /// Alta si la clave es nueva; `false` si ya existe
    pub async fn create(&self, customer: &Customer) -> Result<bool, AppError> {
        let record = to_record(customer).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(self.store.insert_unique(CUSTOMER_ENTITY, CUSTOMER_KEY, record).await?)
    }

    /// Fusionar `patch` (debe incluir `id`); `false` si no existe
    pub async fn update(&self, patch: Record) -> Result<bool, AppError> {
        Ok(self.store.update(CUSTOMER_ENTITY, CUSTOMER_KEY, patch).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self
            .store
            .delete(CUSTOMER_ENTITY, CUSTOMER_KEY, &Value::String(id.to_string()))
            .await?)
    }
}
