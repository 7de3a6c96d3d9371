//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::clients::{PredictionClient, PremiumPredictor};
use crate::config::environment::EnvironmentConfig;
use crate::database::RecordStore;
use crate::models::{car_schema, customer_schema};
use crate::services::PremiumService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<RecordStore>,
    pub premium: PremiumService,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        store: Arc<RecordStore>,
        predictor: Arc<dyn PremiumPredictor>,
    ) -> Self {
        Self {
            config,
            store,
            premium: PremiumService::new(predictor),
        }
    }

    /// Estado de producción: almacén en `database_dir` con los esquemas de
    /// car y customer registrados, y cliente HTTP hacia `model_url`.
    pub async fn initialize(config: EnvironmentConfig) -> Result<Self> {
        let store = Arc::new(RecordStore::new(&config.database_dir));
        register_schemas(&store).await;
        store
            .ensure_base_dir()
            .await
            .with_context(|| format!("cannot create {}", config.database_dir.display()))?;

        let client = PredictionClient::new(&config.model_url, config.model_timeout)
            .context("cannot build prediction HTTP client")?;

        Ok(Self::new(config, store, Arc::new(client)))
    }
}

/// Registrar los esquemas de todas las entidades conocidas
pub async fn register_schemas(store: &RecordStore) {
    store.register(car_schema()).await;
    store.register(customer_schema()).await;
}
