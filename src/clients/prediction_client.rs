//! Cliente HTTP del modelo de prima
//!
//! Una sola llamada: `POST {base_url}/predict` con `PredictionInput` y
//! respuesta `{"prediction": number}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::{PredictionInput, PredictionResponse};

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("prediction service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("prediction service answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid prediction payload: {0}")]
    Decode(String),
}

/// Algo capaz de tarificar una entrada
#[async_trait]
pub trait PremiumPredictor: Send + Sync {
    async fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError>;
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    base_url: String,
    client: reqwest::Client,
}

impl PredictionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

#[async_trait]
impl PremiumPredictor for PredictionClient {
    async fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        let url = self.predict_url();
        log::debug!("🌐 POST {}", url);

        let response = self.client.post(&url).json(input).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Prediction failed with status {}: {}", status, body);
            return Err(PredictionError::Status { status, body });
        }

        let text = response.text().await?;
        let parsed: PredictionResponse = serde_json::from_str(&text)
            .map_err(|e| PredictionError::Decode(format!("{} in {}", e, text)))?;

        log::info!("✅ Prediction received: {}", parsed.prediction);
        Ok(parsed.prediction)
    }
}
