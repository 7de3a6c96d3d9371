//! Entrada y salida del servicio de predicción de prima
//!
//! Los nombres de campo son los que espera el modelo remoto.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictionInput {
    #[serde(rename = "Driving_experience")]
    pub driving_experience: f64,
    #[serde(rename = "Value_vehicle")]
    pub value_vehicle: f64,
    #[serde(rename = "Power")]
    pub power: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    /// Año actual - año del modelo
    #[serde(rename = "Length_of_vehicle_usage")]
    pub length_of_vehicle_usage: i32,
    #[serde(rename = "R_Claims_history")]
    pub r_claims_history: f64,
    #[serde(rename = "N_claims_history")]
    pub n_claims_history: f64,
    /// Año actual - año de nacimiento
    #[serde(rename = "Old")]
    pub old: i32,
    #[serde(rename = "Length")]
    pub length: f64,
    #[serde(rename = "Cylinder_capacity")]
    pub cylinder_capacity: f64,
    #[serde(rename = "Policies_in_force")]
    pub policies_in_force: f64,
}

/// Respuesta del modelo: `{"prediction": 1234.5}`
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub prediction: f64,
}
