use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::PolicyStatus;
use crate::utils::lenient;
use crate::utils::validation::{validate_birth_date, validate_not_empty};

// Request para /compute
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ComputeRequest {
    #[serde(rename = "CarId", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub car_id: String,

    #[serde(rename = "DrivingExperience", deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0))]
    pub driving_experience: f64,

    #[serde(rename = "BirthDate")]
    #[validate(custom = "validate_birth_date")]
    pub birth_date: String,

    #[serde(rename = "ClaimRate", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0.0))]
    pub claim_rate: Option<f64>,

    #[serde(rename = "TotalClaim", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0.0))]
    pub total_claim: Option<f64>,

    #[serde(rename = "TotalPolicy", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0.0))]
    pub total_policy: Option<f64>,
}

// Response de /compute; -1 si el modelo no respondió
#[derive(Debug, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub model_predict: f64,
}

// Request para /commit: datos del solicitante + CarId
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommitRequest {
    #[serde(rename = "id", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub id: String,

    #[serde(rename = "FirstName")]
    #[validate(custom = "validate_not_empty")]
    pub first_name: String,

    #[serde(rename = "LastName")]
    #[validate(custom = "validate_not_empty")]
    pub last_name: String,

    #[serde(rename = "BirthDate")]
    #[validate(custom = "validate_birth_date")]
    pub birth_date: String,

    #[serde(rename = "DrivingExperience", deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0))]
    pub driving_experience: f64,

    #[serde(rename = "Address", default)]
    pub address: String,

    #[serde(rename = "CarId", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub car_id: String,

    #[serde(rename = "TotalPolicy", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0.0))]
    pub total_policy: Option<f64>,

    #[serde(rename = "TotalClaim", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0.0))]
    pub total_claim: Option<f64>,

    #[serde(rename = "ClaimRate", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0.0))]
    pub claim_rate: Option<f64>,

    #[serde(rename = "Premium", default, deserialize_with = "lenient::optional_number")]
    pub premium: Option<f64>,
}

// Request para /update: renovación con nueva prima
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePremiumRequest {
    #[serde(rename = "id", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub id: String,

    #[serde(rename = "newPremium", deserialize_with = "lenient::number")]
    pub new_premium: f64,
}

// Request para /updatedebug: sobrescribe todos los campos salvo CreatedAt
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDebugRequest {
    #[serde(rename = "id", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub id: String,

    #[serde(rename = "FirstName", default)]
    pub first_name: String,

    #[serde(rename = "LastName", default)]
    pub last_name: String,

    #[serde(rename = "BirthDate")]
    #[validate(custom = "validate_birth_date")]
    pub birth_date: String,

    #[serde(rename = "DrivingExperience", default, deserialize_with = "lenient::optional_number")]
    pub driving_experience: Option<f64>,

    #[serde(rename = "Address", default)]
    pub address: String,

    #[serde(rename = "CarId", default, deserialize_with = "lenient::string_or_number")]
    pub car_id: String,

    #[serde(rename = "CarBrand", default, deserialize_with = "lenient::string_or_number")]
    pub car_brand: String,

    #[serde(rename = "CarModel", default, deserialize_with = "lenient::string_or_number")]
    pub car_model: String,

    #[serde(rename = "CarYear", default, deserialize_with = "lenient::optional_number")]
    pub car_year: Option<f64>,

    #[serde(rename = "TotalPolicy", default, deserialize_with = "lenient::optional_number")]
    pub total_policy: Option<f64>,

    #[serde(rename = "TotalClaim", default, deserialize_with = "lenient::optional_number")]
    pub total_claim: Option<f64>,

    #[serde(rename = "ClaimRate", default, deserialize_with = "lenient::optional_number")]
    pub claim_rate: Option<f64>,

    #[serde(rename = "Premium", default, deserialize_with = "lenient::optional_number")]
    pub premium: Option<f64>,

    #[serde(rename = "Status")]
    pub status: PolicyStatus,
}

// Response genérica de las operaciones de escritura
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
