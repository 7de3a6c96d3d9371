//! Modelo de Customer (póliza)
//!
//! Un registro por póliza emitida. Los campos del vehículo son una copia
//! tomada en el momento de la emisión; editar el Car después no los cambia.

use serde::{Deserialize, Serialize};

use crate::database::{EntitySchema, FieldDef, FieldType};

pub const CUSTOMER_ENTITY: &str = "customer";
pub const CUSTOMER_KEY: &str = "id";

/// Columnas de `customer.csv` en orden de cabecera
pub fn customer_schema() -> EntitySchema {
    EntitySchema::new(
        CUSTOMER_ENTITY,
        CUSTOMER_KEY,
        vec![
            FieldDef::new("id", FieldType::Text),
            FieldDef::new("FirstName", FieldType::Text),
            FieldDef::new("LastName", FieldType::Text),
            FieldDef::new("BirthDate", FieldType::Date),
            FieldDef::new("DrivingExperience", FieldType::Number),
            FieldDef::new("Address", FieldType::Text),
            FieldDef::new("CarId", FieldType::Text),
            FieldDef::new("CarBrand", FieldType::Text),
            FieldDef::new("CarModel", FieldType::Text),
            FieldDef::new("CarYear", FieldType::Number),
            FieldDef::new("TotalPolicy", FieldType::Number),
            FieldDef::new("TotalClaim", FieldType::Number),
            FieldDef::new("ClaimRate", FieldType::Number),
            FieldDef::new("Premium", FieldType::Number),
            FieldDef::new("newPremium", FieldType::Number),
            FieldDef::new("Status", FieldType::Text),
            FieldDef::new("CreatedAt", FieldType::Date),
        ],
    )
}

/// Estado de la póliza
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Expired,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "active",
            PolicyStatus::Expired => "expired",
        }
    }
}

/// Póliza tal como se persiste
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Customer {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "BirthDate")]
    pub birth_date: String,
    #[serde(rename = "DrivingExperience")]
    pub driving_experience: f64,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "CarId")]
    pub car_id: String,
    #[serde(rename = "CarBrand")]
    pub car_brand: String,
    #[serde(rename = "CarModel")]
    pub car_model: String,
    #[serde(rename = "CarYear")]
    pub car_year: i32,
    #[serde(rename = "TotalPolicy")]
    pub total_policy: Option<f64>,
    #[serde(rename = "TotalClaim")]
    pub total_claim: Option<f64>,
    #[serde(rename = "ClaimRate")]
    pub claim_rate: Option<f64>,
    #[serde(rename = "Premium")]
    pub premium: Option<f64>,
    #[serde(rename = "newPremium")]
    pub new_premium: Option<f64>,
    #[serde(rename = "Status")]
    pub status: PolicyStatus,
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(PolicyStatus::Active).unwrap(), "active");
        assert_eq!(PolicyStatus::Expired.as_str(), "expired");
        let parsed: PolicyStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(parsed, PolicyStatus::Expired);
    }
}
