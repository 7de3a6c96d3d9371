use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Car;
use crate::utils::lenient;
use crate::utils::validation::validate_not_empty;

// Request para dar de alta un vehículo en el catálogo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[serde(rename = "CarId", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub car_id: String,

    #[serde(rename = "CarBrand", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub car_brand: String,

    #[serde(rename = "CarModel", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub car_model: String,

    #[serde(rename = "CarYear", deserialize_with = "lenient::year")]
    #[validate(range(min = 1886, max = 2100))]
    pub car_year: i32,

    #[serde(rename = "Power", deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0))]
    pub power: f64,

    #[serde(rename = "Weight", deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0))]
    pub weight: f64,

    #[serde(rename = "Length", deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0))]
    pub length: f64,

    #[serde(rename = "CylinderCapacity", deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0))]
    pub cylinder_capacity: f64,

    #[serde(rename = "ValueVehicle", deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0))]
    pub value_vehicle: f64,
}

impl From<CreateCarRequest> for Car {
    fn from(request: CreateCarRequest) -> Self {
        Self {
            car_id: request.car_id,
            car_brand: request.car_brand,
            car_model: request.car_model,
            car_year: request.car_year,
            power: request.power,
            weight: request.weight,
            length: request.length,
            cylinder_capacity: request.cylinder_capacity,
            value_vehicle: request.value_vehicle,
        }
    }
}

// Request para actualizar un vehículo; sólo se escriben los campos presentes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[serde(rename = "CarId", deserialize_with = "lenient::string_or_number")]
    #[validate(custom = "validate_not_empty")]
    pub car_id: String,

    #[serde(
        rename = "CarBrand",
        default,
        deserialize_with = "lenient::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub car_brand: Option<String>,

    #[serde(
        rename = "CarModel",
        default,
        deserialize_with = "lenient::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub car_model: Option<String>,

    #[serde(
        rename = "CarYear",
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 1886.0, max = 2100.0))]
    pub car_year: Option<f64>,

    #[serde(
        rename = "Power",
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0))]
    pub power: Option<f64>,

    #[serde(
        rename = "Weight",
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,

    #[serde(
        rename = "Length",
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0))]
    pub length: Option<f64>,

    #[serde(
        rename = "CylinderCapacity",
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0))]
    pub cylinder_capacity: Option<f64>,

    #[serde(
        rename = "ValueVehicle",
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0))]
    pub value_vehicle: Option<f64>,
}
