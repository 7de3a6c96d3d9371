//! Modelo de Car
//!
//! Catálogo de vehículos asegurables. Clave: `CarId`.

use serde::{Deserialize, Serialize};

use crate::database::{EntitySchema, FieldDef, FieldType};
use crate::utils::lenient;

pub const CAR_ENTITY: &str = "car";
pub const CAR_KEY: &str = "CarId";

/// Columnas de `car.csv` en orden de cabecera
pub fn car_schema() -> EntitySchema {
    EntitySchema::new(
        CAR_ENTITY,
        CAR_KEY,
        vec![
            FieldDef::new("CarId", FieldType::Text),
            FieldDef::new("CarBrand", FieldType::Text),
            FieldDef::new("CarModel", FieldType::Text),
            FieldDef::new("CarYear", FieldType::Number),
            FieldDef::new("Power", FieldType::Number),
            FieldDef::new("Weight", FieldType::Number),
            FieldDef::new("Length", FieldType::Number),
            FieldDef::new("CylinderCapacity", FieldType::Number),
            FieldDef::new("ValueVehicle", FieldType::Number),
        ],
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    #[serde(rename = "CarId", deserialize_with = "lenient::string_or_number")]
    pub car_id: String,
    #[serde(rename = "CarBrand", deserialize_with = "lenient::string_or_number")]
    pub car_brand: String,
    #[serde(rename = "CarModel", deserialize_with = "lenient::string_or_number")]
    pub car_model: String,
    #[serde(rename = "CarYear", deserialize_with = "lenient::year")]
    pub car_year: i32,
    #[serde(rename = "Power", deserialize_with = "lenient::number")]
    pub power: f64,
    #[serde(rename = "Weight", deserialize_with = "lenient::number")]
    pub weight: f64,
    #[serde(rename = "Length", deserialize_with = "lenient::number")]
    pub length: f64,
    #[serde(rename = "CylinderCapacity", deserialize_with = "lenient::number")]
    pub cylinder_capacity: f64,
    #[serde(rename = "ValueVehicle", deserialize_with = "lenient::number")]
    pub value_vehicle: f64,
}

impl Car {
    /// Años de uso del vehículo en `current_year`
    pub fn age_in(&self, current_year: i32) -> i32 {
        current_year - self.car_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{from_record, to_record};
    use serde_json::json;

    #[test]
    fn test_car_from_store_record() {
        let record = json!({
            "CarId": "C1", "CarBrand": "Toyota", "CarModel": 86, "CarYear": 2020,
            "Power": 150, "Weight": 1200.5, "Length": 4.2, "CylinderCapacity": 1998,
            "ValueVehicle": "850000"
        });
        let car: Car = from_record(record.as_object().cloned().unwrap()).unwrap();
        assert_eq!(car.car_model, "86");
        assert_eq!(car.value_vehicle, 850000.0);
        assert_eq!(car.age_in(2024), 4);
    }

    #[test]
    fn test_record_follows_schema_names() {
        let car = Car {
            car_id: "C1".into(),
            car_brand: "Toyota".into(),
            car_model: "Yaris".into(),
            car_year: 2019,
            power: 90.0,
            weight: 1000.0,
            length: 3.9,
            cylinder_capacity: 1300.0,
            value_vehicle: 500000.0,
        };
        let record = to_record(&car).unwrap();
        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, car_schema().header().iter().collect::<Vec<_>>());
    }
}
