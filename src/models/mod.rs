//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente a las
//! columnas de los ficheros CSV y al contrato del modelo de predicción.

pub mod car;
pub mod customer;
pub mod prediction;

pub use car::*;
pub use customer::*;
pub use prediction::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::database::Record;

/// Serializar un modelo a registro del almacén
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Leer un modelo desde un registro del almacén
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(record))
}
