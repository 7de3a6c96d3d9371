//! Utilidades de validación
//!
//! Validadores personalizados para `validator` y conversión de fechas.

use chrono::{DateTime, Datelike, NaiveDate};
use validator::ValidationError;

/// Año de una fecha en formato `YYYY-MM-DD` o RFC 3339
pub fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.year());
    }
    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|date| date.year())
}

/// Validar fecha de nacimiento (YYYY-MM-DD o RFC 3339)
pub fn validate_birth_date(value: &str) -> Result<(), ValidationError> {
    if parse_year(value).is_none() {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
