//! Deserializadores tolerantes
//!
//! El frontend envía números como número o como texto según el campo del
//! formulario, y los registros leídos del CSV vuelven tipados "a ojo". Estos
//! helpers aceptan ambas formas.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

use crate::database::schema::normalize_key;

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Texto o número -> `String` (`7` -> `"7"`)
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        v @ (Value::String(_) | Value::Number(_)) => Ok(normalize_key(&v)),
        other => Err(D::Error::custom(format!("expected string or number, got {}", other))),
    }
}

/// Como `string_or_number` pero `null` o ausente -> `None`
pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(v @ (Value::String(_) | Value::Number(_))) => Ok(Some(normalize_key(&v))),
        Some(other) => Err(D::Error::custom(format!("expected string or number, got {}", other))),
    }
}

/// Número o texto numérico -> `f64`
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number_from(&value).ok_or_else(|| D::Error::custom(format!("expected a number, got {}", value)))
}

/// Como `number` pero `null`, ausente o `""` -> `None`
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => number_from(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", v))),
    }
}

/// Año entero; admite `2020`, `2020.0` y `"2020"`
pub fn year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number_from(&value)
        .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
        .map(|f| f as i32)
        .ok_or_else(|| D::Error::custom(format!("expected a year, got {}", value)))
}
