//! Esquema por entidad
//!
//! Cada entidad (car, customer, ...) declara la lista ordenada de columnas y
//! su tipo. El orden de `fields` es el orden de la cabecera CSV cuando el
//! fichero se crea por primera vez.

use serde_json::{Number, Value};

/// Tipo escalar de una columna
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Number,
    /// Fecha guardada como texto (YYYY-MM-DD o RFC 3339)
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
        }
    }
}

/// Esquema de una entidad: nombre, campo clave y columnas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub entity: String,
    pub key_field: String,
    pub fields: Vec<FieldDef>,
}

impl EntitySchema {
    pub fn new(entity: &str, key_field: &str, fields: Vec<FieldDef>) -> Self {
        Self {
            entity: entity.to_string(),
            key_field: key_field.to_string(),
            fields,
        }
    }

    /// Nombres de columna en orden de cabecera
    pub fn header(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.field_type)
    }
}

/// Convierte una celda de texto al escalar más probable.
///
/// Con tipo declarado se respeta el tipo; sin él (columna desconocida o
/// entidad sin esquema) se intenta entero, luego flotante finito y si no,
/// texto.
pub fn coerce(raw: &str, field_type: Option<FieldType>) -> Value {
    match field_type {
        Some(FieldType::Text) | Some(FieldType::Date) => Value::String(raw.to_string()),
        Some(FieldType::Number) => {
            if raw.trim().is_empty() {
                Value::Null
            } else {
                parse_number(raw).unwrap_or_else(|| Value::String(raw.to_string()))
            }
        }
        None => parse_number(raw).unwrap_or_else(|| Value::String(raw.to_string())),
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::Number(n.into()));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Texto de un número tal como se escribe en disco.
///
/// Los flotantes sin parte decimal se escriben como enteros (`5.0` -> `5`).
pub fn number_text(n: &Number) -> String {
    if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
        if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
            return format!("{}", f as i64);
        }
    }
    n.to_string()
}

/// Forma normalizada de un valor para comparar claves: `7`, `7.0` y `"7"`
/// son la misma clave.
pub fn normalize_key(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
