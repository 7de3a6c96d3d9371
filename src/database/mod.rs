//! Persistencia en ficheros CSV
//!
//! Un fichero por entidad, cabecera en la primera fila.

pub mod csv_codec;
pub mod error;
pub mod record_store;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use record_store::RecordStore;
pub use schema::{EntitySchema, FieldDef, FieldType};

/// Un registro: nombre de campo -> escalar, en orden de cabecera
pub type Record = serde_json::Map<String, serde_json::Value>;
