//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y el extractor JSON validado.

pub mod cors;
pub mod validated_json;

pub use cors::*;
pub use validated_json::ValidatedJson;
