//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y su valor por defecto.

pub mod environment;

pub use environment::*;
