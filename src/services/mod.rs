//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones que involucran integraciones externas.

pub mod premium_service;

pub use premium_service::*;
