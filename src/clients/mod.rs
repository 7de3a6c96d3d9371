//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with external APIs.

pub mod prediction_client;

// Re-export main types for convenience
pub use prediction_client::{PredictionClient, PredictionError, PremiumPredictor};
