//! Backend de cotización y administración de pólizas de automóvil
//!
//! Catálogo de vehículos y pólizas en ficheros CSV, tarificación delegada en
//! un modelo remoto.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
