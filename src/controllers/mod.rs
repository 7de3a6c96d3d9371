//! Controladores: orquestan validación, repositorios y servicios

pub mod car_controller;
pub mod policy_controller;

pub use car_controller::CarController;
pub use policy_controller::PolicyController;
