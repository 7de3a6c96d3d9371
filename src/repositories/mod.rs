//! Repositorios tipados sobre el almacén CSV

pub mod car_repository;
pub mod customer_repository;

pub use car_repository::CarRepository;
pub use customer_repository::CustomerRepository;
