//! Cuerpos de request/response por endpoint

pub mod car_dto;
pub mod policy_dto;
