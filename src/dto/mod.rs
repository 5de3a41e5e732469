//! DTOs del API
//!
//! Estructuras de entrada y salida de los endpoints HTTP.

pub mod routing_dto;
pub mod team_dto;
