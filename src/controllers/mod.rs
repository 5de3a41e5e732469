//! Controladores HTTP
//!
//! Handlers de Axum que validan la entrada y delegan en los servicios.

pub mod routing_controller;
pub mod team_controller;
