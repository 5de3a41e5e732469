//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el motor de
//! optimización de rutas y la generación de códigos de acceso de equipos.

pub mod itinerary_assembler;
pub mod routing_service;
pub mod team_code_service;
pub mod tour_solver;

#[cfg(test)]
pub(crate) mod test_support;

pub use routing_service::RoutingService;
pub use team_code_service::{AccessCodeStore, InMemoryAccessCodeStore, TeamCodeService};
