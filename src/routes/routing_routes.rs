//! Rutas del motor de enrutamiento
//!
//! Este módulo define las rutas de cálculo de rutas, optimización y
//! health check del proveedor OSRM.

use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::routing_controller;
use crate::state::AppState;

/// Crear el router para `/api/routing`
pub fn create_routing_router() -> Router<AppState> {
    Router::new()
        .route("/route", post(routing_controller::get_route))
        .route("/optimized-route", post(routing_controller::get_optimized_route))
        .route("/health/:mode", get(routing_controller::check_health))
}
