//! Treasure Hunt Routing - motor de optimización de rutas
//!
//! Servicio HTTP que ordena los puntos de una búsqueda del tesoro con la
//! heurística del vecino más cercano sobre matrices de OSRM y compone el
//! itinerario final tramo a tramo.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use middleware::cors::cors_layer;
use state::AppState;

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/routing", routes::routing_routes::create_routing_router())
        .nest("/api/teams", routes::team_routes::create_team_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Endpoint de liveness del propio servicio
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "treasure-hunt-routing",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
