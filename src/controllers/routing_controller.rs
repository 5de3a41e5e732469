//! Controlador de rutas
//!
//! Endpoints de ruta punto a punto, ruta optimizada y estado del proveedor
//! OSRM por modo de transporte.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::routing_dto::{
    OptimizedRouteRequest, OptimizedRouteResponse, ProviderHealthResponse, RouteRequest, RouteResponse,
};
use crate::models::routing::TransportMode;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

/// Código HTTP según el resultado: las respuestas fallidas van como 400
fn status_for(success: bool) -> StatusCode {
    if success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Ruta punto a punto
pub async fn get_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    request.validate()?;

    let response = state
        .routing
        .get_route(&request, state.routing_deadline())
        .await;

    Ok((status_for(response.outcome.success), Json(response)))
}

/// Ruta optimizada (vecino más cercano + tramos reales)
pub async fn get_optimized_route(
    State(state): State<AppState>,
    Json(request): Json<OptimizedRouteRequest>,
) -> Result<(StatusCode, Json<OptimizedRouteResponse>), AppError> {
    log::info!(
        "🎯 Recibida solicitud de ruta optimizada para {} waypoints",
        request.waypoints.len()
    );
    request.validate()?;

    let response = state
        .routing
        .get_optimized_route(&request, state.routing_deadline())
        .await;

    if response.outcome.success {
        log::info!("✅ Ruta optimizada: {:?}", response.optimal_order);
    }

    Ok((status_for(response.outcome.success), Json(response)))
}

/// Health check de la instancia OSRM de un modo
pub async fn check_health(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<ProviderHealthResponse>, AppError> {
    let mode: TransportMode = mode.parse().map_err(|e: String| bad_request_error(&e))?;
    log::info!("🏥 Health check OSRM ({})", mode);

    let available = state.routing.is_provider_available(mode).await;

    Ok(Json(ProviderHealthResponse {
        mode,
        available,
        timestamp: Utc::now(),
    }))
}
