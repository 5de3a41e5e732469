//! DTOs del API de rutas
//!
//! Estructuras JSON (camelCase) de entrada y salida de los endpoints de
//! enrutamiento, más su conversión a los modelos de dominio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::routing::{
    Coordinate, Itinerary, RouteData, RouteSegment, SkippedSegment, TransportMode, Waypoint,
};

/// Resultado común a todas las respuestas de enrutamiento.
/// Las respuestas lo embeben con `#[serde(flatten)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RoutingOutcome {
    pub fn ok() -> Self {
        Self { success: true, error_message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, error_message: Some(message.into()) }
    }
}

/// Request de ruta punto a punto
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub start_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub start_longitude: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub end_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub end_longitude: f64,
    #[serde(default)]
    pub transport_mode: TransportMode,
}

/// Response de ruta punto a punto
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    #[serde(flatten)]
    pub outcome: RoutingOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteData>,
}

impl RouteResponse {
    pub fn success(route: RouteData) -> Self {
        Self { outcome: RoutingOutcome::ok(), route: Some(route) }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { outcome: RoutingOutcome::failed(message), route: None }
    }
}

/// Punto a visitar tal como lo envía el cliente
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationPoint {
    /// `0` queda reservado para el punto de partida
    #[validate(range(min = 1))]
    pub location_id: i64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub name: String,
}

impl TryFrom<&LocationPoint> for Waypoint {
    type Error = ValidationErrors;

    fn try_from(point: &LocationPoint) -> Result<Self, Self::Error> {
        let coordinate = Coordinate::new(point.latitude, point.longitude).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("waypoints", e);
            errors
        })?;

        Ok(Waypoint {
            location_id: point.location_id,
            name: point.name.clone(),
            coordinate,
        })
    }
}

/// Request de ruta optimizada
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRouteRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub start_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub start_longitude: f64,
    #[validate]
    #[serde(default)]
    pub waypoints: Vec<LocationPoint>,
    #[serde(default)]
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub return_to_start: bool,
}

/// Response de ruta optimizada
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRouteResponse {
    #[serde(flatten)]
    pub outcome: RoutingOutcome,
    /// Identificadores de ubicación en el orden de visita
    pub optimal_order: Vec<i64>,
    pub total_distance: f64,
    pub total_duration: f64,
    pub route_segments: Vec<RouteSegment>,
    /// Tramos cuya ruta no se pudo obtener (excluidos de los totales)
    pub skipped_segments: Vec<SkippedSegment>,
}

impl OptimizedRouteResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            outcome: RoutingOutcome::failed(message),
            optimal_order: Vec::new(),
            total_distance: 0.0,
            total_duration: 0.0,
            route_segments: Vec::new(),
            skipped_segments: Vec::new(),
        }
    }
}

impl From<Itinerary> for OptimizedRouteResponse {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            outcome: RoutingOutcome::ok(),
            optimal_order: itinerary.optimal_order,
            total_distance: itinerary.total_distance,
            total_duration: itinerary.total_duration,
            route_segments: itinerary.segments,
            skipped_segments: itinerary.skipped_segments,
        }
    }
}

/// Estado de la instancia OSRM de un modo de transporte
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHealthResponse {
    pub mode: TransportMode,
    pub available: bool,
    pub timestamp: DateTime<Utc>,
}
