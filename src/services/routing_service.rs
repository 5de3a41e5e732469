//! Servicio de enrutamiento
//!
//! Orquesta el motor de optimización: matriz de distancias, heurística del
//! vecino más cercano y ensamblado del itinerario. También expone la ruta
//! punto a punto y el estado del proveedor. Ningún error cruza esta frontera
//! como pánico: todo se convierte en una respuesta `success = false`.

use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;

use crate::clients::RoutingProvider;
use crate::dto::routing_dto::{
    OptimizedRouteRequest, OptimizedRouteResponse, RouteRequest, RouteResponse,
};
use crate::models::routing::{Coordinate, DistanceMatrix, Itinerary, TransportMode, Waypoint};
use crate::services::itinerary_assembler::assemble_itinerary;
use crate::services::tour_solver::solve_nearest_neighbor;
use crate::utils::errors::{RoutingError, RoutingResult};

pub struct RoutingService {
    provider: Arc<dyn RoutingProvider>,
}

impl RoutingService {
    pub fn new(provider: Arc<dyn RoutingProvider>) -> Self {
        Self { provider }
    }

    /// Ruta punto a punto con geometría y pasos
    pub async fn get_route(&self, request: &RouteRequest, deadline: Option<Instant>) -> RouteResponse {
        let (from, to) = match (
            Coordinate::new(request.start_latitude, request.start_longitude),
            Coordinate::new(request.end_latitude, request.end_longitude),
        ) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => {
                return RouteResponse::failed(format!("Invalid coordinates: {}", e.code));
            }
        };

        log::info!(
            "🗺️ Ruta {} ({}) -> ({})",
            request.transport_mode,
            from.to_osrm(),
            to.to_osrm()
        );

        match with_deadline(deadline, self.provider.route(request.transport_mode, from, to)).await {
            Ok(route) => RouteResponse::success(route),
            Err(e) => {
                log::error!("❌ Error obteniendo ruta de OSRM: {}", e);
                RouteResponse::failed(e.to_string())
            }
        }
    }

    /// Ruta optimizada sobre todos los waypoints de la petición
    pub async fn get_optimized_route(
        &self,
        request: &OptimizedRouteRequest,
        deadline: Option<Instant>,
    ) -> OptimizedRouteResponse {
        if request.waypoints.is_empty() {
            return OptimizedRouteResponse::failed(RoutingError::NoWaypoints.to_string());
        }

        let start = match Coordinate::new(request.start_latitude, request.start_longitude) {
            Ok(start) => start,
            Err(e) => return OptimizedRouteResponse::failed(format!("Invalid start coordinates: {}", e.code)),
        };

        let waypoints = match request
            .waypoints
            .iter()
            .map(Waypoint::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(waypoints) => waypoints,
            Err(e) => return OptimizedRouteResponse::failed(format!("Invalid waypoint coordinates: {}", e)),
        };

        log::info!(
            "🎯 Optimizando ruta ({}) para {} waypoints, regreso al inicio: {}",
            request.transport_mode,
            waypoints.len(),
            request.return_to_start
        );

        let planning = self.plan_itinerary(request.transport_mode, start, &waypoints, request.return_to_start);
        match with_deadline(deadline, planning).await {
            Ok(itinerary) => {
                if !itinerary.is_complete() {
                    log::warn!(
                        "⚠️ Itinerario parcial: {} tramo(s) omitido(s)",
                        itinerary.skipped_segments.len()
                    );
                }
                itinerary.into()
            }
            Err(e) => {
                log::error!("❌ Error en optimización de ruta: {}", e);
                OptimizedRouteResponse::failed(e.to_string())
            }
        }
    }

    /// Matriz -> tour greedy -> itinerario.
    ///
    /// Falla sólo si la matriz no se puede obtener; los tramos fallidos se
    /// reportan dentro del itinerario.
    pub async fn plan_itinerary(
        &self,
        mode: TransportMode,
        start: Coordinate,
        waypoints: &[Waypoint],
        return_to_start: bool,
    ) -> RoutingResult<Itinerary> {
        if waypoints.is_empty() {
            return Err(RoutingError::NoWaypoints);
        }

        let matrix = self.fetch_distance_matrix(mode, start, waypoints, return_to_start).await?;
        let tour = solve_nearest_neighbor(&matrix, return_to_start);
        log::debug!("🔢 Tour greedy: {:?} (vuelta al inicio: {})", tour.stops(), tour.returns_to_start());

        Ok(assemble_itinerary(self.provider.as_ref(), mode, start, waypoints, &tour).await)
    }

    /// Pedir la matriz: inicio, waypoints en orden y, si se regresa, otra vez
    /// el inicio. La fila/columna duplicada del regreso se descarta.
    async fn fetch_distance_matrix(
        &self,
        mode: TransportMode,
        start: Coordinate,
        waypoints: &[Waypoint],
        return_to_start: bool,
    ) -> RoutingResult<DistanceMatrix> {
        let mut coordinates = Vec::with_capacity(waypoints.len() + 2);
        coordinates.push(start);
        coordinates.extend(waypoints.iter().map(|w| w.coordinate));
        if return_to_start {
            coordinates.push(start);
        }

        let matrix = self.provider.distance_matrix(mode, &coordinates).await?;
        Ok(matrix.truncated(waypoints.len() + 1))
    }

    pub async fn is_provider_available(&self, mode: TransportMode) -> bool {
        self.provider.is_available(mode).await
    }
}

async fn with_deadline<T, F>(deadline: Option<Instant>, future: F) -> RoutingResult<T>
where
    F: Future<Output = RoutingResult<T>>,
{
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, future)
            .await
            .map_err(|_| RoutingError::DeadlineExceeded)?,
        None => future.await,
    }
}
