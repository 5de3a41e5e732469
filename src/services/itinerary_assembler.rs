//! Ensamblado del itinerario
//!
//! Recorre el tour par a par, pide al proveedor la ruta real de cada tramo y
//! acumula los totales. Los tramos que fallan se registran como omitidos.

use crate::clients::RoutingProvider;
use crate::models::routing::{
    Coordinate, Itinerary, RouteSegment, SkippedSegment, Tour, TransportMode, Waypoint,
    START_LOCATION_ID,
};

/// Punto del tour resuelto a coordenadas reales
#[derive(Debug, Clone, Copy)]
struct Stop<'a> {
    location_id: i64,
    name: &'a str,
    coordinate: Coordinate,
}

fn resolve_stop(index: usize, start: Coordinate, waypoints: &[Waypoint]) -> Stop<'_> {
    if index == 0 {
        Stop { location_id: START_LOCATION_ID, name: "inicio", coordinate: start }
    } else {
        let waypoint = &waypoints[index - 1];
        Stop {
            location_id: waypoint.location_id,
            name: &waypoint.name,
            coordinate: waypoint.coordinate,
        }
    }
}

/// Construir el itinerario pidiendo una ruta por cada tramo del tour.
///
/// Las peticiones son secuenciales. Un tramo fallido no aborta el cálculo:
/// se añade a `skipped_segments` y queda fuera de los totales.
pub async fn assemble_itinerary(
    provider: &dyn RoutingProvider,
    mode: TransportMode,
    start: Coordinate,
    waypoints: &[Waypoint],
    tour: &Tour,
) -> Itinerary {
    let mut itinerary = Itinerary {
        optimal_order: tour
            .waypoint_indices()
            .map(|index| waypoints[index - 1].location_id)
            .collect(),
        ..Itinerary::default()
    };

    for (from_index, to_index) in tour.legs() {
        let from = resolve_stop(from_index, start, waypoints);
        let to = resolve_stop(to_index, start, waypoints);
        log::debug!("🛣️ Tramo {} -> {}", from.name, to.name);

        match provider.route(mode, from.coordinate, to.coordinate).await {
            Ok(route) => {
                itinerary.total_distance += route.distance;
                itinerary.total_duration += route.duration;
                itinerary.segments.push(RouteSegment {
                    from_location_id: from.location_id,
                    to_location_id: to.location_id,
                    distance: route.distance,
                    duration: route.duration,
                    coordinates: route.coordinates,
                });
            }
            Err(e) => {
                log::warn!(
                    "⚠️ Tramo {} ({}) -> {} ({}) omitido: {}",
                    from.location_id,
                    from.name,
                    to.location_id,
                    to.name,
                    e
                );
                itinerary.skipped_segments.push(SkippedSegment {
                    from_location_id: from.location_id,
                    to_location_id: to.location_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "🧭 Itinerario: {} tramos, {} omitidos, {:.0} m, {:.0} s",
        itinerary.segments.len(),
        itinerary.skipped_segments.len(),
        itinerary.total_distance,
        itinerary.total_duration
    );

    itinerary
}
