//! Proveedor de rutas en memoria para las pruebas unitarias

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::clients::RoutingProvider;
use crate::models::routing::{Coordinate, DistanceMatrix, RouteData, RouteStep, TransportMode};
use crate::utils::errors::{RoutingError, RoutingResult};

/// Distancias euclídeas en grados escaladas a "metros"; duración = distancia / 10
pub struct FakeProvider {
    failing_destination: Option<(f64, f64)>,
    table_failure: Option<String>,
    delay: Option<Duration>,
    table_calls: AtomicUsize,
    route_calls: AtomicUsize,
    last_table_size: AtomicUsize,
}

const SCALE: f64 = 100_000.0;

fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = a.latitude() - b.latitude();
    let dlon = a.longitude() - b.longitude();
    (dlat * dlat + dlon * dlon).sqrt() * SCALE
}

impl FakeProvider {
    pub fn euclidean() -> Self {
        Self {
            failing_destination: None,
            table_failure: None,
            delay: None,
            table_calls: AtomicUsize::new(0),
            route_calls: AtomicUsize::new(0),
            last_table_size: AtomicUsize::new(0),
        }
    }

    pub fn failing_route_to(mut self, latitude: f64, longitude: f64) -> Self {
        self.failing_destination = Some((latitude, longitude));
        self
    }

    pub fn failing_table(mut self, message: &str) -> Self {
        self.table_failure = Some(message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn table_calls(&self) -> usize {
        self.table_calls.load(Ordering::SeqCst)
    }

    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    pub fn last_table_size(&self) -> usize {
        self.last_table_size.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingProvider for FakeProvider {
    async fn distance_matrix(
        &self,
        _mode: TransportMode,
        coordinates: &[Coordinate],
    ) -> RoutingResult<DistanceMatrix> {
        self.table_calls.fetch_add(1, Ordering::SeqCst);
        self.last_table_size.store(coordinates.len(), Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.table_failure {
            return Err(RoutingError::Provider(message.clone()));
        }

        let rows = coordinates
            .iter()
            .map(|&from| coordinates.iter().map(|&to| distance(from, to)).collect())
            .collect();
        DistanceMatrix::from_distances(rows)
    }

    async fn route(
        &self,
        _mode: TransportMode,
        from: Coordinate,
        to: Coordinate,
    ) -> RoutingResult<RouteData> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_destination == Some((to.latitude(), to.longitude())) {
            return Err(RoutingError::NoRoute);
        }

        let meters = distance(from, to);
        Ok(RouteData {
            distance: meters,
            duration: meters / 10.0,
            coordinates: vec![
                [from.longitude(), from.latitude()],
                [to.longitude(), to.latitude()],
            ],
            steps: vec![RouteStep {
                distance: meters,
                duration: meters / 10.0,
                instruction: String::new(),
                maneuver: "depart".to_string(),
            }],
        })
    }

    async fn is_available(&self, _mode: TransportMode) -> bool {
        true
    }
}
