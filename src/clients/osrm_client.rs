//! Cliente HTTP para OSRM
//!
//! Este módulo traduce las peticiones del motor de rutas a los endpoints
//! `table`, `route` y `nearest` de OSRM y normaliza sus respuestas.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::environment::OsrmConfig;
use crate::models::routing::{Coordinate, DistanceMatrix, RouteData, RouteStep, TransportMode};
use crate::utils::errors::{RoutingError, RoutingResult};

/// Proveedor externo de rutas (matrices, rutas punto a punto, disponibilidad)
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Matriz de distancias/duraciones entre todas las coordenadas, en el orden dado
    async fn distance_matrix(
        &self,
        mode: TransportMode,
        coordinates: &[Coordinate],
    ) -> RoutingResult<DistanceMatrix>;

    /// Ruta completa (geometría + pasos) entre dos coordenadas
    async fn route(
        &self,
        mode: TransportMode,
        from: Coordinate,
        to: Coordinate,
    ) -> RoutingResult<RouteData>;

    /// El proveedor del modo responde con un estado HTTP de éxito
    async fn is_available(&self, mode: TransportMode) -> bool;
}

/// Cliente OSRM: un cliente para todas las instancias, elegidas por modo
pub struct OsrmClient {
    config: OsrmConfig,
    client: Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent("TreasureHuntRouting/1.0")
            .build()?;

        Ok(Self { config, client })
    }

    fn table_url(&self, mode: TransportMode, coordinates: &[Coordinate]) -> String {
        format!(
            "{}/table/v1/{}/{}?annotations=distance,duration",
            self.config.url_for(mode),
            mode.profile(),
            join_coordinates(coordinates)
        )
    }

    fn route_url(&self, mode: TransportMode, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson&steps=true",
            self.config.url_for(mode),
            mode.profile(),
            join_coordinates(&[from, to])
        )
    }

    /// GET con decodificación del sobre `{code, message}` de OSRM
    async fn get_json<T>(&self, url: &str) -> RoutingResult<T>
    where
        T: for<'de> Deserialize<'de> + OsrmEnvelope,
    {
        log::debug!("🌐 OSRM request: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("❌ OSRM HTTP error {}: {}", status, body);
            // OSRM devuelve {code, message} también en respuestas 4xx
            return match serde_json::from_str::<OsrmErrorBody>(&body) {
                Ok(OsrmErrorBody { message: Some(message) }) => Err(RoutingError::Provider(message)),
                _ => Err(RoutingError::Status(status)),
            };
        }

        let parsed: T = serde_json::from_str(&body).map_err(|e| RoutingError::Decode(e.to_string()))?;
        if parsed.code() != "Ok" {
            log::warn!("⚠️ OSRM returned code {}", parsed.code());
            return Err(RoutingError::Provider(
                parsed.message().unwrap_or_else(|| T::FALLBACK_MESSAGE.to_string()),
            ));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl RoutingProvider for OsrmClient {
    async fn distance_matrix(
        &self,
        mode: TransportMode,
        coordinates: &[Coordinate],
    ) -> RoutingResult<DistanceMatrix> {
        let url = self.table_url(mode, coordinates);
        let table: OsrmTableResponse = self.get_json(&url).await?;

        let distances = table
            .distances
            .ok_or_else(|| RoutingError::Decode("table response has no distances".to_string()))?;
        let durations = table
            .durations
            .ok_or_else(|| RoutingError::Decode("table response has no durations".to_string()))?;

        let matrix = DistanceMatrix::from_tables(distances, durations)?;
        if matrix.len() != coordinates.len() {
            return Err(RoutingError::InvalidMatrix(format!(
                "expected {} points, provider returned {}",
                coordinates.len(),
                matrix.len()
            )));
        }

        log::info!("📊 Matriz {}x{} obtenida de OSRM ({})", matrix.len(), matrix.len(), mode);
        Ok(matrix)
    }

    async fn route(
        &self,
        mode: TransportMode,
        from: Coordinate,
        to: Coordinate,
    ) -> RoutingResult<RouteData> {
        let url = self.route_url(mode, from, to);
        let response: OsrmRouteResponse = self.get_json(&url).await?;

        // Se ignoran las rutas alternativas
        let route = response.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;

        let steps = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| RouteStep {
                distance: step.distance,
                duration: step.duration,
                instruction: step.maneuver.instruction.unwrap_or_default(),
                maneuver: step.maneuver.maneuver_type.unwrap_or_default(),
            })
            .collect();

        Ok(RouteData {
            distance: route.distance,
            duration: route.duration,
            coordinates: route.geometry.coordinates,
            steps,
        })
    }

    async fn is_available(&self, mode: TransportMode) -> bool {
        let url = format!("{}/nearest/v1/driving/0,0", self.config.url_for(mode));
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::warn!("⚠️ OSRM {} no disponible: {}", mode, e);
                false
            }
        }
    }
}

/// Lista `lon,lat;lon,lat;...` para las URLs de OSRM
pub fn join_coordinates(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(Coordinate::to_osrm)
        .collect::<Vec<_>>()
        .join(";")
}

trait OsrmEnvelope {
    const FALLBACK_MESSAGE: &'static str;
    fn code(&self) -> &str;
    fn message(&self) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct OsrmErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    distances: Option<Vec<Vec<Option<f64>>>>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmEnvelope for OsrmTableResponse {
    const FALLBACK_MESSAGE: &'static str = "Table request failed";

    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self) -> Option<String> {
        self.message.clone()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

impl OsrmEnvelope for OsrmRouteResponse {
    const FALLBACK_MESSAGE: &'static str = "No route found";

    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self) -> Option<String> {
        self.message.clone()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    maneuver_type: Option<String>,
    instruction: Option<String>,
}
