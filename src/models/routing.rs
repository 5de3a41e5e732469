//! Modelo de dominio del motor de optimización de rutas
//!
//! Coordenadas validadas, waypoints, matriz de distancias, tour e itinerario.
//! Todos son transitorios: se construyen por petición y nunca se persisten.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::ValidationError;

use crate::utils::errors::{RoutingError, RoutingResult};
use crate::utils::validation::validate_coordinates;

/// Identificador reservado para el punto de partida sintético
pub const START_LOCATION_ID: i64 = 0;

/// Modo de transporte, cada uno servido por una instancia OSRM distinta.
/// JSON y rutas aceptan las mismas grafías (sin distinguir mayúsculas).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TransportMode {
    #[default]
    Driving,
    Cycling,
    Walking,
}

impl TransportMode {
    /// Perfil OSRM usado en la URL
    pub fn profile(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Cycling => "cycling",
            TransportMode::Walking => "walking",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "driving" => Ok(TransportMode::Driving),
            "cycling" => Ok(TransportMode::Cycling),
            "walking" => Ok(TransportMode::Walking),
            other => Err(format!("Unknown transport mode '{}'", other)),
        }
    }
}

impl TryFrom<String> for TransportMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Par latitud/longitud validado
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Formato OSRM `lon,lat` con 6 decimales y separador `.`
    pub fn to_osrm(&self) -> String {
        format!("{:.6},{:.6}", self.longitude, self.latitude)
    }
}

/// Punto de interés que el tour debe visitar
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub location_id: i64,
    pub name: String,
    pub coordinate: Coordinate,
}

/// Coste de viaje entre dos puntos
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCell {
    /// metros
    pub distance: f64,
    /// segundos
    pub duration: f64,
}

/// Matriz cuadrada de distancias/duraciones.
///
/// El índice 0 es el punto de partida; 1..N son los waypoints en el orden de
/// entrada. Los pares inalcanzables tienen coste infinito. No se asume simetría.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<MatrixCell>,
}

impl DistanceMatrix {
    /// Construir desde las tablas `distances` y `durations` del proveedor.
    /// Las celdas `None` se tratan como inalcanzables.
    pub fn from_tables(
        distances: Vec<Vec<Option<f64>>>,
        durations: Vec<Vec<Option<f64>>>,
    ) -> RoutingResult<Self> {
        let size = distances.len();
        if size == 0 {
            return Err(RoutingError::InvalidMatrix("empty distance table".to_string()));
        }
        if durations.len() != size {
            return Err(RoutingError::InvalidMatrix(format!(
                "distance table has {} rows but duration table has {}",
                size,
                durations.len()
            )));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row_index, (distance_row, duration_row)) in distances.iter().zip(durations.iter()).enumerate() {
            if distance_row.len() != size || duration_row.len() != size {
                return Err(RoutingError::InvalidMatrix(format!("row {} is not {} wide", row_index, size)));
            }
            for (column, (distance, duration)) in distance_row.iter().zip(duration_row.iter()).enumerate() {
                let cell = if row_index == column {
                    MatrixCell { distance: 0.0, duration: 0.0 }
                } else {
                    MatrixCell {
                        distance: distance.unwrap_or(f64::INFINITY),
                        duration: duration.unwrap_or(f64::INFINITY),
                    }
                };
                cells.push(cell);
            }
        }

        Ok(Self { size, cells })
    }

    /// Matriz con sólo distancias (duración cero). Útil para pruebas y heurísticas.
    pub fn from_distances(distances: Vec<Vec<f64>>) -> RoutingResult<Self> {
        let durations = distances.iter().map(|row| vec![Some(0.0); row.len()]).collect();
        let distances = distances
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Self::from_tables(distances, durations)
    }

    /// Número de puntos (N+1)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn cell(&self, from: usize, to: usize) -> MatrixCell {
        self.cells[from * self.size + to]
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.cell(from, to).distance
    }

    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.cell(from, to).duration
    }

    /// Conservar sólo los primeros `size` puntos
    pub fn truncated(self, size: usize) -> Self {
        if size >= self.size {
            return self;
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            let start = row * self.size;
            cells.extend_from_slice(&self.cells[start..start + size]);
        }
        Self { size, cells }
    }
}

/// Secuencia de visita: empieza en 0, visita cada waypoint una vez y
/// opcionalmente vuelve a 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    stops: Vec<usize>,
    returns_to_start: bool,
}

impl Tour {
    pub(crate) fn new(stops: Vec<usize>, returns_to_start: bool) -> Self {
        Self { stops, returns_to_start }
    }

    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    pub fn returns_to_start(&self) -> bool {
        self.returns_to_start
    }

    /// Índices de waypoints visitados, sin el ancla de partida/llegada
    pub fn waypoint_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.stops.iter().copied().filter(|&index| index != 0)
    }

    /// Pares consecutivos (origen, destino)
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.stops.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Paso individual de una ruta punto a punto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    pub distance: f64,
    pub duration: f64,
    pub instruction: String,
    pub maneuver: String,
}

/// Ruta punto a punto normalizada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    /// metros
    pub distance: f64,
    /// segundos
    pub duration: f64,
    /// pares `[longitud, latitud]`
    pub coordinates: Vec<[f64; 2]>,
    pub steps: Vec<RouteStep>,
}

/// Tramo realizado entre dos paradas consecutivas del tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub from_location_id: i64,
    pub to_location_id: i64,
    pub distance: f64,
    pub duration: f64,
    pub coordinates: Vec<[f64; 2]>,
}

/// Tramo cuya petición al proveedor falló y quedó fuera de los totales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSegment {
    pub from_location_id: i64,
    pub to_location_id: i64,
    pub reason: String,
}

/// Resultado final de la optimización
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    pub optimal_order: Vec<i64>,
    pub total_distance: f64,
    pub total_duration: f64,
    pub segments: Vec<RouteSegment>,
    pub skipped_segments: Vec<SkippedSegment>,
}

impl Itinerary {
    pub fn is_complete(&self) -> bool {
        self.skipped_segments.is_empty()
    }
}
