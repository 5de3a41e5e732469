//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno, incluida la ubicación
//! de las instancias OSRM para cada modo de transporte.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::routing::TransportMode;

/// Configuración del proveedor de rutas OSRM
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub car_port: u16,
    pub bicycle_port: u16,
    pub foot_port: u16,
    /// Timeout por petición HTTP individual
    pub request_timeout: Duration,
    /// Plazo máximo para una operación de enrutamiento completa
    pub routing_deadline: Duration,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            car_port: 5000,
            bicycle_port: 5001,
            foot_port: 5002,
            request_timeout: Duration::from_secs(30),
            routing_deadline: Duration::from_secs(120),
        }
    }
}

impl OsrmConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            base_url: env::var("OSRM_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            car_port: parse_var("OSRM_CAR_PORT", defaults.car_port)?,
            bicycle_port: parse_var("OSRM_BICYCLE_PORT", defaults.bicycle_port)?,
            foot_port: parse_var("OSRM_FOOT_PORT", defaults.foot_port)?,
            request_timeout: Duration::from_secs(parse_var(
                "OSRM_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            routing_deadline: Duration::from_secs(parse_var(
                "ROUTING_DEADLINE_SECS",
                defaults.routing_deadline.as_secs(),
            )?),
        })
    }

    /// Puerto de la instancia OSRM que sirve un modo de transporte
    pub fn port_for(&self, mode: TransportMode) -> u16 {
        match mode {
            TransportMode::Driving => self.car_port,
            TransportMode::Cycling => self.bicycle_port,
            TransportMode::Walking => self.foot_port,
        }
    }

    /// URL base (`host:puerto`) de la instancia OSRM de un modo
    pub fn url_for(&self, mode: TransportMode) -> String {
        format!("{}:{}", self.base_url, self.port_for(mode))
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
    pub osrm: OsrmConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            log_level: tracing::Level::DEBUG,
            osrm: OsrmConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let log_level = match env::var("LOG_LEVEL") {
            Ok(level) => tracing::Level::from_str(&level)
                .map_err(|_| anyhow!("LOG_LEVEL must be one of trace, debug, info, warn, error"))?,
            Err(_) if environment == "production" => tracing::Level::INFO,
            Err(_) => defaults.log_level,
        };

        Ok(Self {
            environment,
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
            log_level,
            osrm: OsrmConfig::from_env()?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_mode_targets_its_own_instance() {
        let config = OsrmConfig {
            base_url: "http://osrm.internal".to_string(),
            car_port: 5000,
            bicycle_port: 5001,
            foot_port: 5002,
            ..OsrmConfig::default()
        };

        assert_eq!(config.url_for(TransportMode::Driving), "http://osrm.internal:5000");
        assert_eq!(config.url_for(TransportMode::Cycling), "http://osrm.internal:5001");
        assert_eq!(config.url_for(TransportMode::Walking), "http://osrm.internal:5002");
    }

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_origins(" http://localhost:4200, ,https://hunt.example.org ");
        assert_eq!(origins, vec!["http://localhost:4200", "https://hunt.example.org"]);
    }
}
