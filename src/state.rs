//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::clients::RoutingProvider;
use crate::config::environment::EnvironmentConfig;
use crate::services::{InMemoryAccessCodeStore, RoutingService, TeamCodeService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub routing: Arc<RoutingService>,
    pub team_codes: Arc<TeamCodeService<InMemoryAccessCodeStore>>,
    /// Fuente aleatoria explícita para los códigos de acceso
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, provider: Arc<dyn RoutingProvider>) -> Self {
        Self::with_rng(config, provider, StdRng::from_entropy())
    }

    pub fn with_rng(config: EnvironmentConfig, provider: Arc<dyn RoutingProvider>, rng: StdRng) -> Self {
        Self {
            config,
            routing: Arc::new(RoutingService::new(provider)),
            team_codes: Arc::new(TeamCodeService::new(InMemoryAccessCodeStore::new())),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Plazo para una operación de enrutamiento que empieza ahora.
    /// `None` si el plazo configurado no cabe en un `Instant`.
    pub fn routing_deadline(&self) -> Option<Instant> {
        let deadline = Instant::now().checked_add(self.config.osrm.routing_deadline);
        if deadline.is_none() {
            log::warn!(
                "⚠️ ROUTING_DEADLINE_SECS={} desborda el reloj, se ignora el plazo",
                self.config.osrm.routing_deadline.as_secs()
            );
        }
        deadline
    }
}
