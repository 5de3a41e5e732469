use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use treasure_hunt_routing::clients::OsrmClient;
use treasure_hunt_routing::config::environment::EnvironmentConfig;
use treasure_hunt_routing::create_app;
use treasure_hunt_routing::models::routing::TransportMode;
use treasure_hunt_routing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🗺️ Treasure Hunt Routing - Motor de optimización de rutas");
    info!("========================================================");
    info!("🌍 Entorno: {} (desarrollo: {})", config.environment, config.is_development());

    let osrm = OsrmClient::new(config.osrm.clone()).context("No se pudo crear el cliente HTTP de OSRM")?;
    info!("🚗 OSRM driving: {}", config.osrm.url_for(TransportMode::Driving));
    info!("🚲 OSRM cycling: {}", config.osrm.url_for(TransportMode::Cycling));
    info!("🚶 OSRM walking: {}", config.osrm.url_for(TransportMode::Walking));

    let addr: SocketAddr = config.server_url().parse().context("HOST/PORT inválidos")?;
    let app = create_app(AppState::new(config, Arc::new(osrm)));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   POST /api/routing/route - Ruta punto a punto");
    info!("   POST /api/routing/optimized-route - Ruta optimizada");
    info!("   GET  /api/routing/health/:mode - Estado de OSRM por modo");
    info!("   POST /api/teams/access-code - Código de acceso de equipo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
