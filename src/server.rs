use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{
    config::{AppConfig, ServiceKind},
    datalayer::{MongoStore, initialize_database},
    logging::{TelemetryConfig, init_telemetry, shutdown_telemetry},
    routes::{create_router, endpoint_summary},
    state::AppState,
};

/// Run one lending backend until Ctrl+C / SIGTERM.
///
/// Configuration, including the CORS allow-list, is resolved before the
/// listener is bound. A database that cannot be reached aborts startup.
pub async fn run(service: ServiceKind) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables first
    dotenvy::dotenv().ok();

    init_telemetry(TelemetryConfig::from_env(service))?;

    info!(service = service.name(), "Starting lending backend");

    let config = AppConfig::from_env(service)?;

    if config.allow_list.is_empty() {
        warn!("No allowed origins configured, cross-origin requests are not restricted");
    } else {
        info!(
            origins = ?config.allow_list.origins(),
            "CORS allow-list loaded"
        );
    }

    let db = initialize_database(config.database.clone()).await?;
    let state = AppState::new(Arc::new(MongoStore::new(db.clone())), service);

    let app = create_router(state, &config);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        address = %addr,
        port = config.port,
        "Server listening and ready to accept connections"
    );
    info!(endpoints = ?endpoint_summary(&config), "Available API endpoints");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.shutdown().await;
    shutdown_telemetry();

    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, cleaning up...");
}
