use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use patient_core::{rest_addr_from_env_value, CoreConfig, DatabaseLocation, PatientService};

/// Main entry point for the patient registry
///
/// Opens the SQLite store and serves the REST API until interrupted.
///
/// # Environment Variables
/// - `PATIENT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DB_PATH`: SQLite database file, or `:memory:` (default: "patients.db")
/// - `RUST_LOG`: tracing filter directives
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, the store or the listener fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_run=info".parse()?)
                .add_directive("patient_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = rest_addr_from_env_value(std::env::var("PATIENT_REST_ADDR").ok())?;
    let cfg = CoreConfig::new(DatabaseLocation::from_env_value(
        std::env::var("PATIENT_DB_PATH").ok(),
    ))?;

    tracing::info!(database = %cfg.database(), "++ Opening patient store");
    let store = cfg.open_store()?;
    let patient_service = PatientService::new(Arc::new(store));

    let app = api_rest::router(AppState::new(patient_service));

    tracing::info!("++ Starting patient REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("patient REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
