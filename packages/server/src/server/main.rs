// Main entry point for the Orchid API server

use anyhow::{Context, Result};
use orchid_core::{kernel::ServerDeps, server::serve, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orchid_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting server...");

    // Load configuration; a missing API key aborts startup here
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        planner = %config.models.planner,
        enrichment = %config.models.enrichment,
        formatter = %config.models.formatter,
        "Configuration loaded"
    );

    let deps = ServerDeps::from_config(&config)?;

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    serve(deps, &addr).await
}
