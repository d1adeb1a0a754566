//! cedula-gateway server entry point.
//!
//! Starts the Axum HTTP server with the lookup page and JSON endpoints.

use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cedula_gateway::api;
use cedula_gateway::app_state::AppState;
use cedula_gateway::config::GatewayConfig;
use cedula_gateway::lookup::HttpLookup;
use cedula_gateway::persistence::{PersistenceGate, RecordDriver};
use cedula_gateway::service::ConsultaService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().context("invalid configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting cedula-gateway");

    // Build adapters
    let lookup = HttpLookup::new(&config.service_url).context("building HTTP client")?;
    let gate = PersistenceGate::new(config.persistence.clone(), database_driver());
    match config.persistence.connection_settings() {
        Ok(settings) => tracing::info!(
            host = %settings.host,
            database = %settings.database,
            table = %config.persistence.table,
            "lookups will be recorded"
        ),
        Err(missing) => tracing::info!(?missing, "database not configured; lookups will not be recorded"),
    }

    // Build service layer
    let consulta_service = Arc::new(ConsultaService::new(
        Arc::new(lookup),
        gate,
        config.query_options,
    ));

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { consulta_service });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, service = %config.service_url, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "mysql")]
fn database_driver() -> Option<Arc<dyn RecordDriver>> {
    Some(Arc::new(cedula_gateway::persistence::mysql::MySqlDriver))
}

#[cfg(not(feature = "mysql"))]
fn database_driver() -> Option<Arc<dyn RecordDriver>> {
    tracing::warn!("built without the `mysql` feature; lookups will not be recorded");
    None
}
