//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::ConsultaService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor. Read-only: nothing here changes between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lookup orchestration, including the persistence gate.
    pub consulta_service: Arc<ConsultaService>,
}
