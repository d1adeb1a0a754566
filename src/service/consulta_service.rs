//! Consulta service: one lookup, then an optional best-effort write.

use std::sync::Arc;

use crate::domain::{CedulaLookup, LookupError, QueryOptions, QueryResult};
use crate::error::GatewayError;
use crate::persistence::{PersistOutcome, PersistenceGate, SkipReason};

/// Orchestrates a single cédula lookup.
///
/// Stateless between calls: every call validates the identifier, asks
/// the lookup port, stores the result through the gate, and returns the
/// result unchanged. What the gate does never changes the return value.
#[derive(Debug, Clone)]
pub struct ConsultaService {
    lookup: Arc<dyn CedulaLookup>,
    gate: PersistenceGate,
    options: QueryOptions,
}

impl ConsultaService {
    /// Creates a new `ConsultaService`.
    #[must_use]
    pub fn new(lookup: Arc<dyn CedulaLookup>, gate: PersistenceGate, options: QueryOptions) -> Self {
        Self {
            lookup,
            gate,
            options,
        }
    }

    /// Looks up `codigo` (trimmed) and records the result.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EmptyCodigo`] without calling the lookup when
    /// `codigo` is blank, or [`GatewayError::Lookup`] when the lookup fails
    /// or exceeds the configured timeout.
    pub async fn consult(&self, codigo: &str) -> Result<QueryResult, GatewayError> {
        let codigo = codigo.trim();
        if codigo.is_empty() {
            return Err(GatewayError::EmptyCodigo);
        }

        let timeout = self.options.timeout;
        let result = match tokio::time::timeout(timeout, self.lookup.query(codigo, self.options))
            .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!(codigo, error = ?e, "lookup failed");
                return Err(e.into());
            }
            Err(_) => {
                tracing::error!(codigo, ?timeout, "lookup timed out");
                return Err(LookupError::Timeout(timeout).into());
            }
        };
        tracing::info!(codigo, "lookup succeeded");

        let outcome = self.gate.store(&result).await;
        log_outcome(codigo, &outcome);

        Ok(result)
    }
}

fn log_outcome(codigo: &str, outcome: &PersistOutcome) {
    match outcome {
        PersistOutcome::Stored { id } => {
            tracing::info!(codigo, id, "lookup recorded in database");
        }
        PersistOutcome::Skipped(SkipReason::DriverUnavailable) => {
            tracing::warn!(codigo, "built without a database driver; lookup not recorded");
        }
        PersistOutcome::Skipped(SkipReason::IncompleteConfig { missing }) => {
            tracing::info!(codigo, ?missing, "database configuration incomplete; lookup not recorded");
        }
        PersistOutcome::Failed(e) => {
            tracing::error!(codigo, error = %e, "failed to record lookup in database");
        }
    }
}
