//! Port for the external cédula lookup.
//!
//! The scraping engine that turns a barcode number into a [`QueryResult`]
//! lives outside this crate. [`CedulaLookup`] is the seam the service
//! talks to; [`crate::lookup::HttpLookup`] is the bundled adapter.

use std::time::Duration;

use async_trait::async_trait;

use super::QueryResult;

/// Default upper bound for a single lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(60);

/// Execution options passed to the lookup engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Whether the engine should run its browser without a visible window.
    pub headless: bool,
    /// Upper bound for the whole lookup.
    pub timeout: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            headless: true,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// Failures reported by a lookup engine.
///
/// The `Display` text is short enough to show to end users; full detail
/// belongs in the server log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The upstream source does not know the identifier.
    #[error("código inválido o inexistente: {0}")]
    InvalidIdentifier(String),

    /// The lookup did not finish within the configured timeout.
    #[error("tiempo de espera agotado tras {0:?}")]
    Timeout(Duration),

    /// The lookup engine could not be reached.
    #[error("servicio de consulta no disponible: {0}")]
    Unreachable(String),

    /// The lookup engine answered with an error status.
    #[error("el servicio de consulta respondió {status}: {message}")]
    Upstream {
        /// HTTP status code returned by the engine.
        status: u16,
        /// Error text returned by the engine.
        message: String,
    },

    /// The engine's answer could not be interpreted.
    #[error("respuesta ilegible del servicio de consulta: {0}")]
    Decode(String),
}

/// Looks up the status of a cédula by barcode number.
#[async_trait]
pub trait CedulaLookup: Send + Sync + std::fmt::Debug {
    /// Runs one lookup for `codigo`.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the identifier is unknown, the lookup
    /// times out, or the engine is unreachable or answers unintelligibly.
    async fn query(&self, codigo: &str, options: QueryOptions)
    -> Result<QueryResult, LookupError>;
}
