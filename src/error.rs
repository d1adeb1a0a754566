//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is what the service hands back to handlers. The HTML
//! page turns it into a flash message; the JSON API turns it into a status
//! code and a structured body. Persistence failures never appear here: the
//! persistence gate reports them as a [`crate::persistence::PersistOutcome`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::LookupError;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "Debe ingresar un número de código de barras."
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Request-level failures.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                   |
/// |-----------|------------|-------------------------------|
/// | 1000–1999 | Validation | 400 Bad Request               |
/// | 2000–2999 | Lookup     | 404 / 502 / 504               |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The submitted barcode number was empty after trimming.
    #[error("Debe ingresar un número de código de barras.")]
    EmptyCodigo,

    /// The external lookup failed.
    #[error("Error al consultar la cédula: {0}")]
    Lookup(#[from] LookupError),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::EmptyCodigo => 1001,
            Self::Lookup(LookupError::InvalidIdentifier(_)) => 2001,
            Self::Lookup(LookupError::Timeout(_)) => 2002,
            Self::Lookup(LookupError::Unreachable(_)) => 2003,
            Self::Lookup(LookupError::Upstream { .. }) => 2004,
            Self::Lookup(LookupError::Decode(_)) => 2005,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyCodigo => StatusCode::BAD_REQUEST,
            Self::Lookup(LookupError::InvalidIdentifier(_)) => StatusCode::NOT_FOUND,
            Self::Lookup(LookupError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            Self::Lookup(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        (status, axum::Json(body)).into_response()
    }
}
