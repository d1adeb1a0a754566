//! Lookup form payload.

use serde::Deserialize;

/// Body of `POST /`, sent as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultaForm {
    /// Barcode number as typed; a missing field reads as empty.
    #[serde(default)]
    pub codigo: String,
}
