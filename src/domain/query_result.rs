//! Structured outcome of a cédula lookup.
//!
//! [`QueryResult`] is produced once per successful lookup and never mutated.
//! Its serde names are the persisted column names, so the same type decodes
//! the scraping service payload, encodes the JSON API response, and feeds
//! the persistence insert.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Column names of the plain field mapping, in insert order.
pub const FIELD_NAMES: [&str; 9] = [
    "codigo_de_barras",
    "fuero",
    "juzgado",
    "zona",
    "fecha_ingreso",
    "fecha_asignacion_zona",
    "fecha_devolucion",
    "resultado_diligencia",
    "fecha_disposicion_juzgado",
];

/// Status of a cédula as reported by the upstream lookup.
///
/// Every field except the identifier is optional; the values are opaque
/// strings (dates are not parsed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueryResult {
    /// Barcode number of the cédula.
    #[serde(rename = "codigo_de_barras")]
    pub document_id: String,
    /// Jurisdiction (fuero).
    #[serde(rename = "fuero", default)]
    pub jurisdiction: Option<String>,
    /// Court (juzgado).
    #[serde(rename = "juzgado", default)]
    pub court: Option<String>,
    /// Delivery zone.
    #[serde(rename = "zona", default)]
    pub zone: Option<String>,
    /// Date the cédula entered the office.
    #[serde(rename = "fecha_ingreso", default)]
    pub intake_date: Option<String>,
    /// Date the cédula was assigned to its zone.
    #[serde(rename = "fecha_asignacion_zona", default)]
    pub zone_assignment_date: Option<String>,
    /// Date the cédula was returned.
    #[serde(rename = "fecha_devolucion", default)]
    pub return_date: Option<String>,
    /// Outcome of the proceeding (resultado de la diligencia).
    #[serde(rename = "resultado_diligencia", default)]
    pub proceeding_outcome: Option<String>,
    /// Date the court disposed of the cédula.
    #[serde(rename = "fecha_disposicion_juzgado", default)]
    pub disposition_date: Option<String>,
}

impl QueryResult {
    /// Creates a result carrying only the identifier.
    #[must_use]
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            jurisdiction: None,
            court: None,
            zone: None,
            intake_date: None,
            zone_assignment_date: None,
            return_date: None,
            proceeding_outcome: None,
            disposition_date: None,
        }
    }

    /// Returns the plain field mapping as `(column, value)` pairs in
    /// [`FIELD_NAMES`] order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, Option<&str>); 9] {
        [
            (FIELD_NAMES[0], Some(self.document_id.as_str())),
            (FIELD_NAMES[1], self.jurisdiction.as_deref()),
            (FIELD_NAMES[2], self.court.as_deref()),
            (FIELD_NAMES[3], self.zone.as_deref()),
            (FIELD_NAMES[4], self.intake_date.as_deref()),
            (FIELD_NAMES[5], self.zone_assignment_date.as_deref()),
            (FIELD_NAMES[6], self.return_date.as_deref()),
            (FIELD_NAMES[7], self.proceeding_outcome.as_deref()),
            (FIELD_NAMES[8], self.disposition_date.as_deref()),
        ]
    }
}
