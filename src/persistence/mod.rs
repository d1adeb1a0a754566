//! Persistence layer: optional MySQL recording of lookups.
//!
//! [`PersistenceGate`] decides per call whether a write is attempted and
//! owns the connection for that one write. The database itself is reached
//! through the [`RecordDriver`] trait; the `mysql` feature provides the
//! `sqlx`-backed [`mysql::MySqlDriver`].

pub mod driver;
pub mod gate;
pub mod models;
#[cfg(feature = "mysql")]
pub mod mysql;

pub use driver::{RecordConnection, RecordDriver};
pub use gate::{PersistOutcome, PersistenceGate, SkipReason};
pub use models::TableName;
#[cfg(test)]
pub(crate) use models::StoredRecord;

/// Failures while writing a lookup to the database.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// `DB_TABLE` is not a plain identifier.
    #[error("invalid table name: {0:?}")]
    InvalidTable(String),

    /// Opening the connection failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Creating the table failed.
    #[error("ensuring table failed: {0}")]
    EnsureTable(String),

    /// The insert or its commit failed; nothing was written.
    #[error("insert failed: {0}")]
    Insert(String),

    /// Closing the connection failed.
    #[error("closing connection failed: {0}")]
    Close(String),
}
