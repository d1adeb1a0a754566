//! Persistence gate: optional, best-effort recording of one lookup.
//!
//! Every call to [`PersistenceGate::store`] is independent. The gate never
//! returns an error: the result is a [`PersistOutcome`] the caller logs,
//! and the HTTP response is built the same way whatever it says.

use std::sync::Arc;

use super::{PersistenceError, RecordConnection, RecordDriver, TableName};
use crate::config::PersistenceConfig;
use crate::domain::QueryResult;

/// Why a write was not attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The binary was built without a database driver.
    DriverUnavailable,
    /// Some of the required `DB_*` variables are unset.
    IncompleteConfig {
        /// Names of the unset variables.
        missing: Vec<&'static str>,
    },
}

/// Result of one [`PersistenceGate::store`] call.
#[derive(Debug)]
pub enum PersistOutcome {
    /// One row was inserted and committed.
    Stored {
        /// Generated primary key.
        id: u64,
    },
    /// No connection was opened.
    Skipped(SkipReason),
    /// The write was attempted and failed; nothing was stored.
    Failed(PersistenceError),
}

impl PersistOutcome {
    /// Returns `true` if a row was written.
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }
}

/// Decides whether to write and owns the connection for that write.
#[derive(Debug, Clone)]
pub struct PersistenceGate {
    config: PersistenceConfig,
    driver: Option<Arc<dyn RecordDriver>>,
}

impl PersistenceGate {
    /// Creates a gate. `driver` is `None` when no database support was
    /// compiled in.
    #[must_use]
    pub fn new(config: PersistenceConfig, driver: Option<Arc<dyn RecordDriver>>) -> Self {
        Self { config, driver }
    }

    /// Records `record` if a driver and a complete configuration exist.
    ///
    /// The connection is closed on every path once it has been opened.
    pub async fn store(&self, record: &QueryResult) -> PersistOutcome {
        let Some(driver) = &self.driver else {
            return PersistOutcome::Skipped(SkipReason::DriverUnavailable);
        };
        let settings = match self.config.connection_settings() {
            Ok(settings) => settings,
            Err(missing) => {
                return PersistOutcome::Skipped(SkipReason::IncompleteConfig { missing });
            }
        };
        let table = match TableName::parse(&self.config.table) {
            Ok(table) => table,
            Err(e) => return PersistOutcome::Failed(e),
        };

        let mut conn = match driver.connect(&settings).await {
            Ok(conn) => conn,
            Err(e) => return PersistOutcome::Failed(e),
        };
        tracing::debug!(driver = driver.name(), host = %settings.host, %table, "connected");

        let written = write_record(conn.as_mut(), &table, record).await;
        let closed = conn.close().await;

        match (written, closed) {
            (Ok(id), Ok(())) => PersistOutcome::Stored { id },
            (Ok(id), Err(e)) => {
                tracing::warn!(error = %e, id, "row committed but connection did not close cleanly");
                PersistOutcome::Stored { id }
            }
            (Err(e), Ok(())) => PersistOutcome::Failed(e),
            (Err(e), Err(close_err)) => {
                tracing::warn!(error = %close_err, "connection did not close cleanly after failed write");
                PersistOutcome::Failed(e)
            }
        }
    }
}

async fn write_record(
    conn: &mut dyn RecordConnection,
    table: &TableName,
    record: &QueryResult,
) -> Result<u64, PersistenceError> {
    conn.ensure_table(table).await?;
    conn.insert_committed(table, record).await
}
