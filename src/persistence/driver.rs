//! Database driver seam used by the persistence gate.

use async_trait::async_trait;

use super::{PersistenceError, TableName};
use crate::config::ConnectionSettings;
use crate::domain::QueryResult;

/// Opens connections to the lookup database.
#[async_trait]
pub trait RecordDriver: Send + Sync + std::fmt::Debug {
    /// Short driver name for log fields.
    fn name(&self) -> &'static str;

    /// Opens one connection with `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Connect`] when the server cannot be
    /// reached or rejects the login.
    async fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Box<dyn RecordConnection>, PersistenceError>;
}

/// One open connection, used for a single write and then closed.
///
/// Dropping a connection without calling [`RecordConnection::close`] must
/// still release it.
#[async_trait]
pub trait RecordConnection: Send {
    /// Creates `table` if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::EnsureTable`] when the DDL fails.
    async fn ensure_table(&mut self, table: &TableName) -> Result<(), PersistenceError>;

    /// Inserts `record` and commits, returning the generated row ID.
    ///
    /// Insert and commit form one transaction: on error no row is left.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Insert`] when the insert or the commit
    /// fails.
    async fn insert_committed(
        &mut self,
        table: &TableName,
        record: &QueryResult,
    ) -> Result<u64, PersistenceError>;

    /// Closes the connection.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Close`] when the server does not
    /// acknowledge the shutdown; the connection is released regardless.
    async fn close(self: Box<Self>) -> Result<(), PersistenceError>;
}
