//! MySQL implementation of the record driver.

use async_trait::async_trait;
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};

use super::{PersistenceError, RecordConnection, RecordDriver, TableName};
use crate::config::ConnectionSettings;
use crate::domain::QueryResult;

/// MySQL driver using a single `sqlx::MySqlConnection` per write.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDriver;

#[async_trait]
impl RecordDriver for MySqlDriver {
    fn name(&self) -> &'static str {
        "mysql"
    }

    async fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Box<dyn RecordConnection>, PersistenceError> {
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.database)
            .charset("utf8mb4");

        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(|e| PersistenceError::Connect(e.to_string()))?;

        Ok(Box::new(MySqlRecordConnection { conn }))
    }
}

/// An open MySQL connection. Dropping it closes the socket.
#[derive(Debug)]
pub struct MySqlRecordConnection {
    conn: MySqlConnection,
}

#[async_trait]
impl RecordConnection for MySqlRecordConnection {
    async fn ensure_table(&mut self, table: &TableName) -> Result<(), PersistenceError> {
        let ddl = table.create_table_sql();
        sqlx::query(&ddl)
            .execute(&mut self.conn)
            .await
            .map_err(|e| PersistenceError::EnsureTable(e.to_string()))?;
        Ok(())
    }

    async fn insert_committed(
        &mut self,
        table: &TableName,
        record: &QueryResult,
    ) -> Result<u64, PersistenceError> {
        let sql = table.insert_sql();
        let insert_err = |e: sqlx::Error| PersistenceError::Insert(e.to_string());

        // Rolled back on drop if the insert fails.
        let mut tx = self.conn.begin().await.map_err(insert_err)?;

        let mut query = sqlx::query(&sql);
        for (_, value) in record.fields() {
            query = query.bind(value);
        }
        let done = query.execute(&mut *tx).await.map_err(insert_err)?;

        tx.commit().await.map_err(insert_err)?;
        Ok(done.last_insert_id())
    }

    async fn close(self: Box<Self>) -> Result<(), PersistenceError> {
        let Self { conn } = *self;
        conn.close()
            .await
            .map_err(|e| PersistenceError::Close(e.to_string()))
    }
}
