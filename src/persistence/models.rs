//! Table model for stored lookups.

#[cfg(test)]
use chrono::{DateTime, Utc};

use super::PersistenceError;
use crate::domain::{FIELD_NAMES, QueryResult};

/// Longest identifier MySQL accepts for a table name.
const MAX_TABLE_NAME_LEN: usize = 64;

/// A validated table name, safe to splice into DDL and DML.
///
/// Only ASCII alphanumerics and `_` are accepted; the name is still
/// backtick-quoted when rendered into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Validates `raw` as a table name.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidTable`] for empty, overlong, or
    /// non-identifier names.
    pub fn parse(raw: &str) -> Result<Self, PersistenceError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_TABLE_NAME_LEN
            && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(PersistenceError::InvalidTable(raw.to_string()))
        }
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for this table.
    #[must_use]
    pub fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS `{}` (\
             id INT AUTO_INCREMENT PRIMARY KEY, \
             codigo_de_barras VARCHAR(20) NOT NULL, \
             fuero VARCHAR(10), \
             juzgado VARCHAR(10), \
             zona VARCHAR(10), \
             fecha_ingreso VARCHAR(20), \
             fecha_asignacion_zona VARCHAR(20), \
             fecha_devolucion VARCHAR(20), \
             resultado_diligencia VARCHAR(20), \
             fecha_disposicion_juzgado VARCHAR(20), \
             fecha_registro TIMESTAMP DEFAULT CURRENT_TIMESTAMP\
             ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
            self.0
        )
    }

    /// `INSERT` statement with one positional placeholder per field of
    /// [`QueryResult::fields`].
    #[must_use]
    pub fn insert_sql(&self) -> String {
        let placeholders = vec!["?"; FIELD_NAMES.len()].join(", ");
        format!(
            "INSERT INTO `{}` ({}) VALUES ({placeholders})",
            self.0,
            FIELD_NAMES.join(", ")
        )
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A row of the lookup table, as kept by the in-memory test driver.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredRecord {
    /// Auto-increment row ID.
    pub id: u64,
    /// The stored lookup fields.
    pub result: QueryResult,
    /// Server-side insertion timestamp.
    pub fecha_registro: DateTime<Utc>,
}
