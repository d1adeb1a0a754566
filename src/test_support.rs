//! In-memory fakes shared by unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::config::{ConnectionSettings, PersistenceConfig};
use crate::domain::{CedulaLookup, LookupError, QueryOptions, QueryResult};
use crate::persistence::{
    PersistenceError, RecordConnection, RecordDriver, StoredRecord, TableName,
};

/// Reference lookup result used across handler, service and gate tests.
pub(crate) fn sample_result() -> QueryResult {
    QueryResult {
        document_id: "12345".to_string(),
        jurisdiction: Some("CIV".to_string()),
        court: Some("J1".to_string()),
        zone: Some("Z1".to_string()),
        intake_date: Some("2025-01-01".to_string()),
        zone_assignment_date: Some("2025-01-02".to_string()),
        return_date: Some(String::new()),
        proceeding_outcome: Some("PENDIENTE".to_string()),
        disposition_date: Some(String::new()),
    }
}

/// Persistence config with all four required values set.
pub(crate) fn complete_db_config() -> PersistenceConfig {
    PersistenceConfig {
        host: Some("db.test".to_string()),
        user: Some("app".to_string()),
        password: Some("secret".to_string()),
        database: Some("juzgados".to_string()),
        table: "cedulas".to_string(),
    }
}

/// Operation counters recorded by [`InMemoryDriver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DriverStats {
    pub connects: usize,
    pub ensures: usize,
    pub inserts: usize,
    pub closes: usize,
    /// Connections dropped, closed or not.
    pub released: usize,
}

#[derive(Debug, Default)]
struct Store {
    stats: DriverStats,
    rows: Vec<StoredRecord>,
    next_id: u64,
}

/// Database driver backed by a `Vec`, with switchable failures.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryDriver {
    store: Arc<Mutex<Store>>,
    fail_connect: bool,
    fail_ensure: bool,
    fail_insert: bool,
    fail_close: bool,
}

impl InMemoryDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub(crate) fn failing_ensure(mut self) -> Self {
        self.fail_ensure = true;
        self
    }

    pub(crate) fn failing_insert(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    pub(crate) fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub(crate) fn stats(&self) -> DriverStats {
        lock(&self.store).stats
    }

    pub(crate) fn rows(&self) -> Vec<StoredRecord> {
        lock(&self.store).rows.clone()
    }
}

fn lock(store: &Mutex<Store>) -> MutexGuard<'_, Store> {
    store
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl RecordDriver for InMemoryDriver {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn connect(
        &self,
        _settings: &ConnectionSettings,
    ) -> Result<Box<dyn RecordConnection>, PersistenceError> {
        if self.fail_connect {
            return Err(PersistenceError::Connect("connection refused".to_string()));
        }
        lock(&self.store).stats.connects += 1;
        Ok(Box::new(InMemoryConnection {
            store: Arc::clone(&self.store),
            fail_ensure: self.fail_ensure,
            fail_insert: self.fail_insert,
            fail_close: self.fail_close,
        }))
    }
}

struct InMemoryConnection {
    store: Arc<Mutex<Store>>,
    fail_ensure: bool,
    fail_insert: bool,
    fail_close: bool,
}

#[async_trait]
impl RecordConnection for InMemoryConnection {
    async fn ensure_table(&mut self, _table: &TableName) -> Result<(), PersistenceError> {
        lock(&self.store).stats.ensures += 1;
        if self.fail_ensure {
            return Err(PersistenceError::EnsureTable("CREATE command denied".to_string()));
        }
        Ok(())
    }

    async fn insert_committed(
        &mut self,
        _table: &TableName,
        record: &QueryResult,
    ) -> Result<u64, PersistenceError> {
        let mut store = lock(&self.store);
        store.stats.inserts += 1;
        if self.fail_insert {
            return Err(PersistenceError::Insert("Data too long for column".to_string()));
        }
        store.next_id += 1;
        let id = store.next_id;
        store.rows.push(StoredRecord {
            id,
            result: record.clone(),
            fecha_registro: Utc::now(),
        });
        Ok(id)
    }

    async fn close(self: Box<Self>) -> Result<(), PersistenceError> {
        lock(&self.store).stats.closes += 1;
        if self.fail_close {
            return Err(PersistenceError::Close("broken pipe".to_string()));
        }
        Ok(())
    }
}

impl Drop for InMemoryConnection {
    fn drop(&mut self) {
        lock(&self.store).stats.released += 1;
    }
}

/// Log sink for asserting on emitted `tracing` events.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs a plain-text subscriber writing into a fresh capture for
    /// the current thread, until the guard is dropped.
    pub(crate) fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub(crate) fn contents(&self) -> String {
        let buf = self
            .buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Lookup fake returning a fixed answer and counting calls.
#[derive(Debug, Clone)]
pub(crate) struct StubLookup {
    answer: Result<QueryResult, LookupError>,
    calls: Arc<Mutex<Vec<(String, QueryOptions)>>>,
}

impl StubLookup {
    pub(crate) fn ok(result: QueryResult) -> Self {
        Self {
            answer: Ok(result),
            calls: Arc::default(),
        }
    }

    pub(crate) fn err(error: LookupError) -> Self {
        Self {
            answer: Err(error),
            calls: Arc::default(),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, QueryOptions)> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CedulaLookup for StubLookup {
    async fn query(
        &self,
        codigo: &str,
        options: QueryOptions,
    ) -> Result<QueryResult, LookupError> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((codigo.to_string(), options));
        self.answer.clone()
    }
}

/// Lookup fake that never answers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HangingLookup;

#[async_trait]
impl CedulaLookup for HangingLookup {
    async fn query(
        &self,
        _codigo: &str,
        _options: QueryOptions,
    ) -> Result<QueryResult, LookupError> {
        std::future::pending().await
    }
}
