//! Read-only snapshot stores for sales order documents
//!
//! The forecasting engine treats the record store as an opaque collaborator:
//! one blocking `fetch_all` per request, no writes, no retries. A fetch
//! failure is terminal for the request that issued it. The shipped backends
//! serve a snapshot file (JSON array or CSV export of the `sales_orders`
//! collection) or an in-memory document set for tests.

use crate::RawSalesDoc;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the snapshot file served by [`FileStore`].
pub const STORE_PATH_VAR: &str = "SALES_STORE_PATH";

/// Errors raised by record stores and their configuration.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The snapshot could not be read at all; fatal for the current request
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// The snapshot was readable but not decodable
    #[error("Malformed snapshot: {0}")]
    Malformed(String),

    /// Required store configuration is absent; fatal at startup
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),
}

/// Read-only access to a snapshot of the sales order collection.
///
/// Implementations return documents in ascending date order where the
/// backend can provide it cheaply; the normalizer re-sorts regardless, so
/// order here is a courtesy, not a contract.
pub trait SalesRecordStore: Send + Sync {
    /// Fetch every document in the snapshot.
    fn fetch_all(&self) -> Result<Vec<RawSalesDoc>, StoreError>;
}

/// Store connection settings resolved once at process startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the snapshot file to serve
    pub snapshot_path: PathBuf,
}

impl StoreConfig {
    /// Resolve the store configuration from the environment.
    ///
    /// A missing `SALES_STORE_PATH` is a startup-fatal condition: the caller
    /// is expected to abort before serving any request.
    pub fn from_env() -> Result<Self, StoreError> {
        let path = env::var(STORE_PATH_VAR).map_err(|_| {
            StoreError::ConfigurationMissing(format!("{STORE_PATH_VAR} env var is not set"))
        })?;

        Ok(Self {
            snapshot_path: PathBuf::from(path),
        })
    }
}

/// File-backed store serving a JSON array or CSV snapshot.
///
/// The format is picked by file extension: `.csv` parses as a headed CSV
/// export, anything else as a JSON array of documents.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

/// Row shape of a CSV snapshot export.
///
/// CSV has no native numbers, so the numeric columns come in as strings and
/// are handed to the normalizer untouched.
#[derive(Debug, Deserialize)]
struct CsvSalesRow {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    total_php: Option<String>,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl From<CsvSalesRow> for RawSalesDoc {
    fn from(row: CsvSalesRow) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        RawSalesDoc {
            date: non_empty(row.date),
            total_php: non_empty(row.total_php).map(serde_json::Value::String),
            quantity: non_empty(row.quantity).map(serde_json::Value::String),
            category: non_empty(row.category),
        }
    }
}

impl FileStore {
    /// Create a store serving the given snapshot file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Create a store from resolved configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.snapshot_path.clone())
    }

    fn open(&self) -> Result<File, StoreError> {
        File::open(&self.path).map_err(|e| {
            StoreError::Unavailable(format!("cannot open {}: {}", self.path.display(), e))
        })
    }

    fn fetch_json(&self) -> Result<Vec<RawSalesDoc>, StoreError> {
        let reader = BufReader::new(self.open()?);
        serde_json::from_reader(reader).map_err(|e| {
            StoreError::Malformed(format!("invalid JSON in {}: {}", self.path.display(), e))
        })
    }

    fn fetch_csv(&self) -> Result<Vec<RawSalesDoc>, StoreError> {
        let mut reader = csv::Reader::from_reader(BufReader::new(self.open()?));
        let mut docs = Vec::new();

        for row in reader.deserialize::<CsvSalesRow>() {
            let row = row.map_err(|e| {
                StoreError::Malformed(format!("invalid CSV in {}: {}", self.path.display(), e))
            })?;
            docs.push(RawSalesDoc::from(row));
        }

        Ok(docs)
    }

    fn is_csv(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
    }
}

impl SalesRecordStore for FileStore {
    fn fetch_all(&self) -> Result<Vec<RawSalesDoc>, StoreError> {
        let docs = if Self::is_csv(&self.path) {
            self.fetch_csv()?
        } else {
            self.fetch_json()?
        };

        tracing::debug!(count = docs.len(), path = %self.path.display(), "fetched sales snapshot");
        Ok(docs)
    }
}

/// In-memory store for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Vec<RawSalesDoc>,
}

impl MemoryStore {
    /// Create a store serving a fixed document set.
    pub fn new(docs: Vec<RawSalesDoc>) -> Self {
        Self { docs }
    }
}

impl SalesRecordStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<RawSalesDoc>, StoreError> {
        Ok(self.docs.clone())
    }
}
