//! # Sales Data
//!
//! `sales_data` holds the shared data model for the seasonal sales
//! forecasting service: the raw order documents as they come out of the
//! record store, the canonical [`SalesRecord`] the forecasting engine works
//! with, and read-only snapshot stores that supply the documents.
//!
//! Raw documents are deliberately loose — every field is optional and numeric
//! fields may arrive as JSON numbers or numeric strings. Validation and
//! coercion are the job of the normalizer in the `seasonal_forecast` crate,
//! not of this crate, so the same rules apply no matter which store backend
//! produced the document.
//!
//! ## Usage Example
//!
//! ```no_run
//! use sales_data::{FileStore, SalesRecordStore, StoreConfig};
//!
//! // Resolve the snapshot path from the environment (startup-fatal if unset)
//! let config = StoreConfig::from_env()?;
//! let store = FileStore::from_config(&config);
//!
//! // One read-only snapshot per forecast request
//! let docs = store.fetch_all()?;
//! println!("fetched {} sales orders", docs.len());
//! # Ok::<(), sales_data::StoreError>(())
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Snapshot-backed record stores
pub mod store;
// Helpers for building document sets in tests and demos
pub mod utils;

pub use store::{FileStore, MemoryStore, SalesRecordStore, StoreConfig, StoreError};

/// Raw sales order document as fetched from the record store.
///
/// Mirrors the wire shape of a `sales_orders` document. Everything is
/// optional here; documents missing required fields are dropped by the
/// normalizer, never by the store. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSalesDoc {
    /// Calendar date of the sale, expected as "YYYY-MM-DD"
    #[serde(default)]
    pub date: Option<String>,
    /// Sale total in PHP; a JSON number or a numeric string
    #[serde(default)]
    pub total_php: Option<serde_json::Value>,
    /// Units sold; a JSON number or a numeric string
    #[serde(default)]
    pub quantity: Option<serde_json::Value>,
    /// Product category
    #[serde(default)]
    pub category: Option<String>,
}

impl RawSalesDoc {
    /// Convenience constructor for the minimal document shape (date + amount).
    pub fn new(date: &str, total_php: f64) -> Self {
        Self {
            date: Some(date.to_string()),
            total_php: Some(serde_json::json!(total_php)),
            quantity: None,
            category: None,
        }
    }

    /// Convenience constructor for the full document shape.
    pub fn with_category(date: &str, total_php: f64, quantity: u64, category: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            total_php: Some(serde_json::json!(total_php)),
            quantity: Some(serde_json::json!(quantity)),
            category: Some(category.to_string()),
        }
    }
}

/// Canonical sales record produced by the normalizer.
///
/// Immutable once constructed; the forecasting engine only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Date of the sale
    pub date: NaiveDate,
    /// Sale amount, non-negative
    pub amount: f64,
    /// Units sold (zero when the product did not request quantities)
    pub quantity: u64,
    /// Product category, when the product requested one
    pub category: Option<String>,
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
