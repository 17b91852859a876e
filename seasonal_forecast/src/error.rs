//! Error types for the seasonal_forecast crate

use sales_data::StoreError;
use thiserror::Error;

/// Custom error types for the seasonal_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Fewer than two usable points in a segment. Recovered locally by the
    /// orchestrator as an `error` placeholder in that segment's result.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A single document failed normalization. The normalizer skips these;
    /// the variant never escapes a forecast product.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The record store failed; fatal for the current request.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
