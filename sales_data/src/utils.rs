//! Utility helpers for building sales document sets
//!
//! Used by tests, demos and the integration suite to produce deterministic
//! snapshots without hand-writing JSON.

use crate::RawSalesDoc;
use chrono::{Days, NaiveDate};

/// Generate an evenly spaced run of sales documents for testing.
///
/// Produces `num_docs` documents starting at `start`, one every `step_days`
/// days, with the amount growing linearly by `daily_growth` per document.
///
/// # Arguments
/// * `start` - Date of the first document
/// * `num_docs` - Number of documents to generate
/// * `step_days` - Gap between consecutive documents in days
/// * `base_amount` - Amount of the first document
/// * `growth` - Amount added per subsequent document
pub fn generate_sales_docs(
    start: NaiveDate,
    num_docs: usize,
    step_days: u64,
    base_amount: f64,
    growth: f64,
) -> Vec<RawSalesDoc> {
    (0..num_docs)
        .map(|i| {
            let date = start
                .checked_add_days(Days::new(i as u64 * step_days))
                .unwrap_or(start);
            RawSalesDoc::new(
                &date.format("%Y-%m-%d").to_string(),
                base_amount + growth * i as f64,
            )
        })
        .collect()
}

/// Generate categorised documents cycling through the given categories.
///
/// Quantity grows linearly per document so category trends are predictable
/// in tests.
pub fn generate_category_docs(
    start: NaiveDate,
    num_docs: usize,
    step_days: u64,
    categories: &[&str],
) -> Vec<RawSalesDoc> {
    (0..num_docs)
        .map(|i| {
            let date = start
                .checked_add_days(Days::new(i as u64 * step_days))
                .unwrap_or(start);
            let category = categories[i % categories.len().max(1)];
            RawSalesDoc::with_category(
                &date.format("%Y-%m-%d").to_string(),
                100.0 + 10.0 * i as f64,
                5 + i as u64,
                category,
            )
        })
        .collect()
}
