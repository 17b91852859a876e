//! Record normalization: raw store documents to canonical sales records
//!
//! All field validation and numeric coercion for the whole pipeline happens
//! here, once, so no forecast product ever re-validates documents on its own.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use sales_data::{RawSalesDoc, SalesRecord};
use serde_json::Value;

/// Which fields a forecast product requires from each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMode {
    /// Only `date` and `total_php` are required
    #[default]
    SalesOnly,
    /// `quantity` and `category` are required as well
    WithCategory,
}

/// Normalize raw documents into sales records sorted ascending by date.
///
/// Documents that fail validation are skipped silently (the skip count is
/// logged, never surfaced). An empty surviving set is an
/// [`InsufficientData`](ForecastError::InsufficientData) condition rather
/// than an empty result.
pub fn normalize(docs: &[RawSalesDoc], mode: NormalizeMode) -> Result<Vec<SalesRecord>> {
    let mut records = Vec::with_capacity(docs.len());
    let mut skipped = 0usize;

    for doc in docs {
        match normalize_doc(doc, mode) {
            Ok(record) => records.push(record),
            Err(ForecastError::MalformedRecord(reason)) => {
                skipped += 1;
                tracing::debug!(%reason, "skipping malformed sales document");
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        tracing::warn!(
            skipped,
            kept = records.len(),
            "dropped malformed sales documents"
        );
    }

    if records.is_empty() {
        return Err(ForecastError::InsufficientData(
            "no usable sales records after normalization".to_string(),
        ));
    }

    // Stable sort: documents on the same date keep store order.
    records.sort_by_key(|r| r.date);

    Ok(records)
}

/// Normalize one document. An error here means "skip this document".
fn normalize_doc(doc: &RawSalesDoc, mode: NormalizeMode) -> Result<SalesRecord> {
    let date_str = doc
        .date
        .as_deref()
        .ok_or_else(|| malformed("missing date"))?;
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| malformed(&format!("unparsable date '{date_str}'")))?;

    let amount = doc
        .total_php
        .as_ref()
        .ok_or_else(|| malformed("missing total_php"))
        .and_then(|v| coerce_f64(v, "total_php"))?;
    if amount < 0.0 {
        return Err(malformed("negative total_php"));
    }

    let (quantity, category) = match mode {
        NormalizeMode::SalesOnly => {
            // Optional in this mode; keep what is present, default the rest.
            let quantity = match doc.quantity.as_ref() {
                Some(v) => coerce_u64(v, "quantity").unwrap_or(0),
                None => 0,
            };
            (quantity, doc.category.clone())
        }
        NormalizeMode::WithCategory => {
            let quantity = doc
                .quantity
                .as_ref()
                .ok_or_else(|| malformed("missing quantity"))
                .and_then(|v| coerce_u64(v, "quantity"))?;
            let category = doc
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| malformed("missing category"))?
                .to_string();
            (quantity, Some(category))
        }
    };

    Ok(SalesRecord {
        date,
        amount,
        quantity,
        category,
    })
}

fn malformed(reason: &str) -> ForecastError {
    ForecastError::MalformedRecord(reason.to_string())
}

/// Coerce a JSON number or numeric string into an `f64`.
fn coerce_f64(value: &Value, field: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| malformed(&format!("non-numeric {field}"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(&format!("non-numeric {field} '{s}'"))),
        _ => Err(malformed(&format!("non-numeric {field}"))),
    }
}

/// Coerce a JSON number or numeric string into a non-negative integer.
fn coerce_u64(value: &Value, field: &str) -> Result<u64> {
    let n = coerce_f64(value, field)?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(malformed(&format!("{field} is not a non-negative integer")));
    }
    Ok(n as u64)
}
