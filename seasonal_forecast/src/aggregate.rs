//! Aggregation of sales records into time buckets
//!
//! Buckets partition the normalized record set exactly: every record lands in
//! one bucket and empty buckets are never constructed. Accumulation goes
//! through an ordered map, so the reported sequence is sorted by
//! (period, category) and independent of input record order.

use chrono::{Datelike, NaiveDate};
use sales_data::SalesRecord;
use std::collections::BTreeMap;

/// Time granularity for bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One bucket per calendar day
    Day,
    /// One bucket per calendar month, keyed by year and month
    Month,
}

/// One aggregated (period, category) accumulation of amount and quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Start of the period: the day itself, or the first of the month
    pub period: NaiveDate,
    /// Category this bucket belongs to, when grouping by category
    pub category: Option<String>,
    /// Sum of record amounts in the period
    pub amount_sum: f64,
    /// Sum of record quantities in the period
    pub quantity_sum: u64,
}

/// Truncate a date to the start of its period.
pub fn floor_period(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Month => date.with_day(1).unwrap_or(date),
    }
}

/// Group records by `(floor(date, granularity), category?)` and sum amounts
/// and quantities per group.
///
/// With `by_category` false all records share one group per period and the
/// buckets carry no category. Empty input yields an empty vector.
pub fn aggregate<'a, I>(records: I, granularity: Granularity, by_category: bool) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut groups: BTreeMap<(NaiveDate, Option<String>), (f64, u64)> = BTreeMap::new();

    for record in records {
        let period = floor_period(record.date, granularity);
        let category = if by_category {
            record.category.clone()
        } else {
            None
        };

        let entry = groups.entry((period, category)).or_insert((0.0, 0));
        entry.0 += record.amount;
        entry.1 += record.quantity;
    }

    groups
        .into_iter()
        .map(|((period, category), (amount_sum, quantity_sum))| Bucket {
            period,
            category,
            amount_sum,
            quantity_sum,
        })
        .collect()
}

/// Whole days elapsed from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Whole calendar months elapsed from `from` to `to`, ignoring days.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month() as i32 - from.month() as i32)
}
