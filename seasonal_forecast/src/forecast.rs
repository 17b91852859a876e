//! Forecast orchestration
//!
//! Composes normalization, aggregation, the season calendar and the trend
//! model into the named forecast products the delivery layer serializes:
//! season and next-month summaries, per-category trends, monthly breakdowns
//! across an upcoming season window, and the unit forecast.
//!
//! Products degrade independently: a segment with too little history becomes
//! an error placeholder in that product and never aborts its siblings. Store
//! failures, by contrast, are terminal for the whole request.

use crate::aggregate::{aggregate, days_between, months_between, Bucket, Granularity};
use crate::error::Result;
use crate::models::FittedLinearTrend;
use crate::normalize::{normalize, NormalizeMode};
use crate::season::{Season, SeasonWindow};
use crate::trend::{Trend, TrendBaseline};
use chrono::{Datelike, NaiveDate};
use sales_data::{SalesRecord, SalesRecordStore};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Error placeholder text for segments with fewer than two usable points.
pub const NOT_ENOUGH_DATA: &str = "Not enough data.";

/// Tunable knobs of the forecast products.
#[derive(Debug, Clone)]
pub struct ForecastOptions {
    /// Days past the last observation at which summaries predict
    pub horizon_days: i64,
    /// Uplift applied to seasonal summary predictions before rounding
    pub seasonal_scale: f64,
    /// Baseline the season/next-month summaries classify against
    pub summary_baseline: TrendBaseline,
    /// Baseline the category trends classify against
    pub category_baseline: TrendBaseline,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            seasonal_scale: 1.5,
            summary_baseline: TrendBaseline::LastActual,
            category_baseline: TrendBaseline::HistoricalTotal,
        }
    }
}

/// Historical series embedded in the overview for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesHistory {
    /// Record dates, "YYYY-MM-DD", ascending
    pub dates: Vec<String>,
    /// Record amounts, aligned with `dates`
    pub sales: Vec<f64>,
}

/// One summary forecast: a season, or the overall next-month product.
///
/// Exactly one of (`forecast_sales` + `trend`) or `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    /// Product label, e.g. "Dry Season"
    pub label: String,
    /// Predicted sales, rounded to two decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_sales: Option<f64>,
    /// Trend label against the product's baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Error placeholder when the segment has too little history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SeasonSummary {
    fn ok(label: &str, forecast_sales: f64, trend: Trend) -> Self {
        Self {
            label: label.to_string(),
            forecast_sales: Some(forecast_sales),
            trend: Some(trend),
            error: None,
        }
    }

    fn insufficient(label: &str) -> Self {
        Self {
            label: label.to_string(),
            forecast_sales: None,
            trend: None,
            error: Some(NOT_ENOUGH_DATA.to_string()),
        }
    }
}

/// One month of the seasonal breakdown. A `null` forecast marks a calendar
/// month with no usable history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// First day of the month, "YYYY-MM-DD"
    pub date: String,
    /// Predicted sales for the month, or `null`
    pub forecast_sales: Option<f64>,
}

/// Monthly breakdowns for the two upcoming season windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalBreakdown {
    /// Upcoming Dry window, December through May
    pub dry: Vec<MonthlyPoint>,
    /// Upcoming Rainy window, June through November
    pub rainy: Vec<MonthlyPoint>,
}

/// Quantity trend for one category within one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTrend {
    /// Product category
    pub category: String,
    /// Season the trend covers
    pub season: Season,
    /// Total units sold across the segment's history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_quantity: Option<u64>,
    /// Units predicted across the upcoming season window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_quantity: Option<u64>,
    /// Trend label against the category baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Historical bucket dates for charting
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<String>,
    /// Historical bucket quantities, aligned with `dates`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quantities: Vec<u64>,
    /// Error placeholder when the segment has too little history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Overall unit (quantity) forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitForecast {
    /// Product label
    pub label: String,
    /// Predicted units, whole number, floored at zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_quantity: Option<u64>,
    /// Trend label against the last actual daily quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Error placeholder when there is too little history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload of the main forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOverview {
    /// Raw historical series for charting
    pub historical_data: SalesHistory,
    /// Dry season, Rainy season and next-month summaries, in that order
    pub forecast_data: Vec<SeasonSummary>,
    /// Per-month forecasts across the upcoming season windows
    pub monthly_breakdown: SeasonalBreakdown,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Historical series of the normalized record set, one entry per record.
pub fn sales_history(records: &[SalesRecord]) -> SalesHistory {
    SalesHistory {
        dates: records.iter().map(|r| format_date(r.date)).collect(),
        sales: records.iter().map(|r| r.amount).collect(),
    }
}

/// Summary forecast over one season's records.
pub fn season_summary(
    records: &[SalesRecord],
    season: Season,
    options: &ForecastOptions,
) -> SeasonSummary {
    let segment = records
        .iter()
        .filter(|r| Season::of_date(r.date) == season);
    summary_over(segment, season.label(), options.seasonal_scale, options)
}

/// Summary forecast over all records, labelled as the next-month product.
pub fn overall_summary(
    records: &[SalesRecord],
    label: &str,
    options: &ForecastOptions,
) -> SeasonSummary {
    summary_over(records.iter(), label, 1.0, options)
}

fn summary_over<'a, I>(records: I, label: &str, scale: f64, options: &ForecastOptions) -> SeasonSummary
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let buckets = aggregate(records, Granularity::Day, false);
    let first_period = match buckets.first() {
        Some(bucket) => bucket.period,
        None => return SeasonSummary::insufficient(label),
    };

    let points: Vec<(i64, f64)> = buckets
        .iter()
        .map(|b| (days_between(first_period, b.period), b.amount_sum))
        .collect();

    let line = match FittedLinearTrend::fit(&points) {
        Ok(line) => line,
        Err(_) => return SeasonSummary::insufficient(label),
    };

    let predicted = (line.predict(line.domain_max() + options.horizon_days) * scale).max(0.0);
    let baseline = match options.summary_baseline {
        TrendBaseline::LastActual => buckets.last().map(|b| b.amount_sum).unwrap_or(0.0),
        TrendBaseline::HistoricalTotal => buckets.iter().map(|b| b.amount_sum).sum(),
    };

    SeasonSummary::ok(label, round2(predicted), Trend::classify(predicted, baseline))
}

/// Per-month forecasts across the upcoming window of `season`.
///
/// Each window month gets its own regression across the historical monthly
/// buckets sharing that calendar month, with the year offset as predictor.
/// Months with fewer than two such buckets yield a `null` forecast.
pub fn monthly_breakdown(
    records: &[SalesRecord],
    season: Season,
    today: NaiveDate,
) -> Vec<MonthlyPoint> {
    let window = season.next_window(today);
    let buckets = aggregate(records.iter(), Granularity::Month, false);

    window
        .month_starts()
        .into_iter()
        .map(|month_start| {
            let same_month: Vec<&Bucket> = buckets
                .iter()
                .filter(|b| b.period.month() == month_start.month())
                .collect();
            let date = format_date(month_start);

            let first_year = match same_month.first() {
                Some(bucket) => bucket.period.year(),
                None => return MonthlyPoint { date, forecast_sales: None },
            };

            let points: Vec<(i64, f64)> = same_month
                .iter()
                .map(|b| (i64::from(b.period.year() - first_year), b.amount_sum))
                .collect();

            let forecast_sales = FittedLinearTrend::fit(&points).ok().map(|line| {
                let target = i64::from(month_start.year() - first_year);
                round2(line.predict(target).max(0.0))
            });

            MonthlyPoint {
                date,
                forecast_sales,
            }
        })
        .collect()
}

/// Quantity trends per (season, category) pair.
///
/// A category with too little history yields an error entry without
/// affecting its siblings.
pub fn category_trends(
    records: &[SalesRecord],
    today: NaiveDate,
    options: &ForecastOptions,
) -> Vec<CategoryTrend> {
    let mut results = Vec::new();

    for season in [Season::Dry, Season::Rainy] {
        let segment = records
            .iter()
            .filter(|r| Season::of_date(r.date) == season);
        let buckets = aggregate(segment, Granularity::Month, true);

        let mut by_category: BTreeMap<String, Vec<&Bucket>> = BTreeMap::new();
        for bucket in &buckets {
            if let Some(category) = &bucket.category {
                by_category.entry(category.clone()).or_default().push(bucket);
            }
        }

        let window = season.next_window(today);
        for (category, cat_buckets) in by_category {
            results.push(category_trend(category, season, &cat_buckets, &window, options));
        }
    }

    results
}

fn category_trend(
    category: String,
    season: Season,
    buckets: &[&Bucket],
    window: &SeasonWindow,
    options: &ForecastOptions,
) -> CategoryTrend {
    let insufficient = |category: String| CategoryTrend {
        category,
        season,
        historical_quantity: None,
        forecast_quantity: None,
        trend: None,
        dates: Vec::new(),
        quantities: Vec::new(),
        error: Some(NOT_ENOUGH_DATA.to_string()),
    };

    let first_period = match buckets.first() {
        Some(bucket) => bucket.period,
        None => return insufficient(category),
    };

    let points: Vec<(i64, f64)> = buckets
        .iter()
        .map(|b| (months_between(first_period, b.period), b.quantity_sum as f64))
        .collect();

    let line = match FittedLinearTrend::fit(&points) {
        Ok(line) => line,
        Err(_) => return insufficient(category),
    };

    let historical_quantity: u64 = buckets.iter().map(|b| b.quantity_sum).sum();

    // Month indices of the upcoming window continue the segment's own axis.
    let raw_forecast: f64 = window
        .month_starts()
        .into_iter()
        .map(|m| line.predict(months_between(first_period, m)).max(0.0))
        .sum();

    let baseline = match options.category_baseline {
        TrendBaseline::LastActual => buckets.last().map(|b| b.quantity_sum as f64).unwrap_or(0.0),
        TrendBaseline::HistoricalTotal => historical_quantity as f64,
    };

    CategoryTrend {
        category,
        season,
        historical_quantity: Some(historical_quantity),
        forecast_quantity: Some(raw_forecast.round() as u64),
        trend: Some(Trend::classify(raw_forecast, baseline)),
        dates: buckets.iter().map(|b| format_date(b.period)).collect(),
        quantities: buckets.iter().map(|b| b.quantity_sum).collect(),
        error: None,
    }
}

/// Overall quantity forecast at the summary horizon.
pub fn unit_forecast(records: &[SalesRecord], options: &ForecastOptions) -> UnitForecast {
    let label = "Next Month Units";
    let buckets = aggregate(records.iter(), Granularity::Day, false);

    let first_period = match buckets.first() {
        Some(bucket) => bucket.period,
        None => {
            return UnitForecast {
                label: label.to_string(),
                forecast_quantity: None,
                trend: None,
                error: Some(NOT_ENOUGH_DATA.to_string()),
            }
        }
    };

    let points: Vec<(i64, f64)> = buckets
        .iter()
        .map(|b| (days_between(first_period, b.period), b.quantity_sum as f64))
        .collect();

    match FittedLinearTrend::fit(&points) {
        Ok(line) => {
            let predicted = line.predict(line.domain_max() + options.horizon_days).max(0.0);
            let baseline = buckets.last().map(|b| b.quantity_sum as f64).unwrap_or(0.0);

            UnitForecast {
                label: label.to_string(),
                forecast_quantity: Some(predicted.round() as u64),
                trend: Some(Trend::classify(predicted, baseline)),
                error: None,
            }
        }
        Err(_) => UnitForecast {
            label: label.to_string(),
            forecast_quantity: None,
            trend: None,
            error: Some(NOT_ENOUGH_DATA.to_string()),
        },
    }
}

/// Orchestrator owning the read-only record store capability.
///
/// Every product method takes `today` explicitly, so output is a pure
/// function of (snapshot, today) and repeated runs over an unchanged
/// snapshot serialize byte-identically.
pub struct Forecaster {
    store: Arc<dyn SalesRecordStore>,
    options: ForecastOptions,
}

impl Forecaster {
    /// Create an orchestrator with default options.
    pub fn new(store: Arc<dyn SalesRecordStore>) -> Self {
        Self::with_options(store, ForecastOptions::default())
    }

    /// Create an orchestrator with explicit options.
    pub fn with_options(store: Arc<dyn SalesRecordStore>, options: ForecastOptions) -> Self {
        Self { store, options }
    }

    /// Fetch and normalize one snapshot of the record store.
    fn snapshot(&self, mode: NormalizeMode) -> Result<Vec<SalesRecord>> {
        let docs = self.store.fetch_all()?;
        normalize(&docs, mode)
    }

    /// The main forecast product: history, the three summaries and the
    /// monthly breakdowns for both upcoming season windows.
    pub fn overview(&self, today: NaiveDate) -> Result<ForecastOverview> {
        let records = self.snapshot(NormalizeMode::SalesOnly)?;

        Ok(ForecastOverview {
            historical_data: sales_history(&records),
            forecast_data: vec![
                season_summary(&records, Season::Dry, &self.options),
                season_summary(&records, Season::Rainy, &self.options),
                overall_summary(&records, "Next Month", &self.options),
            ],
            monthly_breakdown: SeasonalBreakdown {
                dry: monthly_breakdown(&records, Season::Dry, today),
                rainy: monthly_breakdown(&records, Season::Rainy, today),
            },
        })
    }

    /// Per-category quantity trends for both seasons.
    pub fn category_overview(&self, today: NaiveDate) -> Result<Vec<CategoryTrend>> {
        let records = self.snapshot(NormalizeMode::WithCategory)?;
        Ok(category_trends(&records, today, &self.options))
    }

    /// Overall unit forecast.
    pub fn unit_overview(&self) -> Result<UnitForecast> {
        let records = self.snapshot(NormalizeMode::SalesOnly)?;
        Ok(unit_forecast(&records, &self.options))
    }
}
