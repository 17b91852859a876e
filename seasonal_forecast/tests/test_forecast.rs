use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_data::SalesRecord;
use seasonal_forecast::forecast::{
    category_trends, monthly_breakdown, overall_summary, sales_history, season_summary,
    unit_forecast, ForecastOptions, NOT_ENOUGH_DATA,
};
use seasonal_forecast::{Season, Trend, TrendBaseline};

fn record(date: &str, amount: f64) -> SalesRecord {
    SalesRecord {
        date: date.parse().unwrap(),
        amount,
        quantity: 0,
        category: None,
    }
}

fn cat_record(date: &str, amount: f64, quantity: u64, category: &str) -> SalesRecord {
    SalesRecord {
        date: date.parse().unwrap(),
        amount,
        quantity,
        category: Some(category.to_string()),
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn options() -> ForecastOptions {
    ForecastOptions::default()
}

#[test]
fn dry_season_summary_extends_a_rising_trend() {
    // Both records fall in Dry months; slope is positive.
    let records = vec![record("2024-01-05", 100.0), record("2024-02-10", 150.0)];

    let summary = season_summary(&records, Season::Dry, &options());

    assert_eq!(summary.label, "Dry Season");
    assert_eq!(summary.error, None);
    assert!(summary.forecast_sales.unwrap() > 150.0);
    assert_eq!(summary.trend, Some(Trend::Increasing));
}

#[test]
fn seasonal_scale_applies_to_seasonal_summaries_only() {
    let records = vec![record("2024-01-05", 100.0), record("2024-02-10", 150.0)];

    let mut opts = options();
    opts.seasonal_scale = 1.0;
    let unscaled = season_summary(&records, Season::Dry, &opts);

    opts.seasonal_scale = 1.5;
    let scaled = season_summary(&records, Season::Dry, &opts);

    assert_approx_eq!(
        scaled.forecast_sales.unwrap(),
        (unscaled.forecast_sales.unwrap() * 1.5 * 100.0).round() / 100.0,
        0.02
    );

    // The overall summary never applies the seasonal uplift.
    let overall_a = overall_summary(&records, "Next Month", &opts);
    opts.seasonal_scale = 3.0;
    let overall_b = overall_summary(&records, "Next Month", &opts);
    assert_eq!(overall_a.forecast_sales, overall_b.forecast_sales);
}

#[test]
fn empty_season_segment_degrades_to_error() {
    // Dry-only data: the Rainy summary reports the placeholder instead.
    let records = vec![record("2024-01-05", 100.0), record("2024-02-10", 150.0)];

    let summary = season_summary(&records, Season::Rainy, &options());

    assert_eq!(summary.label, "Rainy Season");
    assert_eq!(summary.forecast_sales, None);
    assert_eq!(summary.trend, None);
    assert_eq!(summary.error.as_deref(), Some(NOT_ENOUGH_DATA));
}

#[test]
fn single_bucket_segment_degrades_to_error() {
    // Two records on the same day collapse into one bucket.
    let records = vec![record("2024-01-05", 100.0), record("2024-01-05", 150.0)];

    let summary = overall_summary(&records, "Next Month", &options());
    assert_eq!(summary.error.as_deref(), Some(NOT_ENOUGH_DATA));
}

#[test]
fn declining_trend_floors_at_zero_and_reads_decreasing() {
    let records = vec![
        record("2024-01-01", 100.0),
        record("2024-01-02", 50.0),
        record("2024-01-03", 10.0),
    ];

    let summary = overall_summary(&records, "Next Month", &options());

    assert_eq!(summary.forecast_sales, Some(0.0));
    assert_eq!(summary.trend, Some(Trend::Decreasing));
}

#[test]
fn summary_baseline_is_configurable() {
    // Prediction lands between the last actual and the historical total.
    let records = vec![
        record("2024-01-01", 100.0),
        record("2024-01-31", 101.0),
        record("2024-03-01", 102.0),
    ];

    let mut opts = options();
    opts.summary_baseline = TrendBaseline::LastActual;
    let vs_last = overall_summary(&records, "Next Month", &opts);
    assert_eq!(vs_last.trend, Some(Trend::Increasing));

    opts.summary_baseline = TrendBaseline::HistoricalTotal;
    let vs_total = overall_summary(&records, "Next Month", &opts);
    assert_eq!(vs_total.trend, Some(Trend::Decreasing));
}

#[test]
fn monthly_breakdown_marks_thin_months_null() {
    // January has two years of history; every other Dry month has one.
    let records = vec![
        record("2023-01-15", 100.0),
        record("2024-01-20", 200.0),
        record("2024-02-10", 80.0),
        record("2024-03-05", 90.0),
    ];
    let today = date("2024-07-01");

    let points = monthly_breakdown(&records, Season::Dry, today);

    assert_eq!(points.len(), 6);
    assert_eq!(points[0].date, "2024-12-01");
    assert_eq!(points[0].forecast_sales, None);

    // January 2025 is year offset 2 on the 2023/2024 axis: 100 + 100*2.
    assert_eq!(points[1].date, "2025-01-01");
    assert_eq!(points[1].forecast_sales, Some(300.0));

    for point in &points[2..] {
        assert_eq!(point.forecast_sales, None);
    }
}

#[test]
fn monthly_breakdown_dates_follow_the_upcoming_window() {
    let records = vec![record("2024-06-10", 100.0), record("2024-07-10", 120.0)];
    let today = date("2024-02-01");

    let points = monthly_breakdown(&records, Season::Rainy, today);

    let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(
        dates,
        vec![
            "2024-06-01",
            "2024-07-01",
            "2024-08-01",
            "2024-09-01",
            "2024-10-01",
            "2024-11-01"
        ]
    );
}

#[test]
fn category_trends_isolate_failures() {
    // Umbrella has two monthly buckets, Raincoat only one.
    let records = vec![
        cat_record("2024-01-05", 100.0, 5, "Umbrella"),
        cat_record("2024-02-10", 120.0, 7, "Umbrella"),
        cat_record("2024-03-01", 60.0, 3, "Raincoat"),
    ];
    let today = date("2024-07-01");

    let trends = category_trends(&records, today, &options());

    // Only Dry-season categories exist here.
    assert_eq!(trends.len(), 2);

    let raincoat = trends.iter().find(|t| t.category == "Raincoat").unwrap();
    assert_eq!(raincoat.season, Season::Dry);
    assert_eq!(raincoat.error.as_deref(), Some(NOT_ENOUGH_DATA));
    assert_eq!(raincoat.forecast_quantity, None);

    let umbrella = trends.iter().find(|t| t.category == "Umbrella").unwrap();
    assert_eq!(umbrella.error, None);
    assert_eq!(umbrella.historical_quantity, Some(12));
    assert_eq!(umbrella.dates, vec!["2024-01-01", "2024-02-01"]);
    assert_eq!(umbrella.quantities, vec![5, 7]);
    assert!(umbrella.forecast_quantity.unwrap() > 0);
}

#[test]
fn category_forecast_sums_the_upcoming_window() {
    // Quantity grows 2/month from January 2024: q(i) = 5 + 2i.
    let records = vec![
        cat_record("2024-01-05", 100.0, 5, "Umbrella"),
        cat_record("2024-02-10", 120.0, 7, "Umbrella"),
    ];
    let today = date("2024-07-01");

    let trends = category_trends(&records, today, &options());
    let umbrella = &trends[0];

    // Upcoming Dry window is Dec 2024 - May 2025: month indices 11..=16,
    // so the window total is sum of 5 + 2i for i in 11..=16 = 192.
    assert_eq!(umbrella.forecast_quantity, Some(192));
    assert_eq!(umbrella.trend, Some(Trend::Increasing));
}

#[test]
fn unit_forecast_follows_daily_quantities() {
    let records = vec![
        cat_record("2024-01-01", 10.0, 2, "Umbrella"),
        cat_record("2024-01-02", 10.0, 4, "Umbrella"),
        cat_record("2024-01-03", 10.0, 6, "Umbrella"),
    ];

    let units = unit_forecast(&records, &options());

    assert_eq!(units.label, "Next Month Units");
    assert_eq!(units.error, None);
    // Slope 2/day from quantity 2: predict(2 + 30) = 66.
    assert_eq!(units.forecast_quantity, Some(66));
    assert_eq!(units.trend, Some(Trend::Increasing));
}

#[test]
fn unit_forecast_degrades_on_single_day() {
    let records = vec![cat_record("2024-01-01", 10.0, 2, "Umbrella")];

    let units = unit_forecast(&records, &options());
    assert_eq!(units.error.as_deref(), Some(NOT_ENOUGH_DATA));
}

#[test]
fn history_preserves_record_order_and_values() {
    let records = vec![
        record("2024-01-05", 100.0),
        record("2024-01-05", 50.0),
        record("2024-02-10", 150.0),
    ];

    let history = sales_history(&records);

    assert_eq!(history.dates, vec!["2024-01-05", "2024-01-05", "2024-02-10"]);
    assert_eq!(history.sales, vec![100.0, 50.0, 150.0]);
}
