use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_data::{utils, FileStore, MemoryStore, RawSalesDoc};
use seasonal_forecast::{ForecastError, Forecaster, Trend};
use std::io::Write;
use std::sync::Arc;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn dry_season_forecast_end_to_end() {
    // Two Dry-season observations with a rising trend.
    let store = MemoryStore::new(vec![
        RawSalesDoc::new("2024-01-05", 100.0),
        RawSalesDoc::new("2024-02-10", 150.0),
    ]);
    let forecaster = Forecaster::new(Arc::new(store));

    let overview = forecaster.overview(date("2024-07-01")).unwrap();

    assert_eq!(overview.forecast_data.len(), 3);

    let dry = &overview.forecast_data[0];
    assert_eq!(dry.label, "Dry Season");
    assert!(dry.forecast_sales.unwrap() > 150.0);
    assert_eq!(dry.trend, Some(Trend::Increasing));

    // No Rainy data: that product degrades without aborting the others.
    let rainy = &overview.forecast_data[1];
    assert_eq!(rainy.label, "Rainy Season");
    assert!(rainy.error.is_some());

    let next_month = &overview.forecast_data[2];
    assert_eq!(next_month.label, "Next Month");
    assert!(next_month.forecast_sales.is_some());

    assert_eq!(
        overview.historical_data.dates,
        vec!["2024-01-05", "2024-02-10"]
    );
    assert_eq!(overview.monthly_breakdown.dry.len(), 6);
    assert_eq!(overview.monthly_breakdown.rainy.len(), 6);
}

#[test]
fn repeated_runs_serialize_byte_identically() {
    let docs = utils::generate_sales_docs(date("2023-06-01"), 40, 7, 100.0, 3.5);
    let forecaster = Forecaster::new(Arc::new(MemoryStore::new(docs)));
    let today = date("2024-07-01");

    let first = serde_json::to_string(&forecaster.overview(today).unwrap()).unwrap();
    let second = serde_json::to_string(&forecaster.overview(today).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn malformed_documents_do_not_poison_the_snapshot() {
    let store = MemoryStore::new(vec![
        RawSalesDoc::new("2024-01-05", 100.0),
        RawSalesDoc::new("garbage", 1.0),
        RawSalesDoc::default(),
        RawSalesDoc::new("2024-02-10", 150.0),
    ]);
    let forecaster = Forecaster::new(Arc::new(store));

    let overview = forecaster.overview(date("2024-07-01")).unwrap();
    assert_eq!(overview.historical_data.dates.len(), 2);
}

#[test]
fn category_products_come_from_the_same_snapshot() {
    let docs = utils::generate_category_docs(date("2024-01-01"), 8, 20, &["Umbrella", "Boots"]);
    let forecaster = Forecaster::new(Arc::new(MemoryStore::new(docs)));

    let trends = forecaster.category_overview(date("2024-07-01")).unwrap();

    assert!(!trends.is_empty());
    for trend in &trends {
        assert!(trend.error.is_some() || trend.forecast_quantity.is_some());
    }
}

#[test]
fn unit_overview_reports_whole_units() {
    let store = MemoryStore::new(vec![
        RawSalesDoc::with_category("2024-01-01", 10.0, 2, "Umbrella"),
        RawSalesDoc::with_category("2024-01-02", 10.0, 4, "Umbrella"),
        RawSalesDoc::with_category("2024-01-03", 10.0, 6, "Umbrella"),
    ]);
    let forecaster = Forecaster::new(Arc::new(store));

    let units = forecaster.unit_overview().unwrap();
    assert_eq!(units.forecast_quantity, Some(66));
}

#[test]
fn store_failure_is_terminal_for_the_request() {
    let store = FileStore::new("/nonexistent/sales_orders.json");
    let forecaster = Forecaster::new(Arc::new(store));

    let err = forecaster.overview(date("2024-07-01")).unwrap_err();
    assert!(matches!(err, ForecastError::Store(_)));
}

#[test]
fn empty_store_is_insufficient_data() {
    let forecaster = Forecaster::new(Arc::new(MemoryStore::default()));

    let err = forecaster.overview(date("2024-07-01")).unwrap_err();
    assert!(matches!(err, ForecastError::InsufficientData(_)));
}

#[test]
fn file_backed_snapshot_matches_memory_store() {
    let docs = vec![
        RawSalesDoc::new("2024-01-05", 100.0),
        RawSalesDoc::new("2024-02-10", 150.0),
        RawSalesDoc::new("2024-06-15", 80.0),
    ];

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{}", serde_json::to_string(&docs).unwrap()).unwrap();
    file.flush().unwrap();

    let today = date("2024-07-01");
    let from_file = Forecaster::new(Arc::new(FileStore::new(file.path())))
        .overview(today)
        .unwrap();
    let from_memory = Forecaster::new(Arc::new(MemoryStore::new(docs)))
        .overview(today)
        .unwrap();

    assert_eq!(
        serde_json::to_string(&from_file).unwrap(),
        serde_json::to_string(&from_memory).unwrap()
    );
}
