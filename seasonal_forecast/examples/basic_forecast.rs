//! Run the full forecasting pipeline against an in-memory snapshot and
//! print the resulting JSON products.

use chrono::NaiveDate;
use sales_data::{utils, MemoryStore};
use seasonal_forecast::Forecaster;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid date");

    // A year and a half of weekly sales with a gentle upward trend.
    let docs = utils::generate_sales_docs(start, 80, 7, 250.0, 4.0);
    let forecaster = Forecaster::new(Arc::new(MemoryStore::new(docs)));

    let today = NaiveDate::from_ymd_opt(2024, 12, 15).expect("valid date");
    let overview = forecaster.overview(today)?;

    println!("{}", serde_json::to_string_pretty(&overview)?);

    for summary in &overview.forecast_data {
        match (&summary.forecast_sales, &summary.trend) {
            (Some(value), Some(trend)) => {
                println!("{}: {:.2} ({})", summary.label, value, trend)
            }
            _ => println!(
                "{}: {}",
                summary.label,
                summary.error.as_deref().unwrap_or("unavailable")
            ),
        }
    }

    Ok(())
}
