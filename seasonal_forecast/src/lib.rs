//! # Seasonal Forecast
//!
//! `seasonal_forecast` is the forecasting engine behind the sales dashboard:
//! it cleans raw sales order documents, buckets them by time period and
//! category, builds forward-looking season windows, fits one linear trend
//! per segment and classifies the result.
//!
//! ## Seasons
//!
//! The calendar splits into two fixed six-month blocks:
//!
//! - **Dry**: December through May (wraps the year boundary)
//! - **Rainy**: June through November
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use sales_data::{MemoryStore, RawSalesDoc};
//! use seasonal_forecast::Forecaster;
//! use std::sync::Arc;
//!
//! let store = MemoryStore::new(vec![
//!     RawSalesDoc::new("2024-01-05", 100.0),
//!     RawSalesDoc::new("2024-02-10", 150.0),
//! ]);
//!
//! let forecaster = Forecaster::new(Arc::new(store));
//! let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//!
//! let overview = forecaster.overview(today)?;
//! assert_eq!(overview.forecast_data.len(), 3);
//! # Ok::<(), seasonal_forecast::ForecastError>(())
//! ```

pub mod aggregate;
pub mod error;
pub mod forecast;
pub mod models;
pub mod normalize;
pub mod season;
pub mod trend;

// Re-export commonly used types
pub use crate::aggregate::{Bucket, Granularity};
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::{
    CategoryTrend, ForecastOptions, ForecastOverview, Forecaster, MonthlyPoint, SeasonSummary,
    UnitForecast,
};
pub use crate::models::FittedLinearTrend;
pub use crate::normalize::NormalizeMode;
pub use crate::season::{Season, SeasonWindow};
pub use crate::trend::{Trend, TrendBaseline};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
