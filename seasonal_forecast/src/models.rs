//! Trend models for segment forecasting
//!
//! The pipeline uses a single fixed regression family: an ordinary
//! least-squares line over one segment's (time index, metric) points.
//! Prediction extrapolates that line with no clamping and no confidence
//! interval; callers floor at zero where a negative value makes no sense.

use crate::error::{ForecastError, Result};

/// A linear trend fitted to one segment's buckets.
///
/// `metric = slope * time_index + intercept`, where the time index counts
/// elapsed days or months since the segment's earliest bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinearTrend {
    slope: f64,
    intercept: f64,
    domain_min: i64,
    domain_max: i64,
}

impl FittedLinearTrend {
    /// Fit a least-squares line to the given (time index, metric) points.
    ///
    /// Requires at least two points spanning more than one time index;
    /// anything less is an [`InsufficientData`](ForecastError::InsufficientData)
    /// condition the caller turns into an error placeholder.
    pub fn fit(points: &[(i64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "linear trend needs at least 2 points, got {}",
                points.len()
            )));
        }

        let n = points.len() as f64;
        let sum_x: f64 = points.iter().map(|(x, _)| *x as f64).sum();
        let sum_y: f64 = points.iter().map(|(_, y)| *y).sum();
        let sum_xx: f64 = points.iter().map(|(x, _)| (*x as f64) * (*x as f64)).sum();
        let sum_xy: f64 = points.iter().map(|(x, y)| (*x as f64) * *y).sum();

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            // All points share one time index; no line is determined.
            return Err(ForecastError::InsufficientData(
                "linear trend needs points at more than one time index".to_string(),
            ));
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        let domain_min = points.iter().map(|(x, _)| *x).min().unwrap_or(0);
        let domain_max = points.iter().map(|(x, _)| *x).max().unwrap_or(0);

        Ok(Self {
            slope,
            intercept,
            domain_min,
            domain_max,
        })
    }

    /// Point prediction at an arbitrary time index.
    ///
    /// Pure linear extrapolation, unbounded outside the fitted domain.
    pub fn predict(&self, time_index: i64) -> f64 {
        self.slope * time_index as f64 + self.intercept
    }

    /// Slope of the fitted line.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Intercept of the fitted line.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Smallest time index seen during fitting.
    pub fn domain_min(&self) -> i64 {
        self.domain_min
    }

    /// Largest time index seen during fitting.
    pub fn domain_max(&self) -> i64 {
        self.domain_max
    }
}
