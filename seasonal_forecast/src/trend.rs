//! Trend classification for forecast products

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way trend label comparing a prediction against a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Prediction strictly above the baseline
    Increasing,
    /// Prediction strictly below the baseline
    Decreasing,
    /// Prediction exactly equal to the baseline
    Flat,
}

impl Trend {
    /// Classify a prediction against a baseline value.
    ///
    /// Strict comparison with no tolerance band: exact floating-point
    /// equality is Flat. Near-miss values therefore classify as
    /// Increasing/Decreasing rather than Flat; whether a tolerance belongs
    /// here is an open question for stakeholders, not something this
    /// function decides.
    pub fn classify(predicted: f64, baseline: f64) -> Trend {
        if predicted > baseline {
            Trend::Increasing
        } else if predicted < baseline {
            Trend::Decreasing
        } else {
            Trend::Flat
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Flat => "Flat",
        };
        f.write_str(label)
    }
}

/// Which historical value a product compares its prediction against.
///
/// The source pipeline's variants disagree on this, so it stays a per-caller
/// parameter: summaries compare against the last actual value, category
/// trends against the segment's historical total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendBaseline {
    /// The most recent actual value in the segment
    LastActual,
    /// The sum of the segment's historical values
    HistoricalTotal,
}
