//! The two-season calendar cycle
//!
//! The year splits into two fixed six-month blocks: Dry runs December
//! through May (wrapping the year boundary), Rainy runs June through
//! November. The blocks never slide; this is a calendar convention, not a
//! statistical seasonal decomposition.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Season label for a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    /// December through May
    Dry,
    /// June through November
    Rainy,
}

/// A concrete calendar date range covering one upcoming occurrence of a
/// season. Closed interval; derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    /// Season the window belongs to
    pub season: Season,
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window
    pub end: NaiveDate,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // All call sites pass fixed, valid month/day pairs.
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

impl Season {
    /// Season of a calendar month. Total over 1..=12 and invariant across
    /// years.
    pub fn of_month(month: u32) -> Season {
        match month {
            6..=11 => Season::Rainy,
            _ => Season::Dry,
        }
    }

    /// Season the given date falls in.
    pub fn of_date(date: NaiveDate) -> Season {
        Season::of_month(date.month())
    }

    /// Human-readable label used in forecast products.
    pub fn label(&self) -> &'static str {
        match self {
            Season::Dry => "Dry Season",
            Season::Rainy => "Rainy Season",
        }
    }

    /// Months of the season in calendar order, starting at its first month.
    pub fn months(&self) -> [u32; 6] {
        match self {
            Season::Dry => [12, 1, 2, 3, 4, 5],
            Season::Rainy => [6, 7, 8, 9, 10, 11],
        }
    }

    /// The next full occurrence of this season at or after `reference`.
    ///
    /// Always the *upcoming* window: when `reference` sits inside a running
    /// window of this season, the returned window is the following one.
    /// A Dry window always wraps the year boundary (ends in start-year + 1);
    /// a Rainy window always sits inside a single year.
    pub fn next_window(&self, reference: NaiveDate) -> SeasonWindow {
        match self {
            Season::Dry => {
                let start_year = if reference.month() == 12 {
                    reference.year() + 1
                } else {
                    reference.year()
                };
                SeasonWindow {
                    season: Season::Dry,
                    start: ymd(start_year, 12, 1),
                    end: ymd(start_year + 1, 5, 31),
                }
            }
            Season::Rainy => {
                let start_year = if reference.month() >= 6 {
                    reference.year() + 1
                } else {
                    reference.year()
                };
                SeasonWindow {
                    season: Season::Rainy,
                    start: ymd(start_year, 6, 1),
                    end: ymd(start_year, 11, 30),
                }
            }
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl SeasonWindow {
    /// First-of-month dates covered by the window, in calendar order.
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        let mut months = Vec::with_capacity(6);
        let mut year = self.start.year();
        let mut month = self.start.month();

        while ymd(year, month, 1) <= self.end {
            months.push(ymd(year, month, 1));
            if month == 12 {
                month = 1;
                year += 1;
            } else {
                month += 1;
            }
        }

        months
    }
}
