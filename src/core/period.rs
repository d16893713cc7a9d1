//! Epidemiological period tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (year, period) pair identifying one fixed-width epidemiological period.
///
/// Periods are numbered from 1 to `periods_per_year` inside each year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpiPeriod {
    /// Epidemiological year.
    pub year: i32,
    /// Period number within the year (1-based).
    pub period: u32,
}

impl EpiPeriod {
    /// Create a new period tag.
    pub fn new(year: i32, period: u32) -> Self {
        Self { year, period }
    }

    /// The period that follows this one, rolling over the year after
    /// `periods_per_year`.
    pub fn next(self, periods_per_year: u32) -> Self {
        if self.period >= periods_per_year {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.period + 1)
        }
    }

    /// Iterate over the `count` periods following this one.
    pub fn successors(self, periods_per_year: u32, count: usize) -> impl Iterator<Item = EpiPeriod> {
        let mut current = self;
        (0..count).map(move |_| {
            current = current.next(periods_per_year);
            current
        })
    }
}

impl fmt::Display for EpiPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-P{:02}", self.year, self.period)
    }
}
