//! Monthly periods that name one trip-record file each.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar month, e.g. `2021-01`.
///
/// Every trip-record file covers exactly one month, so a period is all that is
/// needed to locate a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidPeriod(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(Error::InvalidPeriod(format!(
                "year must have four digits, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// File name of the green taxi trip records for this month.
    pub fn file_name(&self) -> String {
        format!("green_tripdata_{}-{:02}.parquet", self.year, self.month)
    }
}

impl From<NaiveDate> for Period {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date (the day is ignored).
impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date.into());
        }
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidPeriod(format!("expected YYYY-MM, got '{s}'")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::InvalidPeriod(format!("bad year in '{s}'")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| Error::InvalidPeriod(format!("bad month in '{s}'")))?;
        Period::new(year, month)
    }
}
