//! Loading and cleaning of monthly trip-record files.
//!
//! [`read_dataframe`] fetches one month through a [`DataSource`], parses the
//! parquet payload and hands it to [`clean_trips`]:
//!
//! 1. `duration` = dropoff − pickup, in minutes (fractional, not rounded);
//! 2. rows outside `1 ≤ duration ≤ 60` are dropped (inclusive bounds);
//! 3. the pickup/dropoff location ids are cast to text.
//!
//! Row order is preserved, so loading an unchanged source twice yields the
//! same frame.

use crate::dataset::DataSource;
use crate::error::{Error, Result};
use crate::features::{
    DROPOFF_COLUMN, DROPOFF_LOCATION_COLUMN, DURATION_COLUMN, PICKUP_COLUMN,
    PICKUP_LOCATION_COLUMN, TRIP_DISTANCE_COLUMN,
};
use crate::period::Period;
use polars::prelude::*;
use std::io::Cursor;
use tracing::{error, info};

/// Shortest trip kept, in minutes.
pub const MIN_DURATION_MINUTES: f64 = 1.0;
/// Longest trip kept, in minutes.
pub const MAX_DURATION_MINUTES: f64 = 60.0;

const NANOSECONDS_PER_MINUTE: f64 = 60_000_000_000.0;

const REQUIRED_COLUMNS: [&str; 5] = [
    PICKUP_COLUMN,
    DROPOFF_COLUMN,
    PICKUP_LOCATION_COLUMN,
    DROPOFF_LOCATION_COLUMN,
    TRIP_DISTANCE_COLUMN,
];

/// Fetch, parse and clean the trip records for `period`.
///
/// Logs the location before reading and the surviving row count after.
///
/// # Errors
/// - [`Error::SourceUnavailable`] if the bytes cannot be fetched or are not parquet
/// - [`Error::SchemaMismatch`] if required columns are missing or mistyped
///
/// Failures are logged and returned; nothing is retried.
pub fn read_dataframe<S: DataSource + ?Sized>(source: &S, period: Period) -> Result<DataFrame> {
    let location = source.locate(period);
    info!("loading file: {location}");

    let loaded = source
        .fetch(period)
        .and_then(|bytes| parse_parquet(bytes, &location))
        .and_then(clean_trips);

    match loaded {
        Ok(df) => {
            info!("{location} had {} rows", df.height());
            Ok(df)
        }
        Err(err) => {
            error!("error reading: {location}");
            error!("{err}");
            Err(err)
        }
    }
}

/// Parse an in-memory parquet file.
pub fn parse_parquet(bytes: Vec<u8>, location: &str) -> Result<DataFrame> {
    ParquetReader::new(Cursor::new(bytes))
        .finish()
        .map_err(|e| Error::source_unavailable(location, e))
}

/// Derive `duration`, apply the duration filter and stringify location ids.
pub fn clean_trips(df: DataFrame) -> Result<DataFrame> {
    for name in REQUIRED_COLUMNS {
        if df.column(name).is_err() {
            return Err(Error::SchemaMismatch(format!("missing column '{name}'")));
        }
    }

    let duration = (col(DROPOFF_COLUMN) - col(PICKUP_COLUMN))
        .dt()
        .total_nanoseconds()
        .cast(DataType::Float64)
        / lit(NANOSECONDS_PER_MINUTE);

    df.lazy()
        .with_column(duration.alias(DURATION_COLUMN))
        .filter(
            col(DURATION_COLUMN)
                .gt_eq(lit(MIN_DURATION_MINUTES))
                .and(col(DURATION_COLUMN).lt_eq(lit(MAX_DURATION_MINUTES))),
        )
        .with_columns([
            col(PICKUP_LOCATION_COLUMN).cast(DataType::String),
            col(DROPOFF_LOCATION_COLUMN).cast(DataType::String),
        ])
        .collect()
        .map_err(|e| Error::SchemaMismatch(e.to_string()))
}
