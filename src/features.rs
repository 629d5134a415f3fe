//! Feature dictionaries built from cleaned trip frames.
//!
//! Each cleaned row becomes one [`FeatureDict`]:
//!
//! ```text
//! { "DOLocationID": Text("236"), "PULocationID": Text("74"), "trip_distance": Number(1.3) }
//! ```
//!
//! and the `duration` column becomes the regression target.

use crate::error::{Error, Result};
use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PICKUP_COLUMN: &str = "lpep_pickup_datetime";
pub const DROPOFF_COLUMN: &str = "lpep_dropoff_datetime";
pub const PICKUP_LOCATION_COLUMN: &str = "PULocationID";
pub const DROPOFF_LOCATION_COLUMN: &str = "DOLocationID";
pub const TRIP_DISTANCE_COLUMN: &str = "trip_distance";
pub const DURATION_COLUMN: &str = "duration";

/// Columns whose text value becomes an indicator feature.
pub const CATEGORICAL_COLUMNS: [&str; 2] = [PICKUP_LOCATION_COLUMN, DROPOFF_LOCATION_COLUMN];
/// Columns passed through as numeric features.
pub const NUMERICAL_COLUMNS: [&str; 1] = [TRIP_DISTANCE_COLUMN];

/// A single feature value: text values are one-hot encoded, numbers are kept as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

/// Field name → value for one trip.
pub type FeatureDict = BTreeMap<String, FeatureValue>;

/// Build the feature dictionary for one trip.
pub fn trip_features(pickup_location: &str, dropoff_location: &str, trip_distance: f64) -> FeatureDict {
    FeatureDict::from([
        (PICKUP_LOCATION_COLUMN.to_string(), pickup_location.into()),
        (DROPOFF_LOCATION_COLUMN.to_string(), dropoff_location.into()),
        (TRIP_DISTANCE_COLUMN.to_string(), trip_distance.into()),
    ])
}

fn schema_error(name: &str) -> impl FnOnce(PolarsError) -> Error + '_ {
    move |e| Error::SchemaMismatch(format!("column '{name}': {e}"))
}

/// Project the feature columns of `df` into one dictionary per row.
///
/// Categorical columns are read as text (cast if needed), numeric columns as
/// `f64`. Null cells are left out of the row's dictionary.
pub fn extract_features(df: &DataFrame) -> Result<Vec<FeatureDict>> {
    let mut dicts = vec![FeatureDict::new(); df.height()];

    for name in CATEGORICAL_COLUMNS {
        let column = df
            .column(name)
            .and_then(|c| c.cast(&DataType::String))
            .map_err(schema_error(name))?;
        let values = column.str().map_err(schema_error(name))?;
        for (dict, value) in dicts.iter_mut().zip(values) {
            if let Some(value) = value {
                dict.insert(name.to_string(), value.into());
            }
        }
    }

    for name in NUMERICAL_COLUMNS {
        let column = df
            .column(name)
            .and_then(|c| c.cast(&DataType::Float64))
            .map_err(schema_error(name))?;
        let values = column.f64().map_err(schema_error(name))?;
        for (dict, value) in dicts.iter_mut().zip(values) {
            if let Some(value) = value {
                dict.insert(name.to_string(), value.into());
            }
        }
    }

    Ok(dicts)
}

/// The `duration` column as the regression target.
///
/// # Errors
/// [`Error::SchemaMismatch`] if the column is missing or not numeric,
/// [`Error::NumericalError`] if it contains nulls.
pub fn extract_target(df: &DataFrame) -> Result<Array1<f64>> {
    let column = df
        .column(DURATION_COLUMN)
        .and_then(|c| c.cast(&DataType::Float64))
        .map_err(schema_error(DURATION_COLUMN))?;
    let values = column.f64().map_err(schema_error(DURATION_COLUMN))?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| Error::NumericalError(format!("null {DURATION_COLUMN} at row {row}")))
        })
        .collect::<Result<Vec<f64>>>()
        .map(Array1::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned_frame() -> DataFrame {
        df!(
            PICKUP_LOCATION_COLUMN => ["74", "41"],
            DROPOFF_LOCATION_COLUMN => ["236", "42"],
            TRIP_DISTANCE_COLUMN => [1.3f64, 0.8],
            DURATION_COLUMN => [12.5f64, 6.0],
        )
        .unwrap()
    }

    #[test]
    fn test_extract_features_one_dict_per_row() {
        let dicts = extract_features(&cleaned_frame()).unwrap();

        assert_eq!(dicts.len(), 2);
        assert_eq!(dicts[0], trip_features("74", "236", 1.3));
        assert_eq!(dicts[1], trip_features("41", "42", 0.8));
    }

    #[test]
    fn test_extract_features_casts_integer_ids() {
        let df = df!(
            PICKUP_LOCATION_COLUMN => [7i64],
            DROPOFF_LOCATION_COLUMN => [9i64],
            TRIP_DISTANCE_COLUMN => [2i64],
        )
        .unwrap();
        let dicts = extract_features(&df).unwrap();

        assert_eq!(dicts[0], trip_features("7", "9", 2.0));
    }

    #[test]
    fn test_extract_features_skips_nulls() {
        let df = df!(
            PICKUP_LOCATION_COLUMN => [Some("1"), None],
            DROPOFF_LOCATION_COLUMN => ["2", "3"],
            TRIP_DISTANCE_COLUMN => [Some(1.0f64), None],
        )
        .unwrap();
        let dicts = extract_features(&df).unwrap();

        assert_eq!(dicts[1].len(), 1);
        assert_eq!(dicts[1].get(DROPOFF_LOCATION_COLUMN), Some(&FeatureValue::from("3")));
    }

    #[test]
    fn test_extract_features_missing_column() {
        let df = cleaned_frame().drop(TRIP_DISTANCE_COLUMN).unwrap();
        assert!(matches!(extract_features(&df), Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn test_extract_target() {
        let y = extract_target(&cleaned_frame()).unwrap();
        assert_eq!(y.to_vec(), vec![12.5, 6.0]);
    }

    #[test]
    fn test_extract_target_missing_column() {
        let df = cleaned_frame().drop(DURATION_COLUMN).unwrap();
        assert!(matches!(extract_target(&df), Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn test_extract_target_rejects_nulls() {
        let df = df!(DURATION_COLUMN => [Some(3.0f64), None]).unwrap();
        assert!(matches!(extract_target(&df), Err(Error::NumericalError(_))));
    }

    #[test]
    fn test_empty_frame_gives_no_dicts() {
        let df = cleaned_frame().head(Some(0));
        assert!(extract_features(&df).unwrap().is_empty());
        assert_eq!(extract_target(&df).unwrap().len(), 0);
    }
}
