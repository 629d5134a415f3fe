//! Dictionary vectorizer.
//!
//! Turns rows of `field → value` dictionaries into a sparse numeric matrix:
//! - a text value `v` of field `f` becomes an indicator column `f=v` (1.0 when present);
//! - a numeric value of field `f` becomes column `f` holding the number.
//!
//! The vocabulary is frozen at fit time. Columns are ordered by name, so the
//! layout depends only on the set of `(field, value)` pairs seen in training.
//! At transform time, text values outside the vocabulary are dropped silently
//! and contribute nothing to the row.

use crate::error::{Error, Result};
use crate::features::{FeatureDict, FeatureValue};
use crate::matrix::SparseMatrix;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Separator between field and value in indicator column names.
pub const DEFAULT_SEPARATOR: &str = "=";

/// Unfitted dictionary vectorizer.
#[derive(Clone, Debug)]
pub struct DictVectorizer {
    separator: String,
}

impl DictVectorizer {
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Use `separator` between field and value in indicator column names.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for DictVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// One output column of a fitted vectorizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureColumn {
    /// 1.0 when `field` has text value `value`.
    Indicator { field: String, value: String },
    /// The numeric value of `field`.
    Numeric { field: String },
}

impl FeatureColumn {
    fn for_entry(field: &str, value: &FeatureValue) -> Self {
        match value {
            FeatureValue::Text(text) => FeatureColumn::Indicator {
                field: field.to_string(),
                value: text.clone(),
            },
            FeatureValue::Number(_) => FeatureColumn::Numeric {
                field: field.to_string(),
            },
        }
    }

    /// Column name, e.g. `PULocationID=74` or `trip_distance`.
    pub fn name(&self, separator: &str) -> String {
        match self {
            FeatureColumn::Indicator { field, value } => format!("{field}{separator}{value}"),
            FeatureColumn::Numeric { field } => field.clone(),
        }
    }
}

/// Serializable parameters of a fitted [`DictVectorizer`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DictVectorizerParams {
    /// Output columns, in column order.
    pub columns: Vec<FeatureColumn>,
    pub separator: String,
}

/// Fitted dictionary vectorizer with a frozen vocabulary.
#[derive(Clone, Debug)]
pub struct FittedDictVectorizer {
    columns: Vec<FeatureColumn>,
    vocabulary: HashMap<String, usize>,
    separator: String,
}

impl FittedDictVectorizer {
    fn from_columns(columns: Vec<FeatureColumn>, separator: String) -> Result<Self> {
        let mut vocabulary = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            let name = column.name(&separator);
            if vocabulary.insert(name.clone(), idx).is_some() {
                return Err(Error::SerializationFailure(format!(
                    "duplicate feature name '{name}'"
                )));
            }
        }
        Ok(Self {
            columns,
            vocabulary,
            separator,
        })
    }

    /// Column names in output order.
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.name(&self.separator))
            .collect()
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Output column of a feature name such as `PULocationID=74`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.vocabulary.get(name).copied()
    }

    fn encode_entry(&self, field: &str, value: &FeatureValue) -> Option<(usize, f64)> {
        match value {
            FeatureValue::Text(text) => self
                .column_index(&format!("{field}{}{text}", self.separator))
                .map(|idx| (idx, 1.0)),
            FeatureValue::Number(number) => self.column_index(field).map(|idx| (idx, *number)),
        }
    }

    /// Map matrix rows back to dictionaries.
    ///
    /// Zero entries are omitted, so dropped unknown values cannot be recovered.
    pub fn inverse_transform(&self, data: &SparseMatrix) -> Result<Vec<FeatureDict>> {
        if data.n_cols() != self.columns.len() {
            return Err(Error::FeatureMismatch {
                expected: self.columns.len(),
                got: data.n_cols(),
            });
        }

        let rows = (0..data.n_rows())
            .map(|i| {
                data.row(i)
                    .filter(|(_, v)| *v != 0.0)
                    .map(|(j, v)| match &self.columns[j] {
                        FeatureColumn::Indicator { field, value } => {
                            (field.clone(), FeatureValue::Text(value.clone()))
                        }
                        FeatureColumn::Numeric { field } => {
                            (field.clone(), FeatureValue::Number(v))
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(rows)
    }
}

impl Transformer for DictVectorizer {
    type Input = [FeatureDict];
    type Output = SparseMatrix;
    type Params = DictVectorizerParams;
    type Fitted = FittedDictVectorizer;

    fn fit(&self, data: &[FeatureDict]) -> Result<FittedDictVectorizer> {
        if data.is_empty() {
            return Err(Error::EmptyData(
                "cannot fit DictVectorizer on zero rows".to_string(),
            ));
        }

        let mut seen: BTreeMap<String, FeatureColumn> = BTreeMap::new();
        for row in data {
            for (field, value) in row {
                let column = FeatureColumn::for_entry(field, value);
                seen.entry(column.name(&self.separator)).or_insert(column);
            }
        }

        FittedDictVectorizer::from_columns(seen.into_values().collect(), self.separator.clone())
    }
}

impl FittedTransformer for FittedDictVectorizer {
    type Input = [FeatureDict];
    type Output = SparseMatrix;
    type Params = DictVectorizerParams;

    fn transform(&self, data: &[FeatureDict]) -> Result<SparseMatrix> {
        let mut matrix = SparseMatrix::new(self.columns.len());
        for row in data {
            let mut entries: Vec<(usize, f64)> = row
                .iter()
                .filter_map(|(field, value)| self.encode_entry(field, value))
                .collect();
            entries.sort_by_key(|&(idx, _)| idx);
            matrix.push_row(entries)?;
        }
        Ok(matrix)
    }

    fn extract_params(&self) -> DictVectorizerParams {
        DictVectorizerParams {
            columns: self.columns.clone(),
            separator: self.separator.clone(),
        }
    }

    fn from_params(params: DictVectorizerParams) -> Result<Self> {
        Self::from_columns(params.columns, params.separator)
    }

    fn n_features_out(&self) -> usize {
        self.columns.len()
    }
}
