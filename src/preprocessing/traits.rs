//! Core traits for preprocessing transformers.

use crate::error::Result;
use crate::serialization::{read_params, write_params, SerializableParams};
use std::path::Path;

/// An unfitted transformer with hyperparameters.
///
/// # Example
/// ```rust
/// use trip_duration::features::trip_features;
/// use trip_duration::preprocessing::{DictVectorizer, FittedTransformer, Transformer};
///
/// let rows = vec![trip_features("74", "236", 1.3), trip_features("41", "42", 0.8)];
/// let fitted = DictVectorizer::new().fit(&rows).unwrap();
/// let x = fitted.transform(&rows).unwrap();
/// assert_eq!(x.n_cols(), 5);
/// ```
pub trait Transformer: Clone {
    /// Input data type (typically a slice of rows).
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;
    /// The corresponding fitted transformer.
    type Fitted: FittedTransformer<Params = Self::Params, Input = Self::Input, Output = Self::Output>;

    /// Learn parameters from the training data.
    ///
    /// # Errors
    /// Returns [`crate::Error::EmptyData`] when there is nothing to learn from.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted>;

    /// Fit the transformer and transform the same data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output> {
        self.fit(data)?.transform(data)
    }
}

/// A fitted transformer ready for inference and serialization.
///
/// `extract_params()` + `from_params()` is a round-trip.
pub trait FittedTransformer: Clone {
    type Input: ?Sized;
    type Output;
    type Params: SerializableParams;

    /// Transform data using the learned parameters.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self>
    where
        Self: Sized;

    /// Number of output features produced by `transform`.
    fn n_features_out(&self) -> usize;

    /// Save the fitted transformer to a file, replacing any existing one.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_params(&self.extract_params(), path.as_ref())
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        let params = read_params(path.as_ref())?;
        Self::from_params(params)
    }
}
