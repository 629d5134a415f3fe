//! Regression models.
//!
//! Models carry their training state in the type: an `Unfitted` model can
//! only be fitted, a `Fitted` one can only predict and be serialized.

pub mod linear;
mod lstsq;
pub mod state;

pub use linear::{LinearModel, LinearParams, LinearRegression, SerializableLinearParams};
pub use lstsq::min_norm_solve;
pub use state::{Fitted, Unfitted};

use crate::error::Result;
use crate::serialization::{read_params, write_params, SerializableParams};
use std::path::Path;

/// A trained model that can predict and be persisted.
pub trait InferenceModel {
    type InputSingle: ?Sized;
    type OutputSingle;
    type InputBatch: ?Sized;
    type OutputBatch;
    /// Plain-data form written to disk.
    type ParamsRepr: SerializableParams;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle>;
    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch>;

    fn extract_params(&self) -> Self::ParamsRepr;
    fn from_params(params: Self::ParamsRepr) -> Result<Self>
    where
        Self: Sized;

    /// Save the model parameters to a file, replacing any existing one.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_params(&self.extract_params(), path.as_ref())
    }

    /// Load a model saved with [`InferenceModel::save_to_file`].
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        Self::from_params(read_params(path.as_ref())?)
    }
}
