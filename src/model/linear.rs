//! Ordinary least-squares linear regression.
//!
//! The model's state is encoded at the type level:
//! - [`LinearRegression`] = `LinearModel<Unfitted>`: holds configuration, can only be fitted.
//! - `LinearModel<Fitted>`: holds weights and bias, implements [`InferenceModel`].
//!
//! Fitting is closed-form and unregularized. With an intercept, the data is
//! centered and the minimum-norm solution of the centered normal equations is
//! taken, so collinear columns (e.g. several one-hot blocks next to the
//! intercept) share weight instead of making the fit fail.

use crate::error::{Error, Result};
use crate::matrix::SparseMatrix;
use crate::model::lstsq::min_norm_solve;
pub use crate::model::{Fitted, InferenceModel, Unfitted};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::debug;

/// Learned parameters: `y = weights · x + bias`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearParams {
    pub weights: Array1<f64>,
    pub bias: f64,
}

/// Serializable representation of [`LinearParams`].
///
/// Kept in `f64` so a reloaded model predicts exactly what the saved one did.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializableLinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl From<&LinearParams> for SerializableLinearParams {
    fn from(params: &LinearParams) -> Self {
        Self {
            weights: params.weights.to_vec(),
            bias: params.bias,
        }
    }
}

impl TryFrom<SerializableLinearParams> for LinearParams {
    type Error = Error;

    fn try_from(value: SerializableLinearParams) -> Result<Self> {
        if !value.bias.is_finite() || value.weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::NumericalError(
                "linear parameters contain non-finite values".to_string(),
            ));
        }
        Ok(Self {
            weights: Array1::from(value.weights),
            bias: value.bias,
        })
    }
}

/// A linear model with state encoded at the type level.
///
/// This enforces, at compile time, that you cannot call `predict()` on an untrained model.
#[derive(Clone, Debug)]
pub struct LinearModel<S> {
    params: LinearParams,
    fit_intercept: bool,
    _state: PhantomData<S>,
}

/// Alias for an **unfitted** linear regression model.
pub type LinearRegression = LinearModel<Unfitted>;

impl LinearRegression {
    /// A regression with an intercept.
    pub fn new() -> Self {
        Self {
            params: LinearParams {
                weights: Array1::zeros(0),
                bias: 0.0,
            },
            fit_intercept: true,
            _state: PhantomData,
        }
    }

    /// Whether to fit a bias term. Without one the fit passes through the origin.
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Fit by least squares on `x` (samples × features) against `y`.
    ///
    /// # Errors
    /// - [`Error::EmptyData`] if `x` has no rows
    /// - [`Error::LengthMismatch`] if `y` does not have one value per row
    /// - [`Error::NumericalError`] on non-finite inputs
    pub fn fit(self, x: &SparseMatrix, y: &Array1<f64>) -> Result<LinearModel<Fitted>> {
        let (n_samples, n_features) = x.shape();
        if n_samples == 0 {
            return Err(Error::EmptyData(
                "cannot fit linear regression on zero samples".to_string(),
            ));
        }
        if y.len() != n_samples {
            return Err(Error::LengthMismatch {
                expected: n_samples,
                got: y.len(),
            });
        }
        if x.values().iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(Error::NumericalError(
                "training data contains non-finite values".to_string(),
            ));
        }
        debug!(n_samples, n_features, fit_intercept = self.fit_intercept, "fitting linear regression");

        let mut gram = x.gram();
        let mut rhs = x.tdot(y)?;
        let (x_mean, y_mean) = if self.fit_intercept {
            (x.column_means(), y.mean().unwrap_or(0.0))
        } else {
            (Array1::zeros(n_features), 0.0)
        };

        if self.fit_intercept {
            // XᵀX − n·μμᵀ and Xᵀy − n·ȳ·μ are the normal equations of the centered data
            let n = n_samples as f64;
            for i in 0..n_features {
                for j in 0..n_features {
                    gram[[i, j]] -= n * x_mean[i] * x_mean[j];
                }
            }
            rhs.scaled_add(-n * y_mean, &x_mean);
        }

        let weights = min_norm_solve(&gram, &rhs)?;
        let bias = y_mean - x_mean.dot(&weights);

        Ok(LinearModel {
            params: LinearParams { weights, bias },
            fit_intercept: self.fit_intercept,
            _state: PhantomData,
        })
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearModel<Fitted> {
    /// Creates a fitted model from known parameters.
    pub fn new(params: LinearParams) -> Self {
        Self {
            params,
            fit_intercept: true,
            _state: PhantomData,
        }
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.params.weights
    }

    pub fn bias(&self) -> f64 {
        self.params.bias
    }

    pub fn n_features(&self) -> usize {
        self.params.weights.len()
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }
}

/// Inference for a trained model: `y = w·x + b`.
///
/// - Single-sample input: dense `[f64]` → `f64`
/// - Batch input: [`SparseMatrix`] → one prediction per row
impl InferenceModel for LinearModel<Fitted> {
    type InputSingle = [f64];
    type OutputSingle = f64;
    type InputBatch = SparseMatrix;
    type OutputBatch = Array1<f64>;
    type ParamsRepr = SerializableLinearParams;

    fn predict(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.n_features() {
            return Err(Error::FeatureMismatch {
                expected: self.n_features(),
                got: input.len(),
            });
        }
        let dot: f64 = input
            .iter()
            .zip(self.params.weights.iter())
            .map(|(x, w)| x * w)
            .sum();
        Ok(dot + self.params.bias)
    }

    fn predict_batch(&self, input: &SparseMatrix) -> Result<Array1<f64>> {
        Ok(input.dot(&self.params.weights)? + self.params.bias)
    }

    fn extract_params(&self) -> SerializableLinearParams {
        (&self.params).into()
    }

    fn from_params(params: SerializableLinearParams) -> Result<Self> {
        Ok(Self::new(LinearParams::try_from(params)?))
    }
}
