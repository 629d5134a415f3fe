use crate::error::{Error, Result};
use ndarray::Array1;

/// Metrics for evaluating regression models.
pub struct Metrics;

impl Metrics {
    /// Mean Squared Error: `mean((y_true - y_pred)^2)`.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`] if the inputs differ in length,
    /// [`Error::EmptyData`] if they are empty.
    pub fn mse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        Self::check(y_true, y_pred)?;
        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();
        Ok(sum_sq / y_true.len() as f64)
    }

    /// Root Mean Squared Error, in the same units as the target.
    pub fn rmse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        Ok(Self::mse(y_true, y_pred)?.sqrt())
    }

    fn check(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<()> {
        if y_true.len() != y_pred.len() {
            return Err(Error::LengthMismatch {
                expected: y_true.len(),
                got: y_pred.len(),
            });
        }
        if y_true.is_empty() {
            return Err(Error::EmptyData("cannot score zero predictions".to_string()));
        }
        Ok(())
    }
}
