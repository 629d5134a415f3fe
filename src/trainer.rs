//! End-to-end training run.
//!
//! A [`Trainer`] owns a [`DataSource`] and, for a training and a validation
//! month, loads both files, fits a [`DurationPipeline`] on the training month,
//! scores it on the validation month and writes the pipeline to disk.
//!
//! Every step fails fast: if anything goes wrong before the final write, no
//! artifact is produced.
//!
//! # Example
//!
//! ```no_run
//! use trip_duration::dataset::HttpSource;
//! use trip_duration::period::Period;
//! use trip_duration::trainer::Trainer;
//!
//! let trainer = Trainer::new(HttpSource::default());
//! let rmse = trainer
//!     .train(Period::new(2021, 1)?, Period::new(2021, 2)?, "model.bin")?;
//! println!("validation rmse: {rmse}");
//! # Ok::<(), trip_duration::Error>(())
//! ```

use crate::dataset::DataSource;
use crate::error::Result;
use crate::features::{extract_features, extract_target};
use crate::loader::read_dataframe;
use crate::metrics::Metrics;
use crate::period::Period;
use crate::pipeline::DurationPipeline;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of one training run.
#[derive(Clone, Debug, Serialize)]
pub struct TrainingSummary {
    pub train_period: String,
    pub val_period: String,
    pub train_source: String,
    pub val_source: String,
    /// Rows left after cleaning.
    pub train_rows: usize,
    pub val_rows: usize,
    /// Width of the vectorized design matrix.
    pub n_features: usize,
    /// Validation root mean squared error, in minutes.
    pub rmse: f64,
    pub model_path: PathBuf,
}

/// Trains and persists trip-duration pipelines from a data source.
pub struct Trainer<S: DataSource> {
    source: S,
}

impl<S: DataSource> Trainer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Train on `train`, validate on `val` and write the pipeline to `out_path`.
    ///
    /// Returns the validation RMSE.
    pub fn train<P: AsRef<Path>>(&self, train: Period, val: Period, out_path: P) -> Result<f64> {
        self.run(train, val, out_path).map(|summary| summary.rmse)
    }

    /// Same as [`Trainer::train`], with the full run summary.
    ///
    /// # Errors
    /// - [`crate::Error::SourceUnavailable`] / [`crate::Error::SchemaMismatch`] from loading
    /// - [`crate::Error::EmptyData`] if either month has no rows left after cleaning
    /// - [`crate::Error::SerializationFailure`] if the artifact cannot be written
    pub fn run<P: AsRef<Path>>(
        &self,
        train: Period,
        val: Period,
        out_path: P,
    ) -> Result<TrainingSummary> {
        let out_path = out_path.as_ref();

        let df_train = read_dataframe(&self.source, train)?;
        let df_val = read_dataframe(&self.source, val)?;

        let train_dicts = extract_features(&df_train)?;
        let y_train = extract_target(&df_train)?;
        let val_dicts = extract_features(&df_val)?;
        let y_val = extract_target(&df_val)?;

        let pipeline = DurationPipeline::fit(&train_dicts, &y_train)?;
        debug!(n_features = pipeline.n_features(), "pipeline fitted");

        let y_pred = pipeline.predict(&val_dicts)?;
        let rmse = Metrics::rmse(&y_val, &y_pred)?;

        info!("rmse={rmse}");
        info!("writing model into {}", out_path.display());
        pipeline.save_to_file(out_path)?;

        Ok(TrainingSummary {
            train_period: train.to_string(),
            val_period: val.to_string(),
            train_source: self.source.locate(train),
            val_source: self.source.locate(val),
            train_rows: df_train.height(),
            val_rows: df_val.height(),
            n_features: pipeline.n_features(),
            rmse,
            model_path: out_path.to_path_buf(),
        })
    }
}
