//! # trip-duration
//!
//! Trains a linear regression model that predicts the duration of green taxi
//! trips from their pickup zone, dropoff zone and distance.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: models carry their training state in the type
//!   (`Unfitted` vs `Fitted`), so an untrained model cannot predict.
//! - **Fit/Transform Separation**: preprocessing learns its vocabulary from the
//!   training month only; fitted components are frozen and serializable.
//! - **Pluggable Sources**: monthly files come through the [`dataset::DataSource`]
//!   trait (HTTP, local directory, in memory).
//!
//! ## Quick Start
//!
//! ```rust
//! use trip_duration::features::trip_features;
//! use trip_duration::pipeline::DurationPipeline;
//! use ndarray::array;
//!
//! let rows = vec![
//!     trip_features("74", "236", 1.0),
//!     trip_features("74", "42", 3.0),
//!     trip_features("41", "236", 2.0),
//! ];
//! let minutes = array![6.0, 14.0, 10.0];
//!
//! let pipeline = DurationPipeline::fit(&rows, &minutes).unwrap();
//! let eta = pipeline.predict_one(&trip_features("41", "42", 2.5)).unwrap();
//! assert!(eta.is_finite());
//! ```
//!
//! ## Module Structure
//!
//! - `period`: calendar months that name one monthly file
//! - `dataset`: sources of raw monthly files
//! - `loader`: parquet parsing, duration derivation and filtering
//! - `features`: feature dictionaries and targets from cleaned frames
//! - `preprocessing`: the dictionary vectorizer
//! - `matrix`: the sparse design matrix
//! - `model`: linear regression with compile-time state
//! - `pipeline`: the persisted vectorizer + model artifact
//! - `trainer`: the end-to-end training run

pub mod config;

/// Sources of monthly trip-record files.
pub mod dataset;

pub mod error;

/// Feature extraction from cleaned trip frames.
pub mod features;

pub mod loader;

pub mod matrix;

/// Regression metrics.
pub mod metrics;

/// Machine learning models with compile-time state safety.
pub mod model;

pub mod period;

pub mod pipeline;

/// Data preprocessing transformers.
pub mod preprocessing;

/// Model persistence.
pub mod serialization;

/// End-to-end training runs.
pub mod trainer;

pub use config::SourceConfig;
pub use error::{Error, Result};
pub use period::Period;
pub use pipeline::DurationPipeline;
pub use trainer::{Trainer, TrainingSummary};
