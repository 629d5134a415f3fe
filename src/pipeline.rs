//! The persisted duration model: vectorizer followed by linear regression.
//!
//! This is the artifact a training run writes and an inference process reads
//! back. Both halves are stored as their plain parameter structs inside one
//! bincode-encoded [`DurationPipelineParams`].

use crate::error::{Error, Result};
use crate::features::FeatureDict;
use crate::model::{Fitted, InferenceModel, LinearModel, LinearRegression, SerializableLinearParams};
use crate::preprocessing::{
    DictVectorizer, DictVectorizerParams, FittedDictVectorizer, FittedTransformer, Transformer,
};
use crate::serialization::{read_params, write_params};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version written into every artifact; loading any other version fails.
pub const FORMAT_VERSION: u32 = 1;

/// Serializable parameters for the whole pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DurationPipelineParams {
    pub format_version: u32,
    pub vectorizer: DictVectorizerParams,
    pub model: SerializableLinearParams,
}

/// Fitted vectorizer and regression, applied in sequence.
#[derive(Clone, Debug)]
pub struct DurationPipeline {
    vectorizer: FittedDictVectorizer,
    model: LinearModel<Fitted>,
}

impl DurationPipeline {
    /// Combine fitted components.
    ///
    /// # Errors
    /// [`Error::FeatureMismatch`] if the model width differs from the
    /// vectorizer output width.
    pub fn new(vectorizer: FittedDictVectorizer, model: LinearModel<Fitted>) -> Result<Self> {
        if vectorizer.n_features_out() != model.n_features() {
            return Err(Error::FeatureMismatch {
                expected: vectorizer.n_features_out(),
                got: model.n_features(),
            });
        }
        Ok(Self { vectorizer, model })
    }

    /// Fit the vectorizer and then the regression on the same rows.
    pub fn fit(rows: &[FeatureDict], targets: &Array1<f64>) -> Result<Self> {
        let vectorizer = DictVectorizer::new().fit(rows)?;
        let x = vectorizer.transform(rows)?;
        let model = LinearRegression::new().fit(&x, targets)?;
        Self::new(vectorizer, model)
    }

    /// Predict the duration, in minutes, of each row.
    pub fn predict(&self, rows: &[FeatureDict]) -> Result<Array1<f64>> {
        let x = self.vectorizer.transform(rows)?;
        self.model.predict_batch(&x)
    }

    /// Predict a single trip.
    pub fn predict_one(&self, row: &FeatureDict) -> Result<f64> {
        let predictions = self.predict(std::slice::from_ref(row))?;
        predictions
            .get(0)
            .copied()
            .ok_or_else(|| Error::EmptyData("no prediction produced".to_string()))
    }

    pub fn vectorizer(&self) -> &FittedDictVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &LinearModel<Fitted> {
        &self.model
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    pub fn extract_params(&self) -> DurationPipelineParams {
        DurationPipelineParams {
            format_version: FORMAT_VERSION,
            vectorizer: self.vectorizer.extract_params(),
            model: self.model.extract_params(),
        }
    }

    pub fn from_params(params: DurationPipelineParams) -> Result<Self> {
        if params.format_version != FORMAT_VERSION {
            return Err(Error::SerializationFailure(format!(
                "unsupported artifact version {} (expected {FORMAT_VERSION})",
                params.format_version
            )));
        }
        let vectorizer = FittedDictVectorizer::from_params(params.vectorizer)?;
        let model = LinearModel::<Fitted>::from_params(params.model)?;
        Self::new(vectorizer, model)
    }

    /// Save the entire pipeline to a file, replacing any existing one.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_params(&self.extract_params(), path.as_ref())
    }

    /// Load a pipeline from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_params(read_params(path.as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{trip_features, DROPOFF_LOCATION_COLUMN, PICKUP_LOCATION_COLUMN};
    use crate::model::LinearParams;
    use crate::preprocessing::FeatureColumn;
    use ndarray::array;

    fn rows() -> Vec<FeatureDict> {
        vec![
            trip_features("1", "2", 1.0),
            trip_features("1", "3", 2.0),
            trip_features("4", "2", 3.0),
            trip_features("4", "3", 1.5),
            trip_features("1", "2", 2.5),
        ]
    }

    fn targets() -> Array1<f64> {
        array![8.0, 12.0, 20.0, 14.0, 15.0]
    }

    #[test]
    fn test_fit_predict_shapes() {
        let pipeline = DurationPipeline::fit(&rows(), &targets()).unwrap();

        assert_eq!(pipeline.n_features(), 5);
        assert_eq!(pipeline.predict(&rows()).unwrap().len(), 5);
    }

    #[test]
    fn test_predict_one_matches_batch() {
        let pipeline = DurationPipeline::fit(&rows(), &targets()).unwrap();
        let batch = pipeline.predict(&rows()).unwrap();

        for (row, expected) in rows().iter().zip(batch.iter()) {
            assert!((pipeline.predict_one(row).unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unseen_locations_still_predict() {
        let pipeline = DurationPipeline::fit(&rows(), &targets()).unwrap();
        let p = pipeline.predict_one(&trip_features("99", "98", 2.0)).unwrap();
        assert!(p.is_finite());
    }

    fn indicator_weight_sum(pipeline: &DurationPipeline, field: &str) -> f64 {
        pipeline
            .vectorizer()
            .columns()
            .iter()
            .zip(pipeline.model().weights().iter())
            .filter(|(column, _)| {
                matches!(column, FeatureColumn::Indicator { field: f, .. } if f == field)
            })
            .map(|(_, w)| *w)
            .sum()
    }

    #[test]
    fn test_collinear_zone_indicators_get_minimum_norm_weights() {
        // Every row has exactly one pickup and one dropoff indicator, so each
        // group is collinear with the intercept. The fit must pick the
        // solution whose indicator weights sum to zero per group.
        let zones = ["10", "20", "30"];
        let mut rows = Vec::new();
        let mut minutes = Vec::new();
        for (i, pu) in zones.iter().enumerate() {
            for (j, dol) in zones.iter().enumerate() {
                let distance = 0.5 + (i * 3 + j) as f64 * 0.7;
                rows.push(trip_features(pu, dol, distance));
                minutes.push(4.0 + 3.0 * distance + 5.0 * i as f64 - 2.0 * j as f64 + (i * j) as f64);
            }
        }
        let pipeline = DurationPipeline::fit(&rows, &Array1::from(minutes)).unwrap();

        assert_eq!(pipeline.n_features(), 7);
        assert!(indicator_weight_sum(&pipeline, PICKUP_LOCATION_COLUMN).abs() < 1e-8);
        assert!(indicator_weight_sum(&pipeline, DROPOFF_LOCATION_COLUMN).abs() < 1e-8);

        let unseen = pipeline.predict_one(&trip_features("99", "98", 0.0)).unwrap();
        assert!((unseen - pipeline.model().bias()).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_width_mismatch() {
        let vectorizer = DictVectorizer::new().fit(&rows()).unwrap();
        let model = LinearModel::<Fitted>::new(LinearParams {
            weights: array![1.0, 2.0],
            bias: 0.0,
        });

        assert!(matches!(
            DurationPipeline::new(vectorizer, model),
            Err(Error::FeatureMismatch {
                expected: 5,
                got: 2
            })
        ));
    }

    #[test]
    fn test_from_params_rejects_other_version() {
        let pipeline = DurationPipeline::fit(&rows(), &targets()).unwrap();
        let mut params = pipeline.extract_params();
        params.format_version = FORMAT_VERSION + 1;

        assert!(matches!(
            DurationPipeline::from_params(params),
            Err(Error::SerializationFailure(_))
        ));
    }

    #[test]
    fn test_save_load_same_predictions() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let pipeline = DurationPipeline::fit(&rows(), &targets())?;
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("pipeline.bin");

        pipeline.save_to_file(&path)?;
        let loaded = DurationPipeline::load_from_file(&path)?;

        assert_eq!(
            loaded.vectorizer().feature_names(),
            pipeline.vectorizer().feature_names()
        );
        assert_eq!(loaded.predict(&rows())?, pipeline.predict(&rows())?);
        Ok(())
    }

    #[test]
    fn test_save_overwrites() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("pipeline.bin");
        std::fs::write(&path, b"stale contents")?;

        DurationPipeline::fit(&rows(), &targets())?.save_to_file(&path)?;

        assert!(DurationPipeline::load_from_file(&path).is_ok());
        Ok(())
    }

    #[test]
    fn test_load_garbage_is_serialization_failure() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("pipeline.bin");
        std::fs::write(&path, [0xffu8; 3])?;

        assert!(matches!(
            DurationPipeline::load_from_file(&path),
            Err(Error::SerializationFailure(_))
        ));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = DurationPipeline::load_from_file("/nonexistent/dir/pipeline.bin");
        assert!(matches!(result, Err(Error::SerializationFailure(_))));
    }
}
