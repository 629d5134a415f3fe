//! Feature preprocessing.
//!
//! Follows the fit/transform split used throughout the crate:
//! - [`Transformer`]: unfitted, holds configuration, learns from training data.
//! - [`FittedTransformer`]: frozen state, transforms new data and serializes.
//!
//! The only transformer the duration model needs is [`DictVectorizer`], which
//! maps [`crate::features::FeatureDict`] rows to a sparse numeric matrix.

mod dict_vectorizer;
mod traits;

pub use dict_vectorizer::{
    DictVectorizer, DictVectorizerParams, FeatureColumn, FittedDictVectorizer,
    DEFAULT_SEPARATOR,
};
pub use traits::{FittedTransformer, Transformer};
