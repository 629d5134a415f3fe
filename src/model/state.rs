/// A marker type indicating that a model is **not yet trained**.
///
/// Used in generic parameters (e.g. `LinearModel<Unfitted>`) so that
/// `predict` is only reachable after `fit` has produced a `Fitted` model.
#[derive(Clone, Copy, Debug)]
pub struct Unfitted;

/// A marker type indicating that a model has been **fully trained**.
///
/// A `Fitted` model carries only inference parameters and implements
/// [`super::InferenceModel`].
#[derive(Clone, Copy, Debug)]
pub struct Fitted;
