//! The fare estimator port.

use std::sync::Arc;

use futures::future::BoxFuture;

use super::error::EstimateError;
use super::types::{EstimateInput, EstimateResult};

/// Something that can produce a blended fare estimate.
///
/// Implementations may call out to a generative model, so results are not
/// guaranteed to be reproducible. Object-safe so the engine can hold any
/// implementation behind an `Arc<dyn FareEstimator>`.
pub trait FareEstimator: Send + Sync {
    /// Estimate a fare for the trip.
    fn estimate<'a>(
        &'a self,
        input: &'a EstimateInput,
    ) -> BoxFuture<'a, Result<EstimateResult, EstimateError>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<E: FareEstimator + ?Sized> FareEstimator for Arc<E> {
    fn estimate<'a>(
        &'a self,
        input: &'a EstimateInput,
    ) -> BoxFuture<'a, Result<EstimateResult, EstimateError>> {
        (**self).estimate(input)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
