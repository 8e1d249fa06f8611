//! Fare estimation engine.
//!
//! The single entry point callers use. Each costing strategy is a separate
//! operation:
//!
//! - [`FareEngine::scheduled_fare`]: depot pair → haversine distance →
//!   scheduled stage rule → fare chart
//! - [`FareEngine::stage_fare_for_distance`]: distance → generic stage
//!   rule → fare chart
//! - [`FareEngine::charter_quote`]: rate card lookup and charter costing
//! - [`FareEngine::estimate_fare`]: blended estimate from a
//!   [`FareEstimator`]
//!
//! Only the last one is asynchronous; the others never perform I/O.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::depots::DepotDirectory;
use crate::estimate::{EstimateError, EstimateInput, EstimateResult, FareEstimator};
use crate::tariff::{
    CharterCostBreakdown, CharterRequest, RateCard, StageFareResult, StageRule, TariffError,
    quote_charter,
};

/// Errors surfaced to engine callers.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A required parameter was absent or blank
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// A parameter was present but malformed
    #[error("invalid {field}: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: String,
    },

    /// A depot name is not in the directory
    #[error("depot not found: {0}")]
    DepotNotFound(String),

    /// No rate card row satisfies the charter request
    #[error(transparent)]
    NoMatchingRateTier(TariffError),

    /// The estimate provider answered with something unusable
    #[error("invalid estimate response: {0}")]
    InvalidEstimateResponse(String),

    /// The estimate provider failed or timed out
    #[error("estimate provider failure: {0}")]
    ProviderFailure(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TariffError> for EngineError {
    fn from(e: TariffError) -> Self {
        match e {
            TariffError::NoMatchingRateTier { .. } => EngineError::NoMatchingRateTier(e),
            TariffError::InvalidRequest { field, reason } => {
                EngineError::InvalidParameter { field, reason }
            }
        }
    }
}

impl From<EstimateError> for EngineError {
    fn from(e: EstimateError) -> Self {
        match e {
            EstimateError::InvalidInput { field, reason } => {
                EngineError::InvalidParameter { field, reason }
            }
            EstimateError::InvalidResponse { message, .. } => {
                EngineError::InvalidEstimateResponse(message)
            }
            other => EngineError::ProviderFailure(other.to_string()),
        }
    }
}

/// Fare for a scheduled route between two known depots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledFare {
    pub origin: String,
    pub destination: String,
    /// Great-circle distance between the depots.
    pub distance_km: f64,
    #[serde(flatten)]
    pub result: StageFareResult,
}

/// The fare engine.
///
/// Cheap to clone; all state is shared and read-only.
#[derive(Clone)]
pub struct FareEngine {
    depots: Arc<DepotDirectory>,
    rate_card: Arc<RateCard>,
    estimator: Arc<dyn FareEstimator>,
    estimate_timeout: Duration,
}

impl FareEngine {
    /// Default bound on a blended estimate.
    pub const DEFAULT_ESTIMATE_TIMEOUT: Duration = Duration::from_secs(20);

    pub fn new(
        depots: DepotDirectory,
        rate_card: RateCard,
        estimator: Arc<dyn FareEstimator>,
    ) -> Self {
        Self {
            depots: Arc::new(depots),
            rate_card: Arc::new(rate_card),
            estimator,
            estimate_timeout: Self::DEFAULT_ESTIMATE_TIMEOUT,
        }
    }

    /// Set the bound on blended estimates.
    pub fn with_estimate_timeout(mut self, timeout: Duration) -> Self {
        self.estimate_timeout = timeout;
        self
    }

    pub fn depots(&self) -> &DepotDirectory {
        &self.depots
    }

    pub fn rate_card(&self) -> &RateCard {
        &self.rate_card
    }

    /// Fare between two depots.
    ///
    /// Uses the straight-line distance and the scheduled stage rule, since
    /// no routed road distance is available for depot pairs.
    pub fn scheduled_fare(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<ScheduledFare, EngineError> {
        let origin = non_blank("originDepot", origin)?;
        let destination = non_blank("destinationDepot", destination)?;

        let from = self
            .depots
            .get(origin)
            .ok_or_else(|| EngineError::DepotNotFound(origin.to_string()))?;
        let to = self
            .depots
            .get(destination)
            .ok_or_else(|| EngineError::DepotNotFound(destination.to_string()))?;

        let distance_km = from.location().distance_km(to.location());
        let rule = StageRule::Scheduled;
        let stages = rule.stages_for(distance_km);

        debug!(
            origin = from.name(),
            destination = to.name(),
            distance_km,
            stages,
            "scheduled fare"
        );

        Ok(ScheduledFare {
            origin: from.name().to_string(),
            destination: to.name().to_string(),
            distance_km,
            result: StageFareResult::new(stages, describe(rule, stages, distance_km)),
        })
    }

    /// Stage fare for a known distance, using the generic stage rule.
    pub fn stage_fare_for_distance(&self, distance_km: f64) -> Result<StageFareResult, EngineError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(EngineError::InvalidParameter {
                field: "distanceKm",
                reason: format!("must be a non-negative number, got {distance_km}"),
            });
        }

        let rule = StageRule::Generic;
        let stages = rule.stages_for(distance_km);
        Ok(StageFareResult::new(stages, describe(rule, stages, distance_km)))
    }

    /// Cost a private charter from the rate card.
    pub fn charter_quote(
        &self,
        request: &CharterRequest,
    ) -> Result<CharterCostBreakdown, EngineError> {
        let quote = quote_charter(&self.rate_card, request)?;
        debug!(
            bus_type = %quote.bus_type,
            seats = request.seats,
            tier = quote.seating_capacity,
            days = quote.num_days,
            total = quote.total_cost.as_rupees(),
            "charter quote"
        );
        Ok(quote)
    }

    /// Blended estimate from the configured estimator, bounded by the
    /// estimate timeout.
    pub async fn estimate_fare(
        &self,
        input: &EstimateInput,
    ) -> Result<EstimateResult, EngineError> {
        let estimator = self.estimator.name();

        let outcome = tokio::time::timeout(self.estimate_timeout, self.estimator.estimate(input))
            .await
            .unwrap_or(Err(EstimateError::Timeout(self.estimate_timeout)));

        outcome.map_err(|e| {
            warn!(estimator, error = %e, "fare estimate failed");
            EngineError::from(e)
        })
    }
}

fn non_blank<'a>(name: &'static str, value: &'a str) -> Result<&'a str, EngineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingParameter(name));
    }
    Ok(trimmed)
}

fn describe(rule: StageRule, stages: u32, distance_km: f64) -> String {
    format!(
        "{stages} stages for {distance_km:.1} km using the {} rule ({} km per stage, minimum {})",
        rule.name(),
        rule.km_per_stage(),
        rule.min_stages()
    )
}
