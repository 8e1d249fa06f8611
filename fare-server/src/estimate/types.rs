//! Estimate request and result types.

use serde::Serialize;

use crate::domain::{Money, TravelTime};

use super::error::EstimateError;

/// A validated request for a blended fare estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateInput {
    pub start_location: String,
    pub destination: String,
    pub distance_km: f64,
    /// Free-text bus description ("Standard", "Luxury", "AC sleeper", ...).
    pub bus_type: String,
    pub time_of_travel: TravelTime,
}

impl EstimateInput {
    /// Validate raw request fields. Every field is required.
    pub fn new(
        start_location: &str,
        destination: &str,
        distance_km: f64,
        bus_type: &str,
        time_of_travel: &str,
    ) -> Result<Self, EstimateError> {
        let start_location = required("startLocation", start_location)?;
        let destination = required("destination", destination)?;
        let bus_type = required("busType", bus_type)?;

        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(EstimateError::InvalidInput {
                field: "distanceKm",
                reason: format!("must be a non-negative number, got {distance_km}"),
            });
        }

        let time_of_travel =
            TravelTime::parse(time_of_travel).map_err(|e| EstimateError::InvalidInput {
                field: "timeOfTravel",
                reason: e.to_string(),
            })?;

        Ok(Self {
            start_location,
            destination,
            distance_km,
            bus_type,
            time_of_travel,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, EstimateError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EstimateError::InvalidInput {
            field,
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_string())
}

/// A blended fare with the operators known to serve the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub estimated_fare: Money,
    pub nearby_operators: String,
}
