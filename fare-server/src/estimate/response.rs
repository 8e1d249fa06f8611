//! Validation of provider output.
//!
//! The provider is asked for JSON matching [`super::prompt::response_schema`],
//! but nothing guarantees it complies. Anything that does not match is an
//! error; fields are never defaulted or coerced from other types.

use serde::Deserialize;

use crate::domain::Money;

use super::error::EstimateError;
use super::types::EstimateResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEstimate {
    estimated_fare: f64,
    nearby_operators: String,
}

/// Parse and validate the model's JSON answer.
pub fn parse_estimate(text: &str) -> Result<EstimateResult, EstimateError> {
    let raw: RawEstimate = serde_json::from_str(text.trim())
        .map_err(|e| EstimateError::invalid_response(e.to_string(), Some(text)))?;

    let estimated_fare = Money::from_f64(raw.estimated_fare).map_err(|e| {
        EstimateError::invalid_response(format!("estimatedFare: {e}"), Some(text))
    })?;

    Ok(EstimateResult {
        estimated_fare,
        nearby_operators: raw.nearby_operators.trim().to_string(),
    })
}
