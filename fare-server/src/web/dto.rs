//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Depot;

/// Query for a scheduled fare between two depots.
///
/// Both fields are optional here so a missing one can be reported as a
/// missing parameter rather than a generic query rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateFareQuery {
    pub origin_depot: Option<String>,
    pub destination_depot: Option<String>,
}

/// Query for a distance-only stage fare.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageFareQuery {
    /// Kept as text so malformed numbers get a useful message
    pub distance_km: Option<String>,
}

/// A depot in the directory listing.
#[derive(Debug, Serialize)]
pub struct DepotResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl DepotResult {
    pub fn from_depot(depot: &Depot) -> Self {
        Self {
            id: depot.id().to_string(),
            name: depot.name().to_string(),
            lat: depot.location().lat(),
            lon: depot.location().lon(),
        }
    }
}

/// Response for the depot listing.
#[derive(Debug, Serialize)]
pub struct DepotsResponse {
    pub depots: Vec<DepotResult>,
}

/// A field the booking form may send as either a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    pub fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Request to quote a private charter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharterQuoteRequest {
    pub origin: String,
    pub destination: String,

    /// One-way distance in kilometers
    pub distance_km: f64,

    /// "AC" or "Non-AC"
    pub bus_type: String,

    /// Seats required
    pub seats: TextOrNumber,

    pub journey_date: NaiveDate,

    /// Absent for a same-day charter
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

/// Request for a blended fare estimate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub start_location: String,
    pub destination: String,
    pub distance_km: f64,
    pub bus_type: String,

    /// "HH:MM" or a descriptive period such as "evening"
    pub time_of_travel: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
