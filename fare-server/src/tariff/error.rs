//! Tariff error types.

use crate::domain::BusType;

/// Errors from charter costing.
///
/// The stage calculators are total over their inputs and never fail, so
/// every variant here belongs to the charter path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TariffError {
    /// No rate card row covers the requested bus type and capacity
    #[error("no {bus_type} rate tier seats {seats} passengers")]
    NoMatchingRateTier { bus_type: BusType, seats: u32 },

    /// A charter request field is malformed
    #[error("invalid {field}: {reason}")]
    InvalidRequest {
        field: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TariffError::NoMatchingRateTier {
            bus_type: BusType::Ac,
            seats: 60,
        };
        assert_eq!(err.to_string(), "no AC rate tier seats 60 passengers");

        let err = TariffError::InvalidRequest {
            field: "seats",
            reason: "must be a positive whole number".into(),
        };
        assert_eq!(err.to_string(), "invalid seats: must be a positive whole number");
    }
}
