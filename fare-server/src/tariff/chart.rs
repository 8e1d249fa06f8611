//! Scheduled-route fare chart.

use serde::Serialize;

use crate::domain::Money;

/// Rupees per stage for the ordinary tier.
pub const ORDINARY_PER_STAGE: u64 = 10;

/// Rupees per stage for the express tier.
pub const EXPRESS_PER_STAGE: u64 = 15;

/// Rupees per stage for the Shivneri (premium) tier.
pub const SHIVNERI_PER_STAGE: u64 = 50;

/// Fares for the three scheduled service tiers, in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StageFares {
    pub ordinary: Money,
    pub express: Money,
    pub shivneri: Money,
}

impl StageFares {
    /// Look up fares for a stage count. Zero or negative stages cost nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_server::domain::Money;
    /// use fare_server::tariff::StageFares;
    ///
    /// let fares = StageFares::for_stages(10);
    /// assert_eq!(fares.ordinary, Money::rupees(100));
    /// assert_eq!(fares.express, Money::rupees(150));
    /// assert_eq!(fares.shivneri, Money::rupees(500));
    ///
    /// assert_eq!(StageFares::for_stages(-3), StageFares::default());
    /// ```
    pub fn for_stages(stages: i64) -> Self {
        if stages <= 0 {
            return Self::default();
        }
        let stages = stages as u64;

        Self {
            ordinary: Money::rupees(ORDINARY_PER_STAGE) * stages,
            express: Money::rupees(EXPRESS_PER_STAGE) * stages,
            shivneri: Money::rupees(SHIVNERI_PER_STAGE) * stages,
        }
    }
}

/// A stage count with its fares and a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageFareResult {
    pub stages: u32,
    pub details: String,
    pub fares: StageFares,
}

impl StageFareResult {
    pub fn new(stages: u32, details: impl Into<String>) -> Self {
        Self {
            stages,
            details: details.into(),
            fares: StageFares::for_stages(i64::from(stages)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_stages() {
        let fares = StageFares::for_stages(10);
        assert_eq!(fares.ordinary, Money::rupees(100));
        assert_eq!(fares.express, Money::rupees(150));
        assert_eq!(fares.shivneri, Money::rupees(500));
    }

    #[test]
    fn nine_stages() {
        let fares = StageFares::for_stages(9);
        assert_eq!(fares.ordinary, Money::rupees(90));
        assert_eq!(fares.express, Money::rupees(135));
        assert_eq!(fares.shivneri, Money::rupees(450));
    }

    #[test]
    fn zero_stages_cost_nothing() {
        let fares = StageFares::for_stages(0);
        assert_eq!(fares.ordinary, Money::ZERO);
        assert_eq!(fares.express, Money::ZERO);
        assert_eq!(fares.shivneri, Money::ZERO);
    }

    #[test]
    fn result_carries_fares() {
        let result = StageFareResult::new(0, "none");
        assert_eq!(result.fares, StageFares::default());

        let result = StageFareResult::new(4, "four stages");
        assert_eq!(result.fares.ordinary, Money::rupees(40));
        assert_eq!(result.details, "four stages");
    }

    #[test]
    fn serializes_tiers_by_name() {
        let json = serde_json::to_value(StageFares::for_stages(2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ordinary": 20, "express": 30, "shivneri": 100 })
        );
    }
}
