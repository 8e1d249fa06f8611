//! Distance to fare-stage conversion.
//!
//! A stage approximates a fixed-length highway segment. Two stage lengths
//! are in use and they are not interchangeable, so every call site names
//! the rule it wants.

use std::fmt;

/// A rule for converting kilometers into fare stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageRule {
    /// Scheduled depot-to-depot fallback: 9 km stages, at least 2.
    Scheduled,
    /// Distance-only estimate: 6 km stages, at least 1.
    Generic,
}

impl StageRule {
    /// Kilometers per stage.
    pub fn km_per_stage(&self) -> f64 {
        match self {
            StageRule::Scheduled => 9.0,
            StageRule::Generic => 6.0,
        }
    }

    /// Minimum number of stages charged.
    pub fn min_stages(&self) -> u32 {
        match self {
            StageRule::Scheduled => 2,
            StageRule::Generic => 1,
        }
    }

    /// Stage count for a distance: `max(min_stages, round(km / km_per_stage))`.
    ///
    /// Negative or non-finite distances count as zero kilometers.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_server::tariff::StageRule;
    ///
    /// assert_eq!(StageRule::Scheduled.stages_for(81.0), 9);
    /// assert_eq!(StageRule::Scheduled.stages_for(5.0), 2);
    /// assert_eq!(StageRule::Generic.stages_for(81.0), 14);
    /// assert_eq!(StageRule::Generic.stages_for(0.0), 1);
    /// ```
    pub fn stages_for(&self, distance_km: f64) -> u32 {
        let km = if distance_km.is_finite() && distance_km > 0.0 {
            distance_km
        } else {
            0.0
        };

        // `as` saturates for values beyond u32::MAX
        let raw = (km / self.km_per_stage()).round() as u32;
        raw.max(self.min_stages())
    }

    pub fn name(&self) -> &'static str {
        match self {
            StageRule::Scheduled => "scheduled",
            StageRule::Generic => "generic",
        }
    }
}

impl fmt::Display for StageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} km per stage, minimum {})",
            self.name(),
            self.km_per_stage(),
            self.min_stages()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_rule() {
        assert_eq!(StageRule::Scheduled.stages_for(81.0), 9);
        assert_eq!(StageRule::Scheduled.stages_for(85.4), 9);
        // 85.5 / 9 = 9.5 rounds up
        assert_eq!(StageRule::Scheduled.stages_for(85.5), 10);
        assert_eq!(StageRule::Scheduled.stages_for(0.0), 2);
        assert_eq!(StageRule::Scheduled.stages_for(13.0), 2);
        assert_eq!(StageRule::Scheduled.stages_for(27.0), 3);
    }

    #[test]
    fn generic_rule() {
        assert_eq!(StageRule::Generic.stages_for(0.0), 1);
        assert_eq!(StageRule::Generic.stages_for(3.0), 1);
        assert_eq!(StageRule::Generic.stages_for(9.0), 2);
        assert_eq!(StageRule::Generic.stages_for(60.0), 10);
    }

    #[test]
    fn rules_differ() {
        assert_ne!(
            StageRule::Scheduled.stages_for(120.0),
            StageRule::Generic.stages_for(120.0)
        );
    }

    #[test]
    fn invalid_distance_is_floor() {
        assert_eq!(StageRule::Scheduled.stages_for(-50.0), 2);
        assert_eq!(StageRule::Scheduled.stages_for(f64::NAN), 2);
        assert_eq!(StageRule::Generic.stages_for(f64::NEG_INFINITY), 1);
    }

    #[test]
    fn display() {
        assert_eq!(
            StageRule::Scheduled.to_string(),
            "scheduled (9 km per stage, minimum 2)"
        );
    }
}
