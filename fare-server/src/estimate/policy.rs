//! The documented pricing policy for blended estimates.
//!
//! The generative estimator is asked to follow these rules, and
//! [`PolicyEstimator`] applies them exactly. Keeping them in one place means
//! the prompt and the deterministic fallback cannot drift apart.

use futures::future::BoxFuture;

use crate::domain::Money;

use super::error::EstimateError;
use super::provider::FareEstimator;
use super::types::{EstimateInput, EstimateResult};

/// Pricing class for blended estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceClass {
    Standard,
    Luxury,
}

impl ServiceClass {
    /// Classify a free-text bus description.
    ///
    /// Premium words map to [`ServiceClass::Luxury`]; anything else is
    /// priced as standard.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_server::estimate::ServiceClass;
    ///
    /// assert_eq!(ServiceClass::classify("Luxury"), ServiceClass::Luxury);
    /// assert_eq!(ServiceClass::classify("AC Volvo"), ServiceClass::Luxury);
    /// assert_eq!(ServiceClass::classify("Non-AC"), ServiceClass::Standard);
    /// assert_eq!(ServiceClass::classify("Standard"), ServiceClass::Standard);
    /// ```
    pub fn classify(bus_type: &str) -> Self {
        let lower = bus_type.to_lowercase();
        let is_luxury = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| matches!(word, "luxury" | "ac" | "volvo" | "shivneri" | "premium" | "sleeper"))
            && !lower.contains("non");

        if is_luxury {
            ServiceClass::Luxury
        } else {
            ServiceClass::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::Standard => "Standard",
            ServiceClass::Luxury => "Luxury",
        }
    }
}

/// Base fare and per-kilometer rate for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRates {
    pub base_fare: Money,
    pub per_km: Money,
}

/// Rules a blended estimate should honor.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    pub standard: ClassRates,
    pub luxury: ClassRates,
    /// Trips shorter than this are billed as this distance (a 24-hour
    /// journey's worth).
    pub min_billable_km: f64,
    /// Fractional uplift for travel in the 18:00–22:00 window.
    pub prime_time_surcharge: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            standard: ClassRates {
                base_fare: Money::rupees(500),
                per_km: Money::rupees(2),
            },
            luxury: ClassRates {
                base_fare: Money::rupees(1000),
                per_km: Money::rupees(3),
            },
            min_billable_km: 300.0,
            prime_time_surcharge: 0.20,
        }
    }
}

impl PricingPolicy {
    pub fn rates(&self, class: ServiceClass) -> ClassRates {
        match class {
            ServiceClass::Standard => self.standard,
            ServiceClass::Luxury => self.luxury,
        }
    }

    /// Apply the policy: `(base + per_km * max(distance, floor)) * surcharge`.
    pub fn fare(&self, class: ServiceClass, distance_km: f64, prime_time: bool) -> Money {
        let rates = self.rates(class);
        let billable_km = distance_km.max(self.min_billable_km);
        let mut fare = rates.base_fare.as_f64() + rates.per_km.as_f64() * billable_km;
        if prime_time {
            fare *= 1.0 + self.prime_time_surcharge;
        }
        Money::from_f64(fare).unwrap_or(Money::rupees(u64::MAX))
    }
}

/// Operators quoted when no better source is available.
const DEFAULT_OPERATORS: &[&str] = &[
    "MSRTC",
    "Neeta Travels",
    "Prasanna Purple",
    "VRL Travels",
    "Paulo Travels",
];

/// Deterministic estimator that applies [`PricingPolicy`] exactly.
///
/// Used when no generative provider is configured, and as a stub in tests.
#[derive(Debug, Clone)]
pub struct PolicyEstimator {
    policy: PricingPolicy,
    operators: Vec<String>,
}

impl Default for PolicyEstimator {
    fn default() -> Self {
        Self::new(PricingPolicy::default())
    }
}

impl PolicyEstimator {
    pub fn new(policy: PricingPolicy) -> Self {
        Self {
            policy,
            operators: DEFAULT_OPERATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set the operators listed in every estimate.
    pub fn with_operators(mut self, operators: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.operators = operators.into_iter().map(Into::into).collect();
        self
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Synchronous form of [`FareEstimator::estimate`].
    pub fn estimate_now(&self, input: &EstimateInput) -> EstimateResult {
        let class = ServiceClass::classify(&input.bus_type);
        let estimated_fare = self.policy.fare(
            class,
            input.distance_km,
            input.time_of_travel.is_prime_time(),
        );

        EstimateResult {
            estimated_fare,
            nearby_operators: self.operators.join(", "),
        }
    }
}

impl FareEstimator for PolicyEstimator {
    fn estimate<'a>(
        &'a self,
        input: &'a EstimateInput,
    ) -> BoxFuture<'a, Result<EstimateResult, EstimateError>> {
        Box::pin(async move { Ok(self.estimate_now(input)) })
    }

    fn name(&self) -> &'static str {
        "policy"
    }
}
