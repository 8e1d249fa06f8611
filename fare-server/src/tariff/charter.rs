//! Private-charter costing.
//!
//! Charters are billed per kilometer with a daily minimum, plus a driver
//! allowance for each day and a one-off permit charge:
//!
//! ```text
//! num_days   = max(1, return_date - journey_date)
//! total_km   = max(distance_km, min_km_per_day * num_days)
//! total_cost = round(total_km * rate_per_km) + driver_allowance * num_days + permit_charges
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{BusType, Money};

use super::error::TariffError;
use super::rate_card::{RateCard, RateCardEntry};

/// A validated charter request.
#[derive(Debug, Clone, PartialEq)]
pub struct CharterRequest {
    pub origin: String,
    pub destination: String,
    /// One-way trip distance.
    pub distance_km: f64,
    pub bus_type: BusType,
    pub seats: u32,
    pub journey_date: NaiveDate,
    /// `None` for a same-day charter.
    pub return_date: Option<NaiveDate>,
}

impl CharterRequest {
    /// Validate raw request fields.
    ///
    /// `bus_type` and `seats` are free text from the booking form.
    pub fn parse(
        origin: &str,
        destination: &str,
        distance_km: f64,
        bus_type: &str,
        seats: &str,
        journey_date: NaiveDate,
        return_date: Option<NaiveDate>,
    ) -> Result<Self, TariffError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(TariffError::InvalidRequest {
                field: "distanceKm",
                reason: format!("must be a non-negative number, got {distance_km}"),
            });
        }

        let bus_type = bus_type
            .parse::<BusType>()
            .map_err(|e| TariffError::InvalidRequest {
                field: "busType",
                reason: e.to_string(),
            })?;

        let seats = seats
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| TariffError::InvalidRequest {
                field: "seats",
                reason: format!("must be a positive whole number, got {seats:?}"),
            })?;

        Ok(Self {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            distance_km,
            bus_type,
            seats,
            journey_date,
            return_date,
        })
    }

    /// Number of billable charter days.
    pub fn num_days(&self) -> u32 {
        charter_days(self.journey_date, self.return_date)
    }
}

/// Cost breakdown for a charter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharterCostBreakdown {
    pub bus_type: BusType,
    /// Capacity of the selected tier, which may exceed the seats requested.
    pub seating_capacity: u32,
    pub rate_per_km: f64,
    /// Kilometer charge.
    pub base_fare: Money,
    /// Driver allowance for all days.
    pub driver_allowance: Money,
    pub permit_charges: Money,
    pub num_days: u32,
    /// Billed kilometers after applying the daily minimum.
    pub total_km: f64,
    pub total_cost: Money,
}

/// Billable days between departure and return, at least one.
///
/// A return before the journey date is treated as a same-day charter.
pub fn charter_days(journey_date: NaiveDate, return_date: Option<NaiveDate>) -> u32 {
    let days = return_date
        .map(|r| (r - journey_date).num_days())
        .unwrap_or(0);
    u32::try_from(days).unwrap_or(0).max(1)
}

/// Cost a charter against a specific rate card row.
pub fn charter_cost(entry: &RateCardEntry, distance_km: f64, num_days: u32) -> CharterCostBreakdown {
    let num_days = num_days.max(1);
    let distance_km = if distance_km.is_finite() {
        distance_km.max(0.0)
    } else {
        0.0
    };

    let minimum_km = f64::from(entry.min_km_per_day) * f64::from(num_days);
    let total_km = distance_km.max(minimum_km);

    // Both factors are finite and non-negative, so only overflow can fail
    let base_fare = Money::from_f64(total_km * entry.rate_per_km).unwrap_or(Money::rupees(u64::MAX));
    let driver_allowance = entry.driver_allowance * u64::from(num_days);
    let total_cost = base_fare + driver_allowance + entry.permit_charges;

    CharterCostBreakdown {
        bus_type: entry.bus_type,
        seating_capacity: entry.seating_capacity,
        rate_per_km: entry.rate_per_km,
        base_fare,
        driver_allowance,
        permit_charges: entry.permit_charges,
        num_days,
        total_km,
        total_cost,
    }
}

/// Select the rate tier for a request and cost it.
pub fn quote_charter(
    card: &RateCard,
    request: &CharterRequest,
) -> Result<CharterCostBreakdown, TariffError> {
    let entry = card.resolve(request.bus_type, request.seats)?;
    Ok(charter_cost(entry, request.distance_km, request.num_days()))
}

#[cfg(test)]
mod tests {
    use super::super::rate_card::test_support::*;
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(distance_km: f64, bus: &str, seats: &str, return_date: Option<NaiveDate>) -> CharterRequest {
        CharterRequest::parse(
            "Pune",
            "Mahabaleshwar",
            distance_km,
            bus,
            seats,
            date(2026, 11, 2),
            return_date,
        )
        .unwrap()
    }

    #[test]
    fn single_day_minimum_applies() {
        let card = sample_card();
        let quote = quote_charter(&card, &request(200.0, "Non-AC", "30", None)).unwrap();

        assert_eq!(quote.num_days, 1);
        assert_eq!(quote.total_km, 250.0);
        assert_eq!(quote.base_fare, Money::rupees(8500));
        assert_eq!(quote.driver_allowance, Money::rupees(1000));
        assert_eq!(quote.permit_charges, Money::rupees(1000));
        assert_eq!(quote.total_cost, Money::rupees(10500));
    }

    #[test]
    fn long_trip_exceeds_minimum() {
        let card = sample_card();
        let quote = quote_charter(&card, &request(400.0, "Non-AC", "30", None)).unwrap();

        assert_eq!(quote.total_km, 400.0);
        assert_eq!(quote.total_cost, Money::rupees(400 * 34 + 1000 + 1000));
    }

    #[test]
    fn multi_day_charter() {
        let card = sample_card();
        let quote =
            quote_charter(&card, &request(300.0, "Non-AC", "30", Some(date(2026, 11, 5)))).unwrap();

        assert_eq!(quote.num_days, 3);
        assert_eq!(quote.total_km, 750.0);
        assert_eq!(quote.driver_allowance, Money::rupees(3000));
        assert_eq!(quote.total_cost, Money::rupees(750 * 34 + 3000 + 1000));
    }

    #[test]
    fn selects_larger_tier_for_seats() {
        let card = sample_card();
        let quote = quote_charter(&card, &request(100.0, "non ac", "35", None)).unwrap();
        assert_eq!(quote.seating_capacity, 50);
        assert_eq!(quote.rate_per_km, 45.0);
    }

    #[test]
    fn no_tier_is_error() {
        let card = sample_card();
        let err = quote_charter(&card, &request(100.0, "AC", "60", None)).unwrap_err();
        assert_eq!(
            err,
            TariffError::NoMatchingRateTier {
                bus_type: BusType::Ac,
                seats: 60
            }
        );
    }

    #[test]
    fn fractional_rate_rounds() {
        let entry = entry(BusType::Ac, 17, 28.5, 0);
        let quote = charter_cost(&entry, 101.0, 1);
        // 101 * 28.5 = 2878.5
        assert_eq!(quote.base_fare, Money::rupees(2879));
    }

    #[test]
    fn charter_days_edges() {
        let d = date(2026, 11, 2);
        assert_eq!(charter_days(d, None), 1);
        assert_eq!(charter_days(d, Some(d)), 1);
        assert_eq!(charter_days(d, Some(date(2026, 11, 3))), 1);
        assert_eq!(charter_days(d, Some(date(2026, 11, 4))), 2);
        // Return before departure
        assert_eq!(charter_days(d, Some(date(2026, 10, 30))), 1);
    }

    #[test]
    fn parse_rejects_bad_fields() {
        let d = date(2026, 11, 2);
        let parse = |distance, bus, seats| {
            CharterRequest::parse("A", "B", distance, bus, seats, d, None)
        };

        assert!(matches!(
            parse(-1.0, "AC", "10"),
            Err(TariffError::InvalidRequest { field: "distanceKm", .. })
        ));
        assert!(matches!(
            parse(f64::NAN, "AC", "10"),
            Err(TariffError::InvalidRequest { field: "distanceKm", .. })
        ));
        assert!(matches!(
            parse(10.0, "Luxury", "10"),
            Err(TariffError::InvalidRequest { field: "busType", .. })
        ));
        for seats in ["", "0", "-4", "ten", "2.5"] {
            assert!(
                matches!(
                    parse(10.0, "AC", seats),
                    Err(TariffError::InvalidRequest { field: "seats", .. })
                ),
                "{seats:?}"
            );
        }
        assert_eq!(parse(10.0, "AC", " 12 ").unwrap().seats, 12);
    }
}

#[cfg(test)]
mod proptests {
    use super::super::rate_card::test_support::*;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Adding days never lowers the cost
        #[test]
        fn non_decreasing_in_days(
            distance in 0.0f64..3000.0,
            days in 1u32..30,
            rate in 0.0f64..100.0,
            min_km in 0u32..500,
        ) {
            let entry = entry(BusType::NonAc, 30, rate, min_km);
            let shorter = charter_cost(&entry, distance, days);
            let longer = charter_cost(&entry, distance, days + 1);
            prop_assert!(shorter.total_cost <= longer.total_cost);
        }

        /// Adding distance never lowers the cost
        #[test]
        fn non_decreasing_in_distance(
            a in 0.0f64..3000.0,
            b in 0.0f64..3000.0,
            days in 1u32..30,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let entry = entry(BusType::Ac, 45, 55.0, 300);
            prop_assert!(charter_cost(&entry, lo, days).total_cost <= charter_cost(&entry, hi, days).total_cost);
        }

        /// Billed kilometers cover both the trip and the daily minimum
        #[test]
        fn total_km_covers_minimum(distance in 0.0f64..3000.0, days in 1u32..30) {
            let entry = entry(BusType::Ac, 45, 55.0, 300);
            let quote = charter_cost(&entry, distance, days);
            prop_assert!(quote.total_km >= distance);
            prop_assert!(quote.total_km >= 300.0 * f64::from(days));
        }
    }
}
