//! Private-charter rate card.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{BusType, Money};
use crate::records::{RejectedRecord, SourceError, convert_records, read_json_array};

use super::error::TariffError;

/// One row of the rate card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCardEntry {
    pub bus_type: BusType,
    /// Seats on this bus size.
    pub seating_capacity: u32,
    /// Rupees per kilometer; may be fractional.
    pub rate_per_km: f64,
    /// Kilometers billed per charter day even if fewer are driven.
    pub min_km_per_day: u32,
    /// Driver allowance per charter day.
    pub driver_allowance: Money,
    /// One-off interstate permit charge per charter.
    pub permit_charges: Money,
}

/// Rate card row as it appears in the source file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRateCardEntry {
    bus_type: String,
    seating_capacity: i64,
    rate_per_km: f64,
    min_km_per_day: i64,
    driver_allowance: f64,
    permit_charges: f64,
}

impl TryFrom<RawRateCardEntry> for RateCardEntry {
    type Error = String;

    fn try_from(raw: RawRateCardEntry) -> Result<Self, Self::Error> {
        let bus_type: BusType = raw.bus_type.parse().map_err(|e| format!("{e}"))?;

        let seating_capacity = u32::try_from(raw.seating_capacity)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("seatingCapacity must be positive, got {}", raw.seating_capacity))?;

        if !raw.rate_per_km.is_finite() || raw.rate_per_km < 0.0 {
            return Err(format!("ratePerKm must be non-negative, got {}", raw.rate_per_km));
        }

        let min_km_per_day = u32::try_from(raw.min_km_per_day)
            .map_err(|_| format!("minKmPerDay must be non-negative, got {}", raw.min_km_per_day))?;

        let driver_allowance = Money::from_f64(raw.driver_allowance)
            .map_err(|e| format!("driverAllowance: {e}"))?;
        let permit_charges =
            Money::from_f64(raw.permit_charges).map_err(|e| format!("permitCharges: {e}"))?;

        Ok(Self {
            bus_type,
            seating_capacity,
            rate_per_km: raw.rate_per_km,
            min_km_per_day,
            driver_allowance,
            permit_charges,
        })
    }
}

/// Errors loading a rate card.
#[derive(Debug, thiserror::Error)]
pub enum RateCardError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Every row was rejected, or the file was empty
    #[error("rate card has no valid rows ({rejected} rejected)")]
    Empty { rejected: usize },
}

/// The static table of charter tariffs.
///
/// Read-only after construction. Rows are kept sorted by bus type and then
/// seating capacity so tier selection is a forward scan.
#[derive(Debug, Clone)]
pub struct RateCard {
    entries: Vec<RateCardEntry>,
}

impl RateCard {
    /// Build a rate card from validated rows.
    pub fn new(mut entries: Vec<RateCardEntry>) -> Self {
        entries.sort_by_key(|e| (e.bus_type, e.seating_capacity));
        Self { entries }
    }

    /// Build a rate card from raw JSON records, reporting rejected rows.
    pub fn from_records(records: Vec<serde_json::Value>) -> (Self, Vec<RejectedRecord>) {
        let (entries, rejected) =
            convert_records(records, |raw: RawRateCardEntry| RateCardEntry::try_from(raw));
        (Self::new(entries), rejected)
    }

    /// Load a rate card from a JSON file.
    ///
    /// Invalid rows are logged and skipped. Fails if no valid rows remain.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RateCardError> {
        let path = path.as_ref();
        let records = read_json_array(path)?;
        let (card, rejected) = Self::from_records(records);

        for r in &rejected {
            warn!(path = %path.display(), "skipping rate card {r}");
        }

        if card.is_empty() {
            return Err(RateCardError::Empty {
                rejected: rejected.len(),
            });
        }

        info!(
            path = %path.display(),
            rows = card.len(),
            rejected = rejected.len(),
            "loaded rate card"
        );
        Ok(card)
    }

    /// Select the smallest tier of `bus_type` that seats at least `seats`.
    pub fn resolve(&self, bus_type: BusType, seats: u32) -> Result<&RateCardEntry, TariffError> {
        self.entries
            .iter()
            .find(|e| e.bus_type == bus_type && e.seating_capacity >= seats)
            .ok_or(TariffError::NoMatchingRateTier { bus_type, seats })
    }

    pub fn entries(&self) -> &[RateCardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn entry(
        bus_type: BusType,
        seating_capacity: u32,
        rate_per_km: f64,
        min_km_per_day: u32,
    ) -> RateCardEntry {
        RateCardEntry {
            bus_type,
            seating_capacity,
            rate_per_km,
            min_km_per_day,
            driver_allowance: Money::rupees(1000),
            permit_charges: Money::rupees(1000),
        }
    }

    /// A small card with a Non-AC 30-seater priced at ₹34/km.
    pub fn sample_card() -> RateCard {
        RateCard::new(vec![
            entry(BusType::NonAc, 50, 45.0, 300),
            entry(BusType::NonAc, 17, 24.0, 250),
            entry(BusType::NonAc, 30, 34.0, 250),
            entry(BusType::Ac, 17, 28.0, 250),
            entry(BusType::Ac, 45, 55.0, 300),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn entries_sorted() {
        let card = sample_card();
        let keys: Vec<_> = card
            .entries()
            .iter()
            .map(|e| (e.bus_type, e.seating_capacity))
            .collect();
        assert_eq!(
            keys,
            vec![
                (BusType::NonAc, 17),
                (BusType::NonAc, 30),
                (BusType::NonAc, 50),
                (BusType::Ac, 17),
                (BusType::Ac, 45),
            ]
        );
    }

    #[test]
    fn resolve_exact_tier() {
        let card = sample_card();
        let entry = card.resolve(BusType::NonAc, 30).unwrap();
        assert_eq!(entry.seating_capacity, 30);
        assert_eq!(entry.rate_per_km, 34.0);
    }

    #[test]
    fn resolve_picks_smallest_sufficient_tier() {
        let card = sample_card();
        assert_eq!(card.resolve(BusType::NonAc, 18).unwrap().seating_capacity, 30);
        assert_eq!(card.resolve(BusType::NonAc, 1).unwrap().seating_capacity, 17);
        assert_eq!(card.resolve(BusType::Ac, 20).unwrap().seating_capacity, 45);
    }

    #[test]
    fn resolve_respects_bus_type() {
        let card = sample_card();
        // A 50-seat Non-AC exists but no AC bus that large
        assert!(card.resolve(BusType::NonAc, 50).is_ok());
        let err = card.resolve(BusType::Ac, 50).unwrap_err();
        assert!(matches!(
            err,
            TariffError::NoMatchingRateTier {
                bus_type: BusType::Ac,
                seats: 50
            }
        ));
    }

    #[test]
    fn from_records_validates_rows() {
        let records = vec![
            json!({
                "busType": "Non-AC", "seatingCapacity": 30, "ratePerKm": 34,
                "minKmPerDay": 250, "driverAllowance": 1000, "permitCharges": 1000
            }),
            json!({
                "busType": "Sleeper", "seatingCapacity": 30, "ratePerKm": 34,
                "minKmPerDay": 250, "driverAllowance": 1000, "permitCharges": 1000
            }),
            json!({
                "busType": "AC", "seatingCapacity": 0, "ratePerKm": 34,
                "minKmPerDay": 250, "driverAllowance": 1000, "permitCharges": 1000
            }),
            json!({
                "busType": "AC", "seatingCapacity": 45, "ratePerKm": -2,
                "minKmPerDay": 250, "driverAllowance": 1000, "permitCharges": 1000
            }),
            json!({ "busType": "AC", "seatingCapacity": 45 }),
        ];

        let (card, rejected) = RateCard::from_records(records);
        assert_eq!(card.len(), 1);
        assert_eq!(
            rejected.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(rejected[0].reason.contains("unknown bus type"));
        assert!(rejected[1].reason.contains("seatingCapacity"));
        assert!(rejected[2].reason.contains("ratePerKm"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rate_card.json");
        std::fs::write(
            &path,
            r#"[{"busType": "AC", "seatingCapacity": 45, "ratePerKm": 55.5,
                 "minKmPerDay": 300, "driverAllowance": 1200, "permitCharges": 1500}]"#,
        )
        .unwrap();

        let card = RateCard::load(&path).unwrap();
        let entry = card.resolve(BusType::Ac, 40).unwrap();
        assert_eq!(entry.rate_per_km, 55.5);
        assert_eq!(entry.driver_allowance, Money::rupees(1200));
    }

    #[test]
    fn load_rejects_empty_card() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rate_card.json");
        std::fs::write(&path, r#"[{"busType": "AC"}]"#).unwrap();

        let err = RateCard::load(&path).unwrap_err();
        assert!(matches!(err, RateCardError::Empty { rejected: 1 }));
    }

    #[test]
    fn bundled_rate_card_loads() {
        let card = RateCard::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/rate_card.json"))
            .unwrap();
        let entry = card.resolve(BusType::NonAc, 30).unwrap();
        assert_eq!(entry.rate_per_km, 34.0);
        assert_eq!(entry.min_km_per_day, 250);
    }
}
