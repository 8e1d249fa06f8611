//! Depot lookup by name.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{Coordinates, Depot};
use crate::records::{RejectedRecord, convert_records, read_json_array};

use super::error::DepotError;

/// Depot record as exported by the datastore.
///
/// Exports have used both `lat`/`lon` and `latitude`/`longitude` keys, and
/// ids are sometimes numeric.
#[derive(Debug, Deserialize)]
struct RawDepot {
    #[serde(default)]
    id: Option<Value>,
    name: String,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude", alias = "lng")]
    lon: f64,
}

impl TryFrom<RawDepot> for Depot {
    type Error = String;

    fn try_from(raw: RawDepot) -> Result<Self, Self::Error> {
        let id = match raw.id {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => return Err(format!("id must be a string or number, got {other}")),
        };

        let location = Coordinates::new(raw.lat, raw.lon).map_err(|e| e.to_string())?;
        Depot::new(id, raw.name, location).map_err(|e| e.to_string())
    }
}

/// What happened while building a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Depots kept.
    pub loaded: usize,
    /// Later records whose name was already taken.
    pub duplicates: usize,
    /// Records that could not be converted.
    pub rejected: Vec<RejectedRecord>,
}

/// Read-only set of depots, unique by name.
///
/// The first record for a name wins; later records with the same name are
/// dropped whatever their other fields say. Construct once and share behind
/// an `Arc`; there is no way to mutate a directory after construction, so
/// concurrent readers need no locking.
#[derive(Debug, Clone, Default)]
pub struct DepotDirectory {
    /// Depots in source order.
    depots: Vec<Depot>,
    /// Name → index into `depots`.
    by_name: HashMap<String, usize>,
}

impl DepotDirectory {
    /// Build a directory from validated depots, dropping duplicate names.
    ///
    /// Returns the directory and the number of duplicates dropped.
    pub fn from_depots(depots: impl IntoIterator<Item = Depot>) -> (Self, usize) {
        let mut directory = Self::default();
        let mut duplicates = 0;

        for depot in depots {
            match directory.by_name.entry(depot.name().to_string()) {
                Entry::Occupied(_) => {
                    debug!(name = depot.name(), id = depot.id(), "dropping duplicate depot");
                    duplicates += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(directory.depots.len());
                    directory.depots.push(depot);
                }
            }
        }

        (directory, duplicates)
    }

    /// Build a directory from raw JSON records.
    pub fn from_records(records: Vec<Value>) -> (Self, LoadReport) {
        let (depots, rejected) = convert_records(records, |raw: RawDepot| Depot::try_from(raw));
        let (directory, duplicates) = Self::from_depots(depots);

        let report = LoadReport {
            loaded: directory.len(),
            duplicates,
            rejected,
        };
        (directory, report)
    }

    /// Load the directory from a JSON file.
    ///
    /// Malformed records are logged and skipped. Fails if the file cannot
    /// be read or yields no depots at all.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DepotError> {
        let path = path.as_ref();
        let records = read_json_array(path)?;
        let (directory, report) = Self::from_records(records);

        for r in &report.rejected {
            warn!(path = %path.display(), "skipping depot {r}");
        }

        if directory.is_empty() {
            return Err(DepotError::Empty {
                rejected: report.rejected.len(),
            });
        }

        info!(
            path = %path.display(),
            depots = report.loaded,
            duplicates = report.duplicates,
            rejected = report.rejected.len(),
            "loaded depot directory"
        );
        Ok(directory)
    }

    /// Look up a depot by name. Surrounding whitespace is ignored.
    pub fn get(&self, name: &str) -> Option<&Depot> {
        self.by_name
            .get(name.trim())
            .and_then(|&i| self.depots.get(i))
    }

    /// All depots in source order.
    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn len(&self) -> usize {
        self.depots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depots.is_empty()
    }
}
