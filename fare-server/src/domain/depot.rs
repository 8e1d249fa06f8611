//! Depot type.

use super::location::Coordinates;

/// Error returned when constructing an invalid depot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid depot: {reason}")]
pub struct InvalidDepot {
    reason: &'static str,
}

/// A named, geolocated bus terminus.
///
/// The name is the depot's unique key within a directory. Names are stored
/// with surrounding whitespace trimmed and must not be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Depot {
    id: String,
    name: String,
    location: Coordinates,
}

impl Depot {
    /// Create a depot. An empty `id` falls back to the name.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinates,
    ) -> Result<Self, InvalidDepot> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(InvalidDepot {
                reason: "name must not be empty",
            });
        }

        let id = id.into().trim().to_string();
        let id = if id.is_empty() { name.clone() } else { id };

        Ok(Self { id, name, location })
    }

    /// Identifier in the upstream data source.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, also the lookup key.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Coordinates {
        &self.location
    }
}
