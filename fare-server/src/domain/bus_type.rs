//! Charter bus type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown bus type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bus type: {0:?} (expected \"AC\" or \"Non-AC\")")]
pub struct InvalidBusType(String);

/// Air-conditioning class of a charter bus, as listed on the rate card.
///
/// # Examples
///
/// ```
/// use fare_server::domain::BusType;
///
/// assert_eq!("AC".parse::<BusType>().unwrap(), BusType::Ac);
/// assert_eq!("non ac".parse::<BusType>().unwrap(), BusType::NonAc);
/// assert_eq!(BusType::NonAc.to_string(), "Non-AC");
/// assert!("Sleeper".parse::<BusType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BusType {
    #[serde(rename = "Non-AC", alias = "NonAC", alias = "Non AC")]
    NonAc,
    #[serde(rename = "AC")]
    Ac,
}

impl BusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusType::NonAc => "Non-AC",
            BusType::Ac => "AC",
        }
    }
}

impl FromStr for BusType {
    type Err = InvalidBusType;

    /// Case-insensitive; ignores spaces, hyphens and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "ac" => Ok(BusType::Ac),
            "nonac" => Ok(BusType::NonAc),
            _ => Err(InvalidBusType(s.to_string())),
        }
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
