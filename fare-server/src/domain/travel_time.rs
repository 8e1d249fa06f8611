//! Time of travel, as supplied by trip requests.
//!
//! Callers send either a clock time ("18:30", "6:30 pm") or a descriptive
//! period ("evening"). Both forms are kept so the estimate prompt can echo
//! what the caller said while the pricing policy gets a definite answer to
//! "is this prime time?".

use std::fmt;

use chrono::{NaiveTime, Timelike};

/// Error returned when the time of travel is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("time of travel must not be empty")]
pub struct EmptyTravelTime;

/// Start of the prime-time window, minutes after midnight (inclusive).
pub const PRIME_TIME_START_MINS: u32 = 18 * 60;

/// End of the prime-time window, minutes after midnight (inclusive).
pub const PRIME_TIME_END_MINS: u32 = 22 * 60;

/// Coarse part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(DayPeriod::Morning),
            "afternoon" | "noon" => Some(DayPeriod::Afternoon),
            "evening" => Some(DayPeriod::Evening),
            "night" | "overnight" => Some(DayPeriod::Night),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
            DayPeriod::Night => "night",
        }
    }
}

/// When a trip departs.
///
/// # Examples
///
/// ```
/// use fare_server::domain::TravelTime;
///
/// assert!(TravelTime::parse("19:15").unwrap().is_prime_time());
/// assert!(TravelTime::parse("7:15 pm").unwrap().is_prime_time());
/// assert!(TravelTime::parse("Evening").unwrap().is_prime_time());
/// assert!(!TravelTime::parse("09:00").unwrap().is_prime_time());
/// assert!(TravelTime::parse("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TravelTime {
    /// A specific clock time.
    Clock(NaiveTime),
    /// A named part of the day.
    Period(DayPeriod),
    /// Free text we could not interpret.
    Described(String),
}

impl TravelTime {
    /// Parse a time of travel. Only empty input is an error; anything
    /// unrecognised is kept as [`TravelTime::Described`].
    pub fn parse(s: &str) -> Result<Self, EmptyTravelTime> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyTravelTime);
        }

        let lower = trimmed.to_lowercase();

        if let Some(time) = parse_clock(&lower) {
            return Ok(TravelTime::Clock(time));
        }

        if let Some(period) = DayPeriod::parse(&lower) {
            return Ok(TravelTime::Period(period));
        }

        Ok(TravelTime::Described(trimmed.to_string()))
    }

    /// Whether the trip falls within the 18:00–22:00 prime-time window.
    ///
    /// "Evening" counts as prime time; free text never does.
    pub fn is_prime_time(&self) -> bool {
        match self {
            TravelTime::Clock(t) => {
                let mins = t.hour() * 60 + t.minute();
                (PRIME_TIME_START_MINS..=PRIME_TIME_END_MINS).contains(&mins)
            }
            TravelTime::Period(p) => *p == DayPeriod::Evening,
            TravelTime::Described(_) => false,
        }
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelTime::Clock(t) => write!(f, "{:02}:{:02}", t.hour(), t.minute()),
            TravelTime::Period(p) => f.write_str(p.as_str()),
            TravelTime::Described(s) => f.write_str(s),
        }
    }
}

/// Parse "HH:MM", "H:MM", "H:MM am", "Ham" and "H pm" forms.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    let (body, meridiem) = if let Some(rest) = s.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = s.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (s, None)
    };

    let (hour, minute) = match body.split_once(':') {
        Some((h, m)) => {
            if m.len() != 2 {
                return None;
            }
            (parse_digits(h)?, parse_digits(m)?)
        }
        // A bare hour only makes sense with am/pm
        None if meridiem.is_some() => (parse_digits(body)?, 0),
        None => return None,
    };

    let hour = match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
