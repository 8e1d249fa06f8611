//! Domain types for the fare engine.
//!
//! This module contains the validated value types shared by the tariff,
//! depot and estimate layers. All types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod bus_type;
mod depot;
mod location;
mod money;
mod travel_time;

pub use bus_type::{BusType, InvalidBusType};
pub use depot::{Depot, InvalidDepot};
pub use location::{Coordinates, EARTH_RADIUS_KM, InvalidCoordinates, haversine_km};
pub use money::{InvalidAmount, Money};
pub use travel_time::{DayPeriod, EmptyTravelTime, PRIME_TIME_END_MINS, PRIME_TIME_START_MINS, TravelTime};
