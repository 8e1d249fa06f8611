//! Tariff calculators.
//!
//! Pure functions for the two deterministic costing strategies:
//!
//! - scheduled routes, priced by fare stages from a fixed chart
//! - private charters, priced from a rate card by bus type and capacity
//!
//! Nothing here performs I/O once the rate card is loaded, so every
//! calculator is safe to call concurrently.

mod charter;
mod chart;
mod error;
mod rate_card;
mod stages;

pub use charter::{CharterCostBreakdown, CharterRequest, charter_cost, charter_days, quote_charter};
pub use chart::{
    EXPRESS_PER_STAGE, ORDINARY_PER_STAGE, SHIVNERI_PER_STAGE, StageFareResult, StageFares,
};
pub use error::TariffError;
pub use rate_card::{RateCard, RateCardEntry, RateCardError};
pub use stages::StageRule;

#[cfg(test)]
pub(crate) use rate_card::test_support;
