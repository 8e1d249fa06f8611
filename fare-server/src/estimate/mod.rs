//! Blended fare estimates.
//!
//! Unlike the tariff calculators, a blended estimate comes from an external
//! generative model. The [`FareEstimator`] trait is the port the engine
//! depends on; implementations are:
//!
//! - [`GeminiEstimator`], which calls the Gemini API with a declared output
//!   schema and validates the answer
//! - [`PolicyEstimator`], which applies the [`PricingPolicy`] exactly and
//!   needs no network access
//!
//! Provider output is advisory: its numbers are not reproducible between
//! calls, only its shape is checked.

mod error;
mod gemini;
mod policy;
mod prompt;
mod provider;
mod response;
mod types;

pub use error::EstimateError;
pub use gemini::{DEFAULT_MODEL, GeminiConfig, GeminiEstimator};
pub use policy::{ClassRates, PolicyEstimator, PricingPolicy, ServiceClass};
pub use prompt::{build_prompt, response_schema};
pub use provider::FareEstimator;
pub use response::parse_estimate;
pub use types::{EstimateInput, EstimateResult};
