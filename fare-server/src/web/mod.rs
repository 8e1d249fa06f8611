//! Web layer for the fare engine.
//!
//! Provides HTTP endpoints for scheduled fares, the depot listing, charter
//! quotes and blended estimates.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
