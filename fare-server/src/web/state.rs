//! Application state for the web layer.

use crate::engine::FareEngine;

/// Shared application state.
///
/// The engine holds its depot directory and rate card behind `Arc`s, so
/// cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Fare engine
    pub engine: FareEngine,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: FareEngine) -> Self {
        Self { engine }
    }
}
