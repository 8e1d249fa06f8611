//! Depot directory.
//!
//! Provides depot name → location lookup for scheduled-route fares. The
//! directory is loaded once at startup from a JSON file exported by the
//! booking datastore and is read-only afterwards.

mod directory;
mod error;

pub use directory::{DepotDirectory, LoadReport};
pub use error::DepotError;

#[cfg(test)]
pub(crate) use directory::test_support;
