//! Depot directory error types.

use crate::records::SourceError;

/// Errors that can occur when building the depot directory.
#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    /// The depot file could not be read or parsed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// No usable depots were found
    #[error("depot source has no valid depots ({rejected} rejected)")]
    Empty { rejected: usize },
}
