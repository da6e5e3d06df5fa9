//! Error types for stagecue-core.

use thiserror::Error;

/// Result type alias for stagecue-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stagecue-core.
///
/// Parsing itself is total and never fails; errors here come from the
/// filesystem boundary (reading song and playlist files, scanning for a
/// data source).
#[derive(Debug, Error)]
pub enum Error {
    /// IO error reading a song or playlist file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable data source (songs directory or config) was found
    #[error("no data source found")]
    NoDataSource,
}
