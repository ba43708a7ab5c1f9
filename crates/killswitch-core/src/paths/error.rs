//! Path-related error types.

use thiserror::Error;

/// Errors that can occur while resolving default file locations.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// An override variable was set to an empty value.
    #[error("{0} is set but empty")]
    EmptyOverride(&'static str),
}
