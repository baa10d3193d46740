//! Error types for bitraster-region

use thiserror::Error;

/// Errors that can occur during component extraction
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bitraster_core::Error),

    /// A component image was requested while no component is current
    #[error("no current connected component: next_conn_comp() returned none or was not called")]
    NoCurrentComponent,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
