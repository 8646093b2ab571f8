//! Error types for ip2region.

use thiserror::Error;

/// Error type for ip2region operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not a dotted-quad IPv4 address
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data source ended before a required index window
    #[error("truncated read at offset {offset}: wanted {len} bytes, got {available}")]
    Truncated {
        offset: u64,
        len: usize,
        available: usize,
    },

    /// The underlying file handle was already released
    #[error("searcher is closed")]
    Closed,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Global searcher not installed
    #[error("global searcher not initialized")]
    NotInitialized,
}

impl Error {
    /// Whether this error belongs to the IO family (open, seek, read, bounds).
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Truncated { .. } | Error::Closed)
    }
}

/// Result type alias for ip2region operations.
pub type Result<T> = std::result::Result<T, Error>;
