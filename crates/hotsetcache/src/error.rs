//! Error types for hotsetcache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug)]
pub enum Error {
    /// Per-key capacity must be positive
    InvalidCapacity(usize),

    /// No values were ever added under the key
    KeyNotFound,

    /// A promoted value has no entry in the key's list
    ValueNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(n) => {
                write!(f, "Invalid capacity: {} (must be positive)", n)
            }
            Error::KeyNotFound => write!(f, "Key has no cached values"),
            Error::ValueNotFound(value) => write!(f, "Value not found: {}", value),
        }
    }
}

impl std::error::Error for Error {}
