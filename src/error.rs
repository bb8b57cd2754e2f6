// src/error.rs
use std::fmt;

/// Raised when the fetched data cannot support normalization or ranking,
/// e.g. an empty table after all fetches failed, or a zero first price.
#[derive(Debug, Clone)]
pub struct DataError {
    pub message: String,
}

impl DataError {
    pub fn new(message: impl Into<String>) -> Self {
        DataError {
            message: message.into(),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DataError {}
