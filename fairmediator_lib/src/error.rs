//! Error types for the engine library.

use std::fmt;

use crate::store::StoreError;

/// Errors produced by the engine library, wrapping storage failures and
/// adding serialization and input validation failures.
#[derive(Debug)]
pub enum FairMediatorError {
    /// An error from the mediator store.
    Store(StoreError),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for FairMediatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Store error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for FairMediatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for FairMediatorError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<serde_json::Error> for FairMediatorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
