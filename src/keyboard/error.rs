//! Validation errors for the key queue and delay settings

use thiserror::Error;

/// Errors returned synchronously by the command interface.
///
/// Every variant is raised before any state is touched, so a rejected
/// command leaves the queue and committed text exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyboardError {
    /// Token is neither a single printable character nor a named control key
    #[error("invalid key event: {token:?}")]
    InvalidKeyEvent { token: String },

    /// Delay outside the supported range
    #[error("invalid delay {ms}ms (expected {min}..={max}ms)")]
    InvalidDelay { ms: u64, min: u64, max: u64 },
}

impl KeyboardError {
    pub fn invalid_key(token: impl Into<String>) -> Self {
        Self::InvalidKeyEvent {
            token: token.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KeyboardError>;
