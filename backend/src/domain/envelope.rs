//! Uniform success/failure envelope for every gateway-facing operation.

use serde::{Deserialize, Serialize};

/// Result of a gateway operation.
///
/// ## Invariants
/// - `success == true` implies `message` is `None`.
/// - `success == false` implies `data` is the operation's empty default:
///   `Some(vec![])` for list-shaped operations, `None` for single objects.
///
/// Callers must branch on `success` before reading `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying the operation's payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Failed envelope for a single-object operation (`data` absent).
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Failed envelope for a list-shaped operation (`data` degrades to `[]`).
    pub fn fail_empty(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(Vec::new()),
            message: Some(message.into()),
        }
    }
}
