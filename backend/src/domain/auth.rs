//! Login credential validation.
//!
//! Keep inbound payload parsing outside the gateway flow by validating the
//! identifier/secret pair before any upstream exchange happens.

use std::fmt;

use zeroize::Zeroizing;

/// Error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// CIN was missing or blank once trimmed.
    EmptyCin,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCin => write!(f, "cin must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials for the upstream guardian endpoint.
///
/// ## Invariants
/// - `cin` is trimmed and non-empty after trimming.
/// - `password` is non-empty but keeps caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    cin: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/secret inputs.
    pub fn try_from_parts(cin: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = cin.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyCin);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            cin: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Identity number sent to the upstream login endpoint.
    pub fn cin(&self) -> &str {
        self.cin.as_str()
    }

    /// Secret sent to the upstream login endpoint.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
