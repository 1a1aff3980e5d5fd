//! Session state: the bearer credential and the guardian profile it proves.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cookie holding the opaque bearer credential.
pub const TOKEN_COOKIE: &str = "token";
/// Cookie holding the JSON-serialized guardian profile.
pub const PROFILE_COOKIE: &str = "user";

/// Guardian record returned by the upstream login endpoint.
///
/// Unknown upstream fields are ignored so profile additions do not break the
/// session pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuardianProfile {
    /// Upstream guardian identifier, used for profile mutations.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// National identity number the guardian logs in with.
    pub cin: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Error raised when a session pair cannot be formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// The credential string was empty.
    EmptyToken,
}

impl std::fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "session credential must not be empty"),
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// An authenticated session: credential plus profile.
///
/// ## Invariants
/// - Both fields are present or there is no session at all; readers of the
///   cookie pair treat a torn pair as "no session".
/// - Never mutated in place; login replaces the pair wholesale, logout
///   removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianSession {
    token: String,
    guardian: GuardianProfile,
}

impl GuardianSession {
    /// Form a session from a credential and its profile.
    pub fn new(
        token: impl Into<String>,
        guardian: GuardianProfile,
    ) -> Result<Self, SessionValidationError> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionValidationError::EmptyToken);
        }
        Ok(Self { token, guardian })
    }

    /// Opaque bearer credential for the upstream API.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Profile of the authenticated guardian.
    pub fn guardian(&self) -> &GuardianProfile {
        &self.guardian
    }
}
