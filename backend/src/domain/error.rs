//! Upstream failure taxonomy and the ordered classification rules.
//!
//! Every failed upstream call collapses into one of four kinds plus a
//! user-facing message. The wording differs by call site: login responses use
//! the localized [`MessageSet`]s from [`crate::domain::locale`], everything
//! else uses the generic English set and logs the detail instead.

use serde::Serialize;

/// Raw outcome of a failed upstream call, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// No response was received: network, DNS, or TLS failure.
    NoResponse { detail: String },
    /// A response arrived with a non-2xx status and an optional body message.
    Status {
        status: u16,
        body_message: Option<String>,
    },
    /// A 2xx response carried a body that could not be decoded.
    Decode { detail: String },
}

impl UpstreamFailure {
    pub fn no_response(detail: impl Into<String>) -> Self {
        Self::NoResponse {
            detail: detail.into(),
        }
    }

    pub fn status(status: u16, body_message: Option<String>) -> Self {
        Self::Status {
            status,
            body_message,
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoResponse { detail } => write!(f, "no response: {detail}"),
            Self::Status {
                status,
                body_message: Some(message),
            } => write!(f, "status {status}: {message}"),
            Self::Status { status, .. } => write!(f, "status {status}"),
            Self::Decode { detail } => write!(f, "undecodable body: {detail}"),
        }
    }
}

/// Category assigned to an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamErrorKind {
    Transport,
    NotFound,
    Unauthorized,
    ValidationOrOther,
}

/// Call-site wording applied during classification.
///
/// Login uses a localized set; all other call sites use
/// [`MessageSet::GENERIC`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSet {
    pub connection_failed: &'static str,
    pub not_found: &'static str,
    pub unauthorized: &'static str,
    pub fallback: &'static str,
}

impl MessageSet {
    /// English wording for resource call sites, where the detail is logged
    /// rather than surfaced.
    pub const GENERIC: Self = Self {
        connection_failed: "upstream request failed",
        not_found: "not found",
        unauthorized: "unauthorized",
        fallback: "request failed",
    };
}

/// Classified failure: a kind plus the message shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: UpstreamErrorKind,
    pub message: String,
}

/// Apply the classification rules, in order:
///
/// 1. no response received -> `Transport`, connectivity text;
/// 2. status 404 -> `NotFound`;
/// 3. status 401 -> `Unauthorized`;
/// 4. any other status with a body message -> `ValidationOrOther`, that
///    message verbatim;
/// 5. anything else (statuses without a body message, undecodable 2xx
///    bodies) -> `ValidationOrOther`, fallback text.
pub fn classify(failure: &UpstreamFailure, messages: &MessageSet) -> ClassifiedError {
    let (kind, message) = match failure {
        UpstreamFailure::NoResponse { .. } => {
            (UpstreamErrorKind::Transport, messages.connection_failed.into())
        }
        UpstreamFailure::Status { status: 404, .. } => {
            (UpstreamErrorKind::NotFound, messages.not_found.into())
        }
        UpstreamFailure::Status { status: 401, .. } => {
            (UpstreamErrorKind::Unauthorized, messages.unauthorized.into())
        }
        UpstreamFailure::Status {
            body_message: Some(body_message),
            ..
        } => (UpstreamErrorKind::ValidationOrOther, body_message.clone()),
        UpstreamFailure::Status { .. } | UpstreamFailure::Decode { .. } => {
            (UpstreamErrorKind::ValidationOrOther, messages.fallback.into())
        }
    };
    ClassifiedError { kind, message }
}
