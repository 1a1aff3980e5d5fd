//! Wire shapes for the upstream academic-records API.
//!
//! School-domain record shapes stay opaque (`serde_json::Value`); only the
//! structures the gateway itself depends on are typed here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::UpstreamFailure;
use crate::domain::session::GuardianProfile;

/// Error body shape shared by upstream failure responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyDto {
    pub message: Option<String>,
}

/// Successful login body: `{ token, user }`, no `data` wrapper.
#[derive(Debug, Deserialize)]
pub struct LoginResponseDto {
    pub token: String,
    pub user: GuardianProfile,
}

/// New message sent on a guardian's behalf; recipients are required.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendMessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub recipients: Vec<i64>,
}

/// Reply within an existing thread; carries the parent message id and no
/// recipient list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReplyMessagePayload {
    pub message_id: i64,
    pub content: String,
}

/// Strip the one `{ "data": [...] }` wrapper level list endpoints use.
///
/// A 2xx body without a `data` array is malformed for a list endpoint and is
/// reported as a decode failure.
pub fn unwrap_data_list(body: Value) -> Result<Vec<Value>, UpstreamFailure> {
    match body {
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(UpstreamFailure::decode("`data` field is not an array")),
            None => Err(UpstreamFailure::decode("missing `data` field")),
        },
        _ => Err(UpstreamFailure::decode("body is not a JSON object")),
    }
}

/// Client-side post-filter for the group listing: the first group's
/// `sessions`, original order preserved, never fabricating entries.
pub fn first_group_sessions(groups: Vec<Value>) -> Vec<Value> {
    groups
        .into_iter()
        .next()
        .and_then(|mut group| group.get_mut("sessions").map(Value::take))
        .and_then(|sessions| match sessions {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .unwrap_or_default()
}
