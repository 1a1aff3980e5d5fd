//! Reqwest-backed adapter for the upstream academic-records API.
//!
//! This is the single chokepoint every data operation goes through. It owns
//! transport details only: uniform headers, credential injection, one send
//! per call, JSON decoding, and recovery of every failure into the result
//! envelope. No retry, no caching, no timeout override beyond the client
//! default configured at construction.

use std::time::Duration;

use reqwest::{Client, Method, Url, header};
use serde_json::Value;
use tracing::warn;

use crate::domain::session::GuardianSession;
use crate::domain::{Envelope, LoginCredentials, MessageSet, UpstreamFailure, classify};

pub mod dto;
pub mod resources;

/// Placeholder device token the web portal registers with on login.
pub const DEVICE_TOKEN: &str = "web_placeholder_token";

const LOGIN_ENDPOINT: &str = "/auth/guardian";

/// HTTP client bound to the fixed upstream base address.
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// The fixed upstream base address.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path_and_query: &str) -> Result<Url, UpstreamFailure> {
        let raw = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            path_and_query
        );
        Url::parse(&raw)
            .map_err(|error| UpstreamFailure::no_response(format!("invalid upstream url: {error}")))
    }

    /// Issue exactly one request. The `Authorization` header is always
    /// present: `Bearer <token>` with a session, empty without one; never a
    /// token-shaped garbage value. The upstream rejects unauthenticated
    /// calls itself.
    async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, UpstreamFailure> {
        let url = self.endpoint(path_and_query)?;
        let authorization = token.map(|t| format!("Bearer {t}")).unwrap_or_default();
        let mut request = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, authorization);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| UpstreamFailure::no_response(error.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| UpstreamFailure::no_response(error.to_string()))?;
        if !status.is_success() {
            let body_message = serde_json::from_slice::<dto::ErrorBodyDto>(&bytes)
                .ok()
                .and_then(|body| body.message);
            return Err(UpstreamFailure::status(status.as_u16(), body_message));
        }
        serde_json::from_slice(&bytes).map_err(|error| UpstreamFailure::decode(error.to_string()))
    }

    /// Fetch a `{ data: [...] }`-wrapped list, stripping the wrapper level.
    /// Failures degrade to `success:false` with an empty list.
    pub async fn fetch_list(
        &self,
        session: Option<&GuardianSession>,
        path_and_query: &str,
    ) -> Envelope<Vec<Value>> {
        let result = self
            .send(
                Method::GET,
                path_and_query,
                None,
                session.map(GuardianSession::token),
            )
            .await
            .and_then(dto::unwrap_data_list);
        match result {
            Ok(items) => Envelope::ok(items),
            Err(failure) => {
                let classified = classify(&failure, &MessageSet::GENERIC);
                warn!(
                    kind = ?classified.kind,
                    failure = %failure,
                    path = path_and_query,
                    "upstream list fetch failed"
                );
                Envelope::fail_empty(classified.message)
            }
        }
    }

    /// Fetch an unwrapped single-object body. Failures degrade to
    /// `success:false` with no data.
    pub async fn fetch_object(
        &self,
        session: Option<&GuardianSession>,
        path_and_query: &str,
    ) -> Envelope<Value> {
        match self
            .send(
                Method::GET,
                path_and_query,
                None,
                session.map(GuardianSession::token),
            )
            .await
        {
            Ok(body) => Envelope::ok(body),
            Err(failure) => {
                let classified = classify(&failure, &MessageSet::GENERIC);
                warn!(
                    kind = ?classified.kind,
                    failure = %failure,
                    path = path_and_query,
                    "upstream fetch failed"
                );
                Envelope::fail(classified.message)
            }
        }
    }

    /// Send a mutation and return the raw response body. A body-provided
    /// failure message is surfaced verbatim via the classifier.
    pub async fn mutate(
        &self,
        session: Option<&GuardianSession>,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Envelope<Value> {
        match self
            .send(method, path, Some(body), session.map(GuardianSession::token))
            .await
        {
            Ok(response) => Envelope::ok(response),
            Err(failure) => {
                let classified = classify(&failure, &MessageSet::GENERIC);
                warn!(
                    kind = ?classified.kind,
                    failure = %failure,
                    path = path,
                    "upstream mutation failed"
                );
                Envelope::fail(classified.message)
            }
        }
    }

    /// Exchange credentials for a session pair at the fixed login endpoint.
    ///
    /// The one call that precedes session existence: no stored credential is
    /// attached, and failures carry the caller's localized wording. Never
    /// retries.
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
        messages: &MessageSet,
    ) -> Envelope<GuardianSession> {
        let body = serde_json::json!({
            "cin": credentials.cin(),
            "password": credentials.password(),
            "firebase_token": DEVICE_TOKEN,
        });
        let result = self
            .send(Method::POST, LOGIN_ENDPOINT, Some(&body), None)
            .await
            .and_then(|value| {
                serde_json::from_value::<dto::LoginResponseDto>(value)
                    .map_err(|error| UpstreamFailure::decode(error.to_string()))
            })
            .and_then(|response| {
                GuardianSession::new(response.token, response.user)
                    .map_err(|error| UpstreamFailure::decode(error.to_string()))
            });
        match result {
            Ok(session) => Envelope::ok(session),
            Err(failure) => {
                let classified = classify(&failure, messages);
                warn!(kind = ?classified.kind, failure = %failure, "guardian login failed");
                Envelope::fail(classified.message)
            }
        }
    }
}
