//! Login and logout handlers.
//!
//! Login is the one operation allowed to mutate the session pair: a
//! successful upstream exchange issues both cookies on the same response.
//! Failures come back as failed envelopes with the locale's wording; nothing
//! here returns a non-2xx status, callers branch on the envelope.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use super::session::{SessionContext, SessionPolicy, issue_cookies, removal_cookies};
use crate::domain::session::GuardianProfile;
use crate::domain::{Envelope, LoginCredentials};
use crate::outbound::upstream::UpstreamClient;

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub cin: String,
    pub password: String,
}

/// Credential/profile pair returned on a successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginData {
    pub token: String,
    pub user: GuardianProfile,
}

/// Authenticate a guardian and establish the session cookie pair.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Envelope with the credential/profile pair on success, a localized failure message otherwise",
            headers(("Set-Cookie" = String, description = "Session cookie pair on success"))),
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    policy: web::Data<SessionPolicy>,
    payload: web::Json<LoginRequest>,
) -> HttpResponse {
    let messages = ctx.locale().login_messages();
    let credentials = match LoginCredentials::try_from_parts(&payload.cin, &payload.password) {
        Ok(credentials) => credentials,
        Err(validation) => {
            return HttpResponse::Ok().json(Envelope::<LoginData>::fail(validation.to_string()));
        }
    };

    let session = match client.login(&credentials, messages).await {
        Envelope {
            success: true,
            data: Some(session),
            ..
        } => session,
        Envelope { message, .. } => {
            return HttpResponse::Ok().json(Envelope::<LoginData>::fail(
                message.unwrap_or_else(|| messages.fallback.into()),
            ));
        }
    };

    let [token_cookie, profile_cookie] = match issue_cookies(&session, **policy) {
        Ok(pair) => pair,
        Err(err) => {
            error!(error = %err, "failed to encode session cookies");
            return HttpResponse::Ok().json(Envelope::<LoginData>::fail(messages.fallback));
        }
    };

    let data = LoginData {
        token: session.token().to_owned(),
        user: session.guardian().clone(),
    };
    HttpResponse::Ok()
        .cookie(token_cookie)
        .cookie(profile_cookie)
        .json(Envelope::ok(data))
}

/// Clear the session cookie pair. Idempotent: logging out twice leaves the
/// store empty both times with no error.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Successful envelope; both session cookies removed"),
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    let [token_cookie, profile_cookie] = removal_cookies();
    HttpResponse::Ok()
        .cookie(token_cookie)
        .cookie(profile_cookie)
        .json(Envelope::ok(serde_json::Value::Null))
}
