//! Cookie-backed session store.
//!
//! The session is two fixed cookies: `token` (opaque bearer credential) and
//! `user` (percent-encoded JSON profile). Both are issued together at login
//! with the configured expiry and removed together at logout; a torn pair is
//! "no session". Handlers extract [`SessionContext`] and thread the session
//! explicitly into every gateway call instead of reading ambient state.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tracing::warn;

use crate::domain::locale::LOCALE_COOKIE;
use crate::domain::session::{GuardianProfile, GuardianSession, PROFILE_COOKIE, TOKEN_COOKIE};
use crate::domain::Locale;

/// Characters escaped in the profile cookie value; JSON is not cookie-safe
/// verbatim.
const COOKIE_VALUE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b',')
    .add(b';')
    .add(b'\\');

/// Session lifetime and cookie flags, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    pub ttl_days: i64,
    pub cookie_secure: bool,
}

/// Request-scoped view of the session cookie pair.
#[derive(Clone)]
pub struct SessionContext {
    request: HttpRequest,
}

impl SessionContext {
    /// The current session, applying the both-or-none rule: a missing or
    /// empty credential, a missing profile, or an undecodable profile all
    /// mean "no session".
    pub fn session(&self) -> Option<GuardianSession> {
        let token = self.request.cookie(TOKEN_COOKIE);
        let profile = self.request.cookie(PROFILE_COOKIE);
        match (token, profile) {
            (Some(token), Some(profile)) if !token.value().is_empty() => {
                let guardian = decode_profile(profile.value())?;
                GuardianSession::new(token.value(), guardian).ok()
            }
            (None, None) => None,
            _ => {
                warn!("torn session cookie pair treated as no session");
                None
            }
        }
    }

    /// Display locale recorded by the locale cookie; defaults to Arabic.
    pub fn locale(&self) -> Locale {
        self.request
            .cookie(LOCALE_COOKIE)
            .map(|cookie| Locale::from_cookie(cookie.value()))
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self {
            request: req.clone(),
        }))
    }
}

fn decode_profile(raw: &str) -> Option<GuardianProfile> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    match serde_json::from_str(&decoded) {
        Ok(profile) => Some(profile),
        Err(error) => {
            warn!(error = %error, "undecodable profile cookie treated as no session");
            None
        }
    }
}

/// Build the Set-Cookie pair establishing a session. Both cookies are
/// attached to the same response so the pair is replaced wholesale.
///
/// # Errors
///
/// Returns an error when the profile cannot be serialised to JSON.
pub fn issue_cookies(
    session: &GuardianSession,
    policy: SessionPolicy,
) -> Result<[Cookie<'static>; 2], serde_json::Error> {
    let profile_json = serde_json::to_string(session.guardian())?;
    let encoded = utf8_percent_encode(&profile_json, COOKIE_VALUE_SET).to_string();
    Ok([
        build_cookie(TOKEN_COOKIE, session.token().to_owned(), policy),
        build_cookie(PROFILE_COOKIE, encoded, policy),
    ])
}

/// Build the removal pair clearing a session. Removing an absent pair is a
/// no-op, so logout is idempotent.
pub fn removal_cookies() -> [Cookie<'static>; 2] {
    [removal_cookie(TOKEN_COOKIE), removal_cookie(PROFILE_COOKIE)]
}

fn build_cookie(name: &'static str, value: String, policy: SessionPolicy) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .secure(policy.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(policy.ttl_days))
        .finish()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}
