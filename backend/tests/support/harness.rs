//! Shared fixtures for the gateway integration suites.

use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::web;
use url::Url;

use backend::domain::session::{GuardianProfile, GuardianSession};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::session::{SessionPolicy, issue_cookies};
use backend::outbound::upstream::UpstreamClient;

/// Bearer credential used by the authenticated fixtures.
pub const TOKEN: &str = "tok-1";

/// Guardian id used by the authenticated fixtures.
pub const GUARDIAN_ID: i64 = 7;

pub fn policy() -> SessionPolicy {
    SessionPolicy {
        ttl_days: 365,
        cookie_secure: false,
    }
}

pub fn health() -> web::Data<HealthState> {
    let state = web::Data::new(HealthState::new());
    state.mark_ready();
    state
}

pub fn upstream(base_url: &str) -> web::Data<UpstreamClient> {
    let url = Url::parse(base_url).expect("valid upstream url");
    let client =
        UpstreamClient::new(url, Duration::from_secs(2)).expect("upstream client builds");
    web::Data::new(client)
}

/// A client that can never be reached; used to provoke transport failures.
pub fn unreachable_upstream() -> web::Data<UpstreamClient> {
    upstream("http://127.0.0.1:9")
}

pub fn guardian() -> GuardianProfile {
    GuardianProfile {
        id: GUARDIAN_ID,
        first_name: "Sara".into(),
        last_name: "Benali".into(),
        cin: "AB123456".into(),
        avatar: None,
    }
}

/// The session cookie pair a logged-in browser would send back.
pub fn session_cookies() -> [Cookie<'static>; 2] {
    let session = GuardianSession::new(TOKEN, guardian()).expect("valid session");
    issue_cookies(&session, policy()).expect("cookies build")
}
