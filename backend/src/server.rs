//! Server assembly: environment configuration and the application factory.
//!
//! `build_app` is the single place the route table, guard, and shared state
//! are wired together, so integration tests exercise the same application the
//! binary serves.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use thiserror::Error;
use url::Url;

use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::{SessionPolicy, auth, resources};
use crate::middleware::RouteGuard;
use crate::outbound::upstream::UpstreamClient;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_URL: &str = "https://api.sofia-sahara.com/api/v1";
const DEFAULT_TTL_DAYS: i64 = 365;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;

/// Environment configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid upstream URL {value:?}: {source}")]
    UpstreamUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("invalid integer for {name} ({value:?}): {source}")]
    Number {
        name: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Startup configuration read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub upstream_url: Url,
    pub upstream_timeout: Duration,
    pub session_policy: SessionPolicy,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unparseable;
    /// absent variables use defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|source| ConfigError::BindAddr {
            value: bind_raw,
            source,
        })?;

        let url_raw = env::var("UPSTREAM_API_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.into());
        let upstream_url = Url::parse(&url_raw).map_err(|source| ConfigError::UpstreamUrl {
            value: url_raw,
            source,
        })?;

        let upstream_timeout = Duration::from_secs(parse_env(
            "UPSTREAM_TIMEOUT_SECS",
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);
        let ttl_days = parse_env("SESSION_TTL_DAYS", DEFAULT_TTL_DAYS)?;

        Ok(Self {
            bind_addr,
            upstream_url,
            upstream_timeout,
            session_policy: SessionPolicy {
                ttl_days,
                cookie_secure,
            },
        })
    }
}

fn parse_env<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|source| ConfigError::Number {
            name,
            value: raw,
            source,
        }),
        Err(_) => Ok(default),
    }
}

/// Assemble the application: route guard at the edge, the `/api` scope for
/// the gateway surface, and health probes outside the guarded area.
pub fn build_app(
    client: web::Data<UpstreamClient>,
    policy: SessionPolicy,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(auth::login)
        .service(auth::logout)
        .service(resources::publications)
        .service(resources::students)
        .service(resources::extracurricular_activities)
        .service(resources::student_sessions)
        .service(resources::student_absences)
        .service(resources::student_notes_summary)
        .service(resources::student_statistics)
        .service(resources::student_notes)
        .service(resources::invoices)
        .service(resources::update_password)
        .service(resources::update_avatar)
        .service(resources::message_recipients)
        .service(resources::messages)
        .service(resources::send_message)
        .service(resources::reply_message)
        .app_data(client)
        .app_data(web::Data::new(policy));

    App::new()
        .app_data(health_state)
        .wrap(RouteGuard)
        .service(api)
        .service(ready)
        .service(live)
}
