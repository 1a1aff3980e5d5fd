//! Gateway entry-point: wires the upstream client, route guard, REST surface,
//! and OpenAPI docs.

use actix_web::{HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::HealthState;
use backend::outbound::upstream::UpstreamClient;
use backend::server::{AppConfig, build_app};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let client = UpstreamClient::new(config.upstream_url.clone(), config.upstream_timeout)
        .map_err(std::io::Error::other)?;
    let client = web::Data::new(client);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let policy = config.session_policy;
    let server = HttpServer::new(move || {
        let app = build_app(client.clone(), policy, server_health_state.clone());
        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        app
    })
    .bind(config.bind_addr)?;

    info!(addr = %config.bind_addr, upstream = %config.upstream_url, "gateway listening");
    health_state.mark_ready();
    server.run().await
}
