//! OpenAPI documentation configuration.
//!
//! Registers the REST paths from the inbound layer, the typed request/response
//! schemas, and the token cookie security scheme. The generated document backs
//! Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::session::GuardianProfile;
use crate::inbound::http::auth::{LoginData, LoginRequest};
use crate::outbound::upstream::dto::{ReplyMessagePayload, SendMessagePayload};
use crate::outbound::upstream::resources::MessageDirection;

/// Enrich the generated document with the token cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "Bearer credential cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the gateway REST surface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Guardian portal gateway API",
        description = "Session-gated proxy surface over the upstream academic-records API."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::resources::publications,
        crate::inbound::http::resources::students,
        crate::inbound::http::resources::extracurricular_activities,
        crate::inbound::http::resources::student_sessions,
        crate::inbound::http::resources::student_absences,
        crate::inbound::http::resources::student_notes,
        crate::inbound::http::resources::student_notes_summary,
        crate::inbound::http::resources::student_statistics,
        crate::inbound::http::resources::invoices,
        crate::inbound::http::resources::update_password,
        crate::inbound::http::resources::update_avatar,
        crate::inbound::http::resources::messages,
        crate::inbound::http::resources::message_recipients,
        crate::inbound::http::resources::send_message,
        crate::inbound::http::resources::reply_message,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        LoginData,
        GuardianProfile,
        SendMessagePayload,
        ReplyMessagePayload,
        MessageDirection,
    )),
    tags(
        (name = "auth", description = "Session establishment and teardown"),
        (name = "resources", description = "Proxied academic records"),
        (name = "profile", description = "Guardian profile updates"),
        (name = "messages", description = "Guardian/staff messaging"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
