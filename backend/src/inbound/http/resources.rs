//! Resource proxy handlers.
//!
//! One handler per upstream operation. Each extracts the session context,
//! threads the session explicitly into the proxy, and returns the envelope
//! as JSON with status 200; failures are carried inside the envelope, never
//! as transport faults.

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;

use super::session::SessionContext;
use crate::outbound::upstream::UpstreamClient;
use crate::outbound::upstream::dto::{ReplyMessagePayload, SendMessagePayload};
use crate::outbound::upstream::resources::MessageDirection;

#[derive(Debug, Deserialize)]
pub struct ExamQuery {
    pub exam_number: u32,
}

#[derive(Debug, Deserialize)]
pub struct SemesterQuery {
    pub semester: u32,
}

#[derive(Debug, Deserialize, Default)]
pub struct MessagesQuery {
    #[serde(default)]
    pub direction: MessageDirection,
}

/// Publications feeding the activities and homework screens.
#[utoipa::path(
    get,
    path = "/api/publications",
    responses((status = 200, description = "Envelope with the publication list")),
    tags = ["resources"],
    operation_id = "listPublications"
)]
#[get("/publications")]
pub async fn publications(ctx: SessionContext, client: web::Data<UpstreamClient>) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.publications(session.as_ref()).await)
}

/// Students attached to the guardian.
#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "Envelope with the student list")),
    tags = ["resources"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn students(ctx: SessionContext, client: web::Data<UpstreamClient>) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.students(session.as_ref()).await)
}

/// Annual programme of extracurricular activities.
#[utoipa::path(
    get,
    path = "/api/extracurricular-activities",
    responses((status = 200, description = "Envelope with the activity list")),
    tags = ["resources"],
    operation_id = "listExtracurricularActivities"
)]
#[get("/extracurricular-activities")]
pub async fn extracurricular_activities(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.extracurricular_activities(session.as_ref()).await)
}

/// Weekly time slots for one student.
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/sessions",
    params(("student_id" = i64, Path, description = "Student identifier")),
    responses((status = 200, description = "Envelope with the session list")),
    tags = ["resources"],
    operation_id = "listStudentSessions"
)]
#[get("/students/{student_id}/sessions")]
pub async fn student_sessions(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    path: web::Path<i64>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(
        client
            .student_sessions(session.as_ref(), path.into_inner())
            .await,
    )
}

/// Attendance records for one student.
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/absences",
    params(("student_id" = i64, Path, description = "Student identifier")),
    responses((status = 200, description = "Envelope with the attendance record list")),
    tags = ["resources"],
    operation_id = "listStudentAbsences"
)]
#[get("/students/{student_id}/absences")]
pub async fn student_absences(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    path: web::Path<i64>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(
        client
            .attendance_records(session.as_ref(), path.into_inner())
            .await,
    )
}

/// Exam notes for one student and exam number.
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/notes",
    params(
        ("student_id" = i64, Path, description = "Student identifier"),
        ("exam_number" = u32, Query, description = "Exam number"),
    ),
    responses((status = 200, description = "Envelope with the note list")),
    tags = ["resources"],
    operation_id = "listStudentNotes"
)]
#[get("/students/{student_id}/notes")]
pub async fn student_notes(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    path: web::Path<i64>,
    query: web::Query<ExamQuery>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(
        client
            .exam_notes(session.as_ref(), path.into_inner(), query.exam_number)
            .await,
    )
}

/// Final-exam summary for one student and semester.
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/notes/summary",
    params(
        ("student_id" = i64, Path, description = "Student identifier"),
        ("semester" = u32, Query, description = "Semester number"),
    ),
    responses((status = 200, description = "Envelope with the summary object")),
    tags = ["resources"],
    operation_id = "studentNotesSummary"
)]
#[get("/students/{student_id}/notes/summary")]
pub async fn student_notes_summary(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    path: web::Path<i64>,
    query: web::Query<SemesterQuery>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(
        client
            .notes_summary(session.as_ref(), path.into_inner(), query.semester)
            .await,
    )
}

/// Grade statistics for the report screen.
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/statistics",
    params(
        ("student_id" = i64, Path, description = "Student identifier"),
        ("semester" = u32, Query, description = "Semester number"),
    ),
    responses((status = 200, description = "Envelope with the statistics object")),
    tags = ["resources"],
    operation_id = "studentStatistics"
)]
#[get("/students/{student_id}/statistics")]
pub async fn student_statistics(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    path: web::Path<i64>,
    query: web::Query<SemesterQuery>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(
        client
            .note_statistics(session.as_ref(), path.into_inner(), query.semester)
            .await,
    )
}

/// Invoices issued to the guardian.
#[utoipa::path(
    get,
    path = "/api/invoices",
    responses((status = 200, description = "Envelope with the invoice list")),
    tags = ["resources"],
    operation_id = "listInvoices"
)]
#[get("/invoices")]
pub async fn invoices(ctx: SessionContext, client: web::Data<UpstreamClient>) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.invoices(session.as_ref()).await)
}

/// Change the guardian's password; the payload passes through unchanged.
#[utoipa::path(
    put,
    path = "/api/profile/password",
    responses((status = 200, description = "Envelope with the upstream confirmation")),
    tags = ["profile"],
    operation_id = "updatePassword"
)]
#[put("/profile/password")]
pub async fn update_password(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    payload: web::Json<serde_json::Value>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.update_password(session.as_ref(), &payload).await)
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AvatarPayload {
    pub avatar: String,
}

/// Replace the guardian's avatar with a base64-encoded image.
#[utoipa::path(
    put,
    path = "/api/profile/avatar",
    responses((status = 200, description = "Envelope with the upstream confirmation")),
    tags = ["profile"],
    operation_id = "updateAvatar"
)]
#[put("/profile/avatar")]
pub async fn update_avatar(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    payload: web::Json<AvatarPayload>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(
        client
            .update_avatar(session.as_ref(), &payload.avatar)
            .await,
    )
}

/// Messages sent to or by the guardian.
#[utoipa::path(
    get,
    path = "/api/messages",
    params(("direction" = MessageDirection, Query, description = "receive or send")),
    responses((status = 200, description = "Envelope with the message list")),
    tags = ["messages"],
    operation_id = "listMessages"
)]
#[get("/messages")]
pub async fn messages(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    query: web::Query<MessagesQuery>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.messages(session.as_ref(), query.direction).await)
}

/// Staff users a new message may be addressed to.
#[utoipa::path(
    get,
    path = "/api/messages/recipients",
    responses((status = 200, description = "Envelope with the recipient list")),
    tags = ["messages"],
    operation_id = "listMessageRecipients"
)]
#[get("/messages/recipients")]
pub async fn message_recipients(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.message_recipients(session.as_ref()).await)
}

/// Send a new message; recipients are required.
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessagePayload,
    responses((status = 200, description = "Envelope with the upstream confirmation")),
    tags = ["messages"],
    operation_id = "sendMessage"
)]
#[post("/messages")]
pub async fn send_message(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    payload: web::Json<SendMessagePayload>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.send_message(session.as_ref(), &payload).await)
}

/// Reply within an existing thread; no recipient list is sent.
#[utoipa::path(
    post,
    path = "/api/messages/reply",
    request_body = ReplyMessagePayload,
    responses((status = 200, description = "Envelope with the upstream confirmation")),
    tags = ["messages"],
    operation_id = "replyMessage"
)]
#[post("/messages/reply")]
pub async fn reply_message(
    ctx: SessionContext,
    client: web::Data<UpstreamClient>,
    payload: web::Json<ReplyMessagePayload>,
) -> HttpResponse {
    let session = ctx.session();
    HttpResponse::Ok().json(client.reply_message(session.as_ref(), &payload).await)
}
