//! The resource operation table: one thin method per upstream endpoint.
//!
//! Every operation is a fixed path plus method plus param mapping, delegated
//! to the proxy. The only post-processing is the stateless group-sessions
//! filter, which preserves upstream order and never fabricates entries.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::UpstreamClient;
use super::dto::{ReplyMessagePayload, SendMessagePayload, first_group_sessions};
use crate::domain::session::GuardianSession;
use crate::domain::Envelope;

/// Direction filter for the guardian message listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    #[default]
    Receive,
    Send,
}

impl MessageDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Receive => "receive",
            Self::Send => "send",
        }
    }
}

impl UpstreamClient {
    /// School publications (activities and homework), with their groups.
    pub async fn publications(&self, session: Option<&GuardianSession>) -> Envelope<Vec<Value>> {
        self.fetch_list(session, "/guardian/publications?include=groups")
            .await
    }

    /// Students attached to the guardian.
    pub async fn students(&self, session: Option<&GuardianSession>) -> Envelope<Vec<Value>> {
        self.fetch_list(session, "/guardian/students").await
    }

    /// Annual programme of extracurricular activities.
    pub async fn extracurricular_activities(
        &self,
        session: Option<&GuardianSession>,
    ) -> Envelope<Vec<Value>> {
        self.fetch_list(session, "/guardian/extracurricular_activities")
            .await
    }

    /// Weekly time slots for one student: the first matching group's
    /// sessions, including each session's subject.
    pub async fn student_sessions(
        &self,
        session: Option<&GuardianSession>,
        student_id: i64,
    ) -> Envelope<Vec<Value>> {
        let envelope = self
            .fetch_list(
                session,
                &format!(
                    "/guardian/groups?filter[students.id]={student_id}&include=sessions,sessions.subject"
                ),
            )
            .await;
        match envelope {
            Envelope {
                success: true,
                data: Some(groups),
                ..
            } => Envelope::ok(first_group_sessions(groups)),
            other => other,
        }
    }

    /// Attendance records for one student.
    pub async fn attendance_records(
        &self,
        session: Option<&GuardianSession>,
        student_id: i64,
    ) -> Envelope<Vec<Value>> {
        self.fetch_list(
            session,
            &format!("/guardian/attendance_records?filter[student_id]={student_id}"),
        )
        .await
    }

    /// Exam notes for one student and exam number.
    pub async fn exam_notes(
        &self,
        session: Option<&GuardianSession>,
        student_id: i64,
        exam_number: u32,
    ) -> Envelope<Vec<Value>> {
        self.fetch_list(
            session,
            &format!(
                "/guardian/notes?filter[student_id]={student_id}&filter[exam_number]={exam_number}"
            ),
        )
        .await
    }

    /// Final-exam summary for one student and semester (unwrapped body).
    pub async fn notes_summary(
        &self,
        session: Option<&GuardianSession>,
        student_id: i64,
        semester: u32,
    ) -> Envelope<Value> {
        self.fetch_object(
            session,
            &format!("/guardian/notes/summery?student_id={student_id}&semester={semester}"),
        )
        .await
    }

    /// Grade statistics for the report screen (unwrapped body).
    pub async fn note_statistics(
        &self,
        session: Option<&GuardianSession>,
        student_id: i64,
        semester: u32,
    ) -> Envelope<Value> {
        self.fetch_object(
            session,
            &format!("/guardian/statistiques/notes?student_id={student_id}&semester={semester}"),
        )
        .await
    }

    /// Invoices issued to the guardian.
    pub async fn invoices(&self, session: Option<&GuardianSession>) -> Envelope<Vec<Value>> {
        self.fetch_list(session, "/guardian/invoices").await
    }

    /// Change the guardian's password; the payload passes through unchanged.
    pub async fn update_password(
        &self,
        session: Option<&GuardianSession>,
        payload: &Value,
    ) -> Envelope<Value> {
        let Some(active) = session else {
            return Envelope::fail("no active session");
        };
        self.mutate(
            session,
            Method::PUT,
            &format!("/guardian/guardians/{}/update-password", active.guardian().id),
            payload,
        )
        .await
    }

    /// Replace the guardian's avatar with a base64-encoded image.
    pub async fn update_avatar(
        &self,
        session: Option<&GuardianSession>,
        avatar: &str,
    ) -> Envelope<Value> {
        let Some(active) = session else {
            return Envelope::fail("no active session");
        };
        self.mutate(
            session,
            Method::PUT,
            &format!("/guardian/guardians/{}/update-avatar", active.guardian().id),
            &serde_json::json!({ "avatar": avatar }),
        )
        .await
    }

    /// Messages sent to or by the guardian.
    pub async fn messages(
        &self,
        session: Option<&GuardianSession>,
        direction: MessageDirection,
    ) -> Envelope<Vec<Value>> {
        self.fetch_list(
            session,
            &format!(
                "/guardian/messages?filter[guardian_messages]={}",
                direction.as_str()
            ),
        )
        .await
    }

    /// Staff users the guardian may address a new message to.
    pub async fn message_recipients(
        &self,
        session: Option<&GuardianSession>,
    ) -> Envelope<Vec<Value>> {
        self.fetch_list(session, "/guardian/users").await
    }

    /// Send a new message; recipients are required.
    pub async fn send_message(
        &self,
        session: Option<&GuardianSession>,
        payload: &SendMessagePayload,
    ) -> Envelope<Value> {
        self.post_message(session, serde_json::to_value(payload)).await
    }

    /// Reply within an existing thread; no recipient list is sent.
    pub async fn reply_message(
        &self,
        session: Option<&GuardianSession>,
        payload: &ReplyMessagePayload,
    ) -> Envelope<Value> {
        self.post_message(session, serde_json::to_value(payload)).await
    }

    async fn post_message(
        &self,
        session: Option<&GuardianSession>,
        body: Result<Value, serde_json::Error>,
    ) -> Envelope<Value> {
        match body {
            Ok(body) => {
                self.mutate(session, Method::POST, "/guardian/messages", &body)
                    .await
            }
            Err(error) => Envelope::fail(format!("unserialisable message payload: {error}")),
        }
    }
}
