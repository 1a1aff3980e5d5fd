//! Proxy behaviour for the resource surface: credential injection, wrapper
//! unwrapping, and failure recovery into envelopes.

#[expect(
    dead_code,
    reason = "Shared fixtures include helpers used only by other integration suites."
)]
#[path = "support/harness.rs"]
mod harness;

use actix_web::test;
use mockito::Matcher;
use serde_json::{Value, json};

use backend::server::build_app;

macro_rules! gateway {
    ($server:expr) => {
        test::init_service(build_app(
            harness::upstream(&$server.url()),
            harness::policy(),
            harness::health(),
        ))
        .await
    };
}

fn authed_get(uri: &str) -> actix_web::test::TestRequest {
    let [token, profile] = harness::session_cookies();
    test::TestRequest::get().uri(uri).cookie(token).cookie(profile)
}

#[actix_web::test]
async fn list_fetch_forwards_the_bearer_and_strips_the_wrapper() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/guardian/publications")
        .match_query(Matcher::UrlEncoded("include".into(), "groups".into()))
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(json!({"data": [{"id": 1}, {"id": 2}]}).to_string())
        .create_async()
        .await;
    let app = gateway!(server);

    let resp = test::call_service(&app, authed_get("/api/publications").to_request()).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!([{"id": 1}, {"id": 2}]));
    assert_eq!(body["message"], json!(null));
    mock.assert_async().await;
}

#[actix_web::test]
async fn missing_session_sends_an_empty_authorization_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/guardian/students")
        .match_header("authorization", "")
        .with_status(401)
        .with_body(json!({"message": "Unauthenticated."}).to_string())
        .create_async()
        .await;
    let app = gateway!(server);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/students").to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], json!("unauthorized"));
    mock.assert_async().await;
}

#[actix_web::test]
async fn summary_failure_reports_null_data_not_an_empty_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/guardian/notes/summery")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("student_id".into(), "4".into()),
            Matcher::UrlEncoded("semester".into(), "2".into()),
        ]))
        .with_status(500)
        .create_async()
        .await;
    let app = gateway!(server);

    let resp = test::call_service(
        &app,
        authed_get("/api/students/4/notes/summary?semester=2").to_request(),
    )
    .await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!(null));
    assert_eq!(body["message"], json!("request failed"));
}

#[actix_web::test]
async fn student_sessions_come_from_the_first_matching_group() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/guardian/groups")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("filter[students.id]".into(), "4".into()),
            Matcher::UrlEncoded("include".into(), "sessions,sessions.subject".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({"data": [
                {"id": 1, "sessions": [{"n": 1}, {"n": 2}]},
                {"id": 2, "sessions": [{"n": 3}]},
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    let app = gateway!(server);

    let resp =
        test::call_service(&app, authed_get("/api/students/4/sessions").to_request()).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!([{"n": 1}, {"n": 2}]));
}

#[actix_web::test]
async fn exam_notes_map_both_filters_into_the_upstream_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/guardian/notes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("filter[student_id]".into(), "4".into()),
            Matcher::UrlEncoded("filter[exam_number]".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(json!({"data": []}).to_string())
        .create_async()
        .await;
    let app = gateway!(server);

    let resp = test::call_service(
        &app,
        authed_get("/api/students/4/notes?exam_number=2").to_request(),
    )
    .await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    mock.assert_async().await;
}

#[actix_web::test]
async fn password_update_without_a_session_never_reaches_the_upstream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = gateway!(server);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/profile/password")
            .set_json(json!({"current_password": "a", "password": "b"}))
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("no active session"));
    mock.assert_async().await;
}

#[actix_web::test]
async fn avatar_update_targets_the_session_guardian() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/guardian/guardians/7/update-avatar")
        .match_header("authorization", "Bearer tok-1")
        .match_body(Matcher::Json(json!({"avatar": "data:image/png;base64,AAA"})))
        .with_status(200)
        .with_body(json!({"message": "updated"}).to_string())
        .create_async()
        .await;
    let app = gateway!(server);

    let [token, profile] = harness::session_cookies();
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/profile/avatar")
            .cookie(token)
            .cookie(profile)
            .set_json(json!({"avatar": "data:image/png;base64,AAA"}))
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!({"message": "updated"}));
    mock.assert_async().await;
}

#[actix_web::test]
async fn send_and_reply_post_distinct_payloads() {
    let mut server = mockito::Server::new_async().await;
    let send_mock = server
        .mock("POST", "/guardian/messages")
        .match_body(Matcher::Json(
            json!({"subject": "s", "content": "c", "recipients": [1, 2]}),
        ))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let reply_mock = server
        .mock("POST", "/guardian/messages")
        .match_body(Matcher::Json(json!({"message_id": 5, "content": "re"})))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let app = gateway!(server);

    let [token, profile] = harness::session_cookies();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/messages")
            .cookie(token.clone())
            .cookie(profile.clone())
            .set_json(json!({"subject": "s", "content": "c", "recipients": [1, 2]}))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/messages/reply")
            .cookie(token)
            .cookie(profile)
            .set_json(json!({"message_id": 5, "content": "re"}))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));

    send_mock.assert_async().await;
    reply_mock.assert_async().await;
}

#[actix_web::test]
async fn message_listing_maps_the_direction_filter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/guardian/messages")
        .match_query(Matcher::UrlEncoded(
            "filter[guardian_messages]".into(),
            "send".into(),
        ))
        .with_status(200)
        .with_body(json!({"data": []}).to_string())
        .create_async()
        .await;
    let app = gateway!(server);

    let resp =
        test::call_service(&app, authed_get("/api/messages?direction=send").to_request()).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    mock.assert_async().await;
}

#[actix_web::test]
async fn validation_message_from_the_body_surfaces_verbatim() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/guardian/messages")
        .with_status(422)
        .with_body(json!({"message": "content is required"}).to_string())
        .create_async()
        .await;
    let app = gateway!(server);

    let [token, profile] = harness::session_cookies();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/messages")
            .cookie(token)
            .cookie(profile)
            .set_json(json!({"content": "", "recipients": [1]}))
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("content is required"));
}

#[actix_web::test]
async fn malformed_list_body_degrades_to_an_empty_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/guardian/invoices")
        .with_status(200)
        .with_body(json!({"items": []}).to_string())
        .create_async()
        .await;
    let app = gateway!(server);

    let resp = test::call_service(&app, authed_get("/api/invoices").to_request()).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], json!("request failed"));
}
