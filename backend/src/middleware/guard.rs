//! Navigation guard middleware.
//!
//! Evaluates the route decision table once per incoming navigation, before
//! any page logic runs. Paths excluded at the boundary (API, health probes,
//! static assets) bypass the guard entirely. The guard is synchronous and has
//! no side effect besides producing the redirect response.

use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::routes::{DASHBOARD_PATH, LOGIN_PATH};
use crate::domain::session::TOKEN_COOKIE;
use crate::domain::{GuardDecision, decide, is_boundary_excluded};

/// Guard middleware redirecting unauthenticated guardians to the login page
/// and authenticated guardians away from it.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::RouteGuard;
///
/// let app = App::new().wrap(RouteGuard);
/// ```
#[derive(Clone)]
pub struct RouteGuard;

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardMiddleware { service }))
    }
}

/// Service wrapper produced by [`RouteGuard`].
pub struct RouteGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RouteGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_owned();
        if is_boundary_excluded(&path) {
            return pass_through(self.service.call(req));
        }

        let credential_present = req
            .cookie(TOKEN_COOKIE)
            .is_some_and(|cookie| !cookie.value().is_empty());

        match decide(&path, credential_present) {
            GuardDecision::Allow => pass_through(self.service.call(req)),
            GuardDecision::RedirectToLogin => {
                debug!(path = %path, "redirecting unauthenticated navigation to login");
                redirect(req, LOGIN_PATH)
            }
            GuardDecision::RedirectToDashboard => {
                debug!(path = %path, "redirecting authenticated navigation to dashboard");
                redirect(req, DASHBOARD_PATH)
            }
        }
    }
}

fn pass_through<B, F>(
    fut: F,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>
where
    B: MessageBody + 'static,
    F: std::future::Future<Output = Result<ServiceResponse<B>, Error>> + 'static,
{
    Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
}

fn redirect<B>(
    req: ServiceRequest,
    target: &'static str,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>
where
    B: MessageBody + 'static,
{
    let (request, _payload) = req.into_parts();
    let response = HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, target))
        .finish()
        .map_into_right_body();
    Box::pin(ready(Ok(ServiceResponse::new(request, response))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};

    fn guarded_app() -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<EitherBody<actix_web::body::BoxBody>>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(RouteGuard)
            .route(
                "/activities",
                web::get().to(|| async { HttpResponse::Ok().body("dashboard") }),
            )
            .route(
                "/login",
                web::get().to(|| async { HttpResponse::Ok().body("login") }),
            )
            .route(
                "/api/ping",
                web::get().to(|| async { HttpResponse::Ok().body("pong") }),
            )
    }

    fn token_cookie() -> Cookie<'static> {
        Cookie::new(TOKEN_COOKIE, "tok-1")
    }

    fn location(res: &ServiceResponse<EitherBody<actix_web::body::BoxBody>>) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn protected_path_redirects_to_login_without_credential() {
        let app = test::init_service(guarded_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/activities").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&res), LOGIN_PATH);
    }

    #[actix_web::test]
    async fn protected_path_passes_through_with_credential() {
        let app = test::init_service(guarded_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/activities")
                .cookie(token_cookie())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "dashboard");
    }

    #[actix_web::test]
    async fn login_redirects_to_dashboard_with_credential() {
        let app = test::init_service(guarded_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/login")
                .cookie(token_cookie())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&res), DASHBOARD_PATH);
    }

    #[actix_web::test]
    async fn root_redirects_per_session_state() {
        let app = test::init_service(guarded_app()).await;

        let anonymous =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(anonymous.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&anonymous), LOGIN_PATH);

        let authenticated = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/")
                .cookie(token_cookie())
                .to_request(),
        )
        .await;
        assert_eq!(authenticated.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&authenticated), DASHBOARD_PATH);
    }

    #[actix_web::test]
    async fn excluded_prefixes_bypass_the_guard() {
        let app = test::init_service(guarded_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/ping").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn empty_token_cookie_counts_as_no_credential() {
        let app = test::init_service(guarded_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/activities")
                .cookie(Cookie::new(TOKEN_COOKIE, ""))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&res), LOGIN_PATH);
    }
}
