//! Bearer-token identity extraction for HTTP handlers.
//!
//! Handlers receive a typed [`Identity`] threaded in by this extractor;
//! nothing downstream recovers the caller through untyped request-context
//! lookups. Every validation failure kind collapses into one opaque
//! unauthenticated response so clients cannot probe which check failed.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, Identity};

use super::error::ApiError;
use super::state::AppState;

/// Message shared by every unauthenticated response.
const AUTH_REQUIRED: &str = "authentication required";

/// A caller identity recovered from a validated bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(Identity);

impl Authenticated {
    /// The validated identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    /// Require the administrative capability flag.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.0.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden("administrator access required").into())
        }
    }
}

impl std::ops::Deref for Authenticated {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn unauthenticated() -> ApiError {
    Error::unauthorized(AUTH_REQUIRED).into()
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn resolve(req: &HttpRequest) -> Result<Authenticated, ApiError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(Error::internal("application state is not configured").into());
    };

    let Some(token) = bearer_token(req) else {
        debug!("request carried no bearer token");
        return Err(unauthenticated());
    };

    match state.validator.validate(token) {
        Ok(identity) => Ok(Authenticated(identity)),
        Err(kind) => {
            // The kind stays in the log; the response is deliberately opaque.
            debug!(kind = %kind, "bearer token rejected");
            Err(unauthenticated())
        }
    }
}

impl FromRequest for Authenticated {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

#[cfg(test)]
mod tests {
    //! Extractor-level coverage: header parsing and opaque failures.
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::Duration;
    use rstest::rstest;

    use super::*;
    use crate::api::test_support::{make_user, test_state};

    async fn whoami(caller: Authenticated) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse::Ok().body(caller.user_id().to_string()))
    }

    fn app_with(
        state: AppState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .route("/whoami", web::get().to(whoami))
    }

    #[actix_web::test]
    async fn a_valid_bearer_token_resolves_the_caller() {
        let stub = test_state();
        let user = make_user("ada@example.com", false);
        let token = stub.issue_token_for_user(&user);
        let app = test::init_service(app_with(stub.state.clone())).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, user.id().to_string().as_bytes());
    }

    #[rstest]
    #[case::no_header(None)]
    #[case::not_bearer(Some("Basic dXNlcjpwdw=="))]
    #[case::garbage(Some("Bearer not.a.token"))]
    #[actix_web::test]
    async fn failures_share_one_opaque_response(#[case] header: Option<&str>) {
        let stub = test_state();
        let app = test::init_service(app_with(stub.state.clone())).await;

        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], AUTH_REQUIRED);
    }

    #[actix_web::test]
    async fn an_expired_token_gets_the_same_opaque_response() {
        let stub = test_state();
        let user = make_user("ada@example.com", false);
        let token = stub.issue_token_for_user(&user);
        stub.clock.advance(Duration::hours(25));
        let app = test::init_service(app_with(stub.state.clone())).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], AUTH_REQUIRED);
    }
}
