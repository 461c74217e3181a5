//! Authentication API handler.
//!
//! A malformed credential payload is answered with the same generic
//! invalid-credentials envelope as a failed verification: the response never
//! reveals whether the email exists, whether the password was wrong, or
//! whether the payload shape was the problem.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, INVALID_CREDENTIALS, LoginCredentials};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use super::users::UserPayload;

/// Credential request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthParams {
    /// Email address to look up.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plaintext password to verify.
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: UserPayload,
    /// Opaque session token to echo back in the authorization header.
    pub token: String,
}

fn invalid_credentials() -> ApiError {
    Error::unauthorized(INVALID_CREDENTIALS).into()
}

/// Authenticate credentials and issue a session token.
#[utoipa::path(
    post,
    path = "/api/v1/auth",
    request_body = AuthParams,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = super::error::ApiError)
    ),
    tags = ["auth"],
    operation_id = "authenticate"
)]
#[post("/auth")]
pub async fn authenticate(
    state: web::Data<AppState>,
    params: web::Json<AuthParams>,
) -> ApiResult<web::Json<AuthResponse>> {
    let params = params.into_inner();
    let Ok(credentials) = LoginCredentials::try_from_parts(&params.email, &params.password)
    else {
        return Err(invalid_credentials());
    };

    let authenticated = state
        .auth
        .authenticate(&credentials)
        .await
        .map_err(ApiError::from)?;

    Ok(web::Json(AuthResponse {
        user: UserPayload::from(&authenticated.user),
        token: authenticated.token.into(),
    }))
}

#[cfg(test)]
mod tests {
    //! Endpoint-level coverage for the merged-failure contract.
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::json;

    use super::*;
    use crate::api::test_support::test_state;

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
            .service(web::scope("/api/v1").service(authenticate))
    }

    fn auth_request(email: &str, password: &str) -> actix_http::Request {
        test::TestRequest::post()
            .uri("/api/v1/auth")
            .set_json(json!({"email": email, "password": password}))
            .to_request()
    }

    #[actix_web::test]
    async fn valid_credentials_return_user_and_token() {
        let stub = test_state();
        let (user, _) = stub.register_user("ada@example.com", false);
        let app = test::init_service(app_with(stub.state.clone())).await;

        let resp = test::call_service(&app, auth_request("ada@example.com", "s3cretpass")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["id"], user.id().to_string());
        assert_eq!(body["user"]["email"], "ada@example.com");

        let token = body["token"].as_str().expect("token is a string");
        let identity = stub
            .state
            .validator
            .validate(token)
            .expect("issued token validates");
        assert_eq!(identity.user_id(), user.id());
    }

    #[actix_web::test]
    async fn all_failure_paths_share_identical_bodies() {
        let stub = test_state();
        stub.register_user("ada@example.com", false);
        let app = test::init_service(app_with(stub.state.clone())).await;

        let unknown =
            test::call_service(&app, auth_request("nobody@example.com", "s3cretpass")).await;
        let wrong = test::call_service(&app, auth_request("ada@example.com", "wr0ngpass")).await;
        let malformed =
            test::call_service(&app, auth_request("not-an-email", "s3cretpass")).await;

        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);

        let unknown_body = test::read_body(unknown).await;
        let wrong_body = test::read_body(wrong).await;
        let malformed_body = test::read_body(malformed).await;
        assert_eq!(unknown_body, wrong_body);
        assert_eq!(unknown_body, malformed_body);
    }
}
