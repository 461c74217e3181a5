//! Users API handlers.
//!
//! Plain pass-through CRUD: parse, call the repository, serialise.
//! Registration also runs the password hasher before the insert.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Error, User, UserId, password, user::NAME_MIN};

use super::error::{ApiError, ApiResult};
use super::identity::Authenticated;
use super::state::AppState;

/// Minimum accepted password length for registration.
pub const PASSWORD_MIN: usize = 7;

/// Wire representation of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Stable identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Administrative capability flag.
    pub admin: bool,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            email: user.email().to_string(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            admin: user.is_admin(),
        }
    }
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserParams {
    /// Email address; must be unique.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Name-update request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserParams {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Response body naming the record a mutation touched.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutatedResponse {
    /// Identifier of the affected record.
    #[schema(value_type = String)]
    pub id: UserId,
}

pub(super) fn map_user_persistence_error(error: UserPersistenceError) -> ApiError {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}")).into()
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}")).into()
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered")).into()
        }
    }
}

fn validate_registration(params: &CreateUserParams) -> Result<Email, ApiError> {
    let email = Email::new(params.email.as_str())
        .map_err(|err| ApiError::from(Error::invalid_request(err.to_string())))?;
    if params.first_name.trim().chars().count() < NAME_MIN {
        return Err(
            Error::invalid_request(format!("first name must be at least {NAME_MIN} characters"))
                .into(),
        );
    }
    if params.last_name.trim().chars().count() < NAME_MIN {
        return Err(
            Error::invalid_request(format!("last name must be at least {NAME_MIN} characters"))
                .into(),
        );
    }
    if params.password.chars().count() < PASSWORD_MIN {
        return Err(Error::invalid_request(format!(
            "password must be at least {PASSWORD_MIN} characters"
        ))
        .into());
    }
    Ok(email)
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserParams,
    responses(
        (status = 201, description = "User created", body = UserPayload),
        (status = 400, description = "Invalid registration payload", body = super::error::ApiError),
        (status = 409, description = "Email already registered", body = super::error::ApiError)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    params: web::Json<CreateUserParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    let email = validate_registration(&params)?;

    // bcrypt at production cost is deliberately slow; keep it off the
    // async executor.
    let plaintext = params.password.clone();
    let hash = web::block(move || password::hash(&plaintext))
        .await
        .map_err(|err| ApiError::from(Error::internal(format!("hashing task failed: {err}"))))?
        .map_err(|err| ApiError::from(Error::internal(err.to_string())))?;

    let user = User::new(
        UserId::random(),
        email,
        params.first_name,
        params.last_name,
        hash,
        false,
        chrono::Utc::now(),
    )
    .map_err(|err| ApiError::from(Error::invalid_request(err.to_string())))?;

    state
        .users
        .insert(&user)
        .await
        .map_err(map_user_persistence_error)?;

    Ok(HttpResponse::Created().json(UserPayload::from(&user)))
}

/// List known users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserPayload]),
        (status = 401, description = "Unauthorised", body = super::error::ApiError)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<AppState>,
    _caller: Authenticated,
) -> ApiResult<web::Json<Vec<UserPayload>>> {
    let users = state
        .users
        .list()
        .await
        .map_err(map_user_persistence_error)?;
    Ok(web::Json(users.iter().map(UserPayload::from).collect()))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserPayload),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 404, description = "User not found", body = super::error::ApiError)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserPayload>> {
    let id = parse_user_id(&path)?;
    let user = state
        .users
        .find_by_id(&id)
        .await
        .map_err(map_user_persistence_error)?
        .ok_or_else(|| ApiError::from(Error::not_found("user not found")))?;
    Ok(web::Json(UserPayload::from(&user)))
}

/// Update a user's names.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserParams,
    responses(
        (status = 200, description = "User updated", body = MutatedResponse),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 404, description = "User not found", body = super::error::ApiError)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    _caller: Authenticated,
    path: web::Path<String>,
    params: web::Json<UpdateUserParams>,
) -> ApiResult<web::Json<MutatedResponse>> {
    let id = parse_user_id(&path)?;
    let params = params.into_inner();
    if params.first_name.trim().chars().count() < NAME_MIN
        || params.last_name.trim().chars().count() < NAME_MIN
    {
        return Err(
            Error::invalid_request(format!("names must be at least {NAME_MIN} characters")).into(),
        );
    }

    let updated = state
        .users
        .update_names(&id, &params.first_name, &params.last_name)
        .await
        .map_err(map_user_persistence_error)?;
    if !updated {
        return Err(Error::not_found("user not found").into());
    }
    Ok(web::Json(MutatedResponse { id }))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MutatedResponse),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 404, description = "User not found", body = super::error::ApiError)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<MutatedResponse>> {
    let id = parse_user_id(&path)?;
    let deleted = state
        .users
        .delete(&id)
        .await
        .map_err(map_user_persistence_error)?;
    if !deleted {
        return Err(Error::not_found("user not found").into());
    }
    Ok(web::Json(MutatedResponse { id }))
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|_| Error::invalid_request("user id must be a valid UUID").into())
}
