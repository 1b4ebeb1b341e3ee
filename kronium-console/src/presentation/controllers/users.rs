//! User management controllers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use tracing::{info, instrument};
use uuid::Uuid;

use kronium_core::domain::auth::UserId;

use crate::presentation::auth::AdminAuth;
use crate::presentation::controllers::ConsoleState;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::{
    CreateUserRequest, CreatedUserResponse, ErrorResponse, UserListQuery, UserListResponse,
    UserResponse,
};

/// GET /api/v1/users - List users, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Users matching the filter", body = UserListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Unknown role", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth, query))]
pub async fn list_users(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserListResponse>, Response> {
    let query = query
        .into_query()
        .map_err(|e| application_error_to_response(e.into()))?;

    let users = state
        .users
        .list_users_use_case
        .execute(query)
        .await
        .map_err(application_error_to_response)?;

    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(UserListResponse {
        total: users.len(),
        users,
    }))
}

/// GET /api/v1/users/{id} - Fetch one user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn get_user(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, Response> {
    let user = state
        .users
        .get_user_use_case
        .execute(UserId::new(id))
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(user.into()))
}

/// POST /api/v1/users - Create a user with a temporary password
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created; the temporary password is returned once", body = CreatedUserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.0.user_id))]
pub async fn create_user(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), Response> {
    let created = state
        .users
        .create_user_use_case
        .execute(request.into())
        .await
        .map_err(application_error_to_response)?;

    info!(new_user_id = %created.user.user_id, "User created from console");

    Ok((StatusCode::CREATED, Json(created.into())))
}
