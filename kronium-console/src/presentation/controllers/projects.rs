//! Project management controllers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use tracing::instrument;
use uuid::Uuid;

use kronium_core::domain::projects::ProjectId;

use crate::presentation::auth::AdminAuth;
use crate::presentation::controllers::ConsoleState;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::{
    ErrorResponse, ProjectListQuery, ProjectListResponse, ProjectResponse,
    UpdateProjectStatusRequest,
};

/// GET /api/v1/projects - List projects with per-status counts
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Projects matching the filter", body = ProjectListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Unknown status filter", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth, query))]
pub async fn list_projects(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ProjectListResponse>, Response> {
    let query = query
        .into_query()
        .map_err(|e| application_error_to_response(e.into()))?;

    let list = state
        .projects
        .list_projects_use_case
        .execute(query)
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(list.into()))
}

/// PATCH /api/v1/projects/{id}/status - Set a project's status
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{id}/status",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = UpdateProjectStatusRequest,
    responses(
        (status = 200, description = "Project after the write", body = ProjectResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 409, description = "Project already has that status", body = ErrorResponse),
        (status = 422, description = "Unknown status", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.0.user_id, status = %request.status))]
pub async fn update_project_status(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProjectStatusRequest>,
) -> Result<Json<ProjectResponse>, Response> {
    let status = request
        .status()
        .map_err(|e| application_error_to_response(e.into()))?;

    let details = state
        .projects
        .update_project_status_use_case
        .execute(ProjectId::new(id), status)
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(details.into()))
}

/// DELETE /api/v1/projects/{id} - Delete a project
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(user_id = %auth.0.user_id))]
pub async fn delete_project(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Response> {
    state
        .projects
        .delete_project_use_case
        .execute(ProjectId::new(id))
        .await
        .map_err(application_error_to_response)?;

    Ok(StatusCode::NO_CONTENT)
}
