//! Service catalog controllers

use axum::{
    extract::{Multipart, Path, Query, State, multipart::MultipartError},
    http::StatusCode,
    response::{Json, Response},
};
use bytes::{Bytes, BytesMut};
use tracing::{info, instrument};
use uuid::Uuid;

use kronium_core::application::errors::ApplicationError;
use kronium_core::domain::catalog::ServiceId;
use kronium_core::domain::errors::DomainError;
use kronium_core::domain::storage::StorageError;

use crate::presentation::auth::AdminAuth;
use crate::presentation::controllers::ConsoleState;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::{
    ErrorResponse, ImageUploadResponse, ServiceListQuery, ServiceListResponse, ServiceRequest,
    ServiceResponse,
};

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "file";

/// GET /api/v1/services - List services, newest first
#[utoipa::path(
    get,
    path = "/api/v1/services",
    tag = "services",
    params(ServiceListQuery),
    responses(
        (status = 200, description = "Services matching the filter", body = ServiceListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth, query))]
pub async fn list_services(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Query(query): Query<ServiceListQuery>,
) -> Result<Json<ServiceListResponse>, Response> {
    let services = state
        .catalog
        .list_services_use_case
        .execute(query.into())
        .await
        .map_err(application_error_to_response)?;

    let services: Vec<ServiceResponse> = services.into_iter().map(Into::into).collect();
    Ok(Json(ServiceListResponse {
        total: services.len(),
        services,
    }))
}

/// GET /api/v1/services/{id} - Fetch one service
#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn get_service(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, Response> {
    let service = state
        .catalog
        .get_service_use_case
        .execute(ServiceId::new(id))
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(service.into()))
}

/// POST /api/v1/services - Create a service
#[utoipa::path(
    post,
    path = "/api/v1/services",
    tag = "services",
    request_body = ServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 422, description = "Invalid form field", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.0.user_id))]
pub async fn create_service(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Json(request): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), Response> {
    let service = state
        .catalog
        .create_service_use_case
        .execute(request.into())
        .await
        .map_err(application_error_to_response)?;

    info!(service_id = %service.service_id, "Service created");
    Ok((StatusCode::CREATED, Json(service.into())))
}

/// PUT /api/v1/services/{id} - Replace a service's fields
#[utoipa::path(
    put,
    path = "/api/v1/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service ID")),
    request_body = ServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 422, description = "Invalid form field", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.0.user_id))]
pub async fn update_service(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<ServiceRequest>,
) -> Result<Json<ServiceResponse>, Response> {
    let service = state
        .catalog
        .update_service_use_case
        .execute(ServiceId::new(id), request.into())
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(service.into()))
}

/// DELETE /api/v1/services/{id} - Delete a service
#[utoipa::path(
    delete,
    path = "/api/v1/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(user_id = %auth.0.user_id))]
pub async fn delete_service(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Response> {
    state
        .catalog
        .delete_service_use_case
        .execute(ServiceId::new(id))
        .await
        .map_err(application_error_to_response)?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/services/{id}/active - Toggle whether a service is offered
#[utoipa::path(
    patch,
    path = "/api/v1/services/{id}/active",
    tag = "services",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service with its new active flag", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(user_id = %auth.0.user_id))]
pub async fn toggle_service_active(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, Response> {
    let service = state
        .catalog
        .toggle_service_active_use_case
        .execute(ServiceId::new(id))
        .await
        .map_err(application_error_to_response)?;

    info!(service_id = %service.service_id, is_active = service.is_active, "Service toggled");
    Ok(Json(service.into()))
}

/// POST /api/v1/services/images - Upload a service image
#[utoipa::path(
    post,
    path = "/api/v1/services/images",
    tag = "services",
    request_body(content_type = "multipart/form-data", description = "Image in the `file` field"),
    responses(
        (status = 201, description = "Image stored", body = ImageUploadResponse),
        (status = 413, description = "Image exceeds the size ceiling", body = ErrorResponse),
        (status = 415, description = "Content type not allowed", body = ErrorResponse),
        (status = 422, description = "No file in the request", body = ErrorResponse),
        (status = 502, description = "Object storage rejected the upload", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, multipart), fields(user_id = %auth.0.user_id))]
pub async fn upload_service_image(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ImageUploadResponse>), Response> {
    let (content_type, body) = read_image(multipart, state.catalog.max_upload_bytes)
        .await
        .map_err(application_error_to_response)?;

    let stored = state
        .catalog
        .upload_service_image_use_case
        .execute(&content_type, body)
        .await
        .map_err(application_error_to_response)?;

    Ok((StatusCode::CREATED, Json(stored.into())))
}

fn malformed_upload(error: MultipartError) -> ApplicationError {
    DomainError::validation(IMAGE_FIELD, error.body_text()).into()
}

/// Pull the image out of the form, refusing to buffer past `max_bytes`
async fn read_image(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<(String, Bytes), ApplicationError> {
    while let Some(mut field) = multipart.next_field().await.map_err(malformed_upload)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let mut body = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(malformed_upload)? {
            body.extend_from_slice(&chunk);
            if body.len() > max_bytes {
                return Err(StorageError::TooLarge {
                    size: body.len(),
                    max: max_bytes,
                }
                .into());
            }
        }

        return Ok((content_type, body.freeze()));
    }

    Err(DomainError::validation(IMAGE_FIELD, "no file provided").into())
}
