//! Booking management controllers

use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use tracing::instrument;
use uuid::Uuid;

use kronium_core::domain::bookings::BookingId;

use crate::presentation::auth::AdminAuth;
use crate::presentation::controllers::ConsoleState;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::{
    BookingListQuery, BookingListResponse, BookingResponse, ErrorResponse,
    UpdateBookingStatusRequest,
};

/// GET /api/v1/bookings - List bookings with per-status counts
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings matching the filter", body = BookingListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Unknown status filter", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth, query))]
pub async fn list_bookings(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<BookingListResponse>, Response> {
    let query = query
        .into_query()
        .map_err(|e| application_error_to_response(e.into()))?;

    let list = state
        .bookings
        .list_bookings_use_case
        .execute(query)
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(list.into()))
}

/// GET /api/v1/bookings/{id} - Fetch one booking
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking with customer and service", body = BookingResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn get_booking(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, Response> {
    let details = state
        .bookings
        .get_booking_use_case
        .execute(BookingId::new(id))
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(details.into()))
}

/// PATCH /api/v1/bookings/{id}/status - Move a booking along its lifecycle
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}/status",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Booking after the write", body = BookingResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed, or the booking changed concurrently", body = ErrorResponse),
        (status = 422, description = "Unknown status", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(user_id = %auth.0.user_id, status = %request.status))]
pub async fn update_booking_status(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, Response> {
    let status = request
        .status()
        .map_err(|e| application_error_to_response(e.into()))?;

    let details = state
        .bookings
        .update_booking_status_use_case
        .execute(BookingId::new(id), status)
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(details.into()))
}
