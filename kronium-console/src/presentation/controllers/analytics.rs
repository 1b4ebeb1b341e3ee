//! Analytics controllers

use axum::{
    extract::{Query, State},
    response::{Json, Response},
};
use tracing::instrument;

use crate::presentation::auth::AdminAuth;
use crate::presentation::controllers::ConsoleState;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::{AnalyticsQuery, AnalyticsResponse, ErrorResponse};

/// GET /api/v1/analytics - Build a report for a trailing window
///
/// Every call is a refresh. When a newer refresh from the same session
/// starts before this one finishes, the response is marked `stale` and is
/// not kept as the session's latest report.
#[utoipa::path(
    get,
    path = "/api/v1/analytics",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Analytics report", body = AnalyticsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Window size not offered", body = ErrorResponse),
        (status = 500, description = "Data source unavailable", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, query), fields(user_id = %auth.0.user_id, days = ?query.days))]
pub async fn get_analytics(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, Response> {
    let refresh = state
        .analytics
        .refresh_analytics_use_case
        .execute(&auth.0, query.days)
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(AnalyticsResponse::from_refresh(
        &refresh,
        state.analytics.category_display_limit,
    )))
}

/// GET /api/v1/analytics/latest - Last report committed for this session
#[utoipa::path(
    get,
    path = "/api/v1/analytics/latest",
    tag = "analytics",
    responses(
        (status = 200, description = "Last-known analytics report", body = AnalyticsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No report yet in this session", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(user_id = %auth.0.user_id))]
pub async fn get_latest_analytics(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
) -> Result<Json<AnalyticsResponse>, Response> {
    let committed = state
        .analytics
        .get_latest_analytics_use_case
        .execute(&auth.0)
        .map_err(application_error_to_response)?;

    Ok(Json(AnalyticsResponse::from_committed(
        &committed,
        state.analytics.category_display_limit,
    )))
}
