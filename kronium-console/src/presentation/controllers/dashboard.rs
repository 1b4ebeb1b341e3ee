//! Dashboard controller

use axum::{
    extract::State,
    response::{Json, Response},
};
use tracing::instrument;

use crate::presentation::auth::AdminAuth;
use crate::presentation::controllers::ConsoleState;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::{DashboardResponse, ErrorResponse};

/// GET /api/v1/dashboard - Overview counts and recent activity
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Data source unavailable", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth), fields(user_id = %auth.0.user_id))]
pub async fn get_dashboard(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
) -> Result<Json<DashboardResponse>, Response> {
    let summary = state
        .dashboard_use_case
        .execute()
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(summary.into()))
}
