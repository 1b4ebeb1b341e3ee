//! Support chat controllers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Json, Response},
};
use tracing::instrument;
use uuid::Uuid;

use kronium_core::domain::auth::UserId;

use crate::presentation::auth::AdminAuth;
use crate::presentation::controllers::ConsoleState;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::{
    ChatMessageDto, ChatMessagesResponse, ChatSessionListResponse, ErrorResponse,
    SendChatMessageRequest,
};

/// GET /api/v1/chat/sessions - One conversation per customer with bookings
#[utoipa::path(
    get,
    path = "/api/v1/chat/sessions",
    tag = "chat",
    responses(
        (status = 200, description = "Chat sessions", body = ChatSessionListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn list_chat_sessions(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
) -> Result<Json<ChatSessionListResponse>, Response> {
    let sessions = state
        .chat
        .list_sessions_use_case
        .execute()
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(ChatSessionListResponse {
        sessions: sessions.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/chat/sessions/{user_id}/messages - Conversation with a customer
#[utoipa::path(
    get,
    path = "/api/v1/chat/sessions/{user_id}/messages",
    tag = "chat",
    params(("user_id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Messages, oldest first", body = ChatMessagesResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn get_chat_messages(
    State(state): State<ConsoleState>,
    _auth: AdminAuth,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ChatMessagesResponse>, Response> {
    let messages = state
        .chat
        .get_messages_use_case
        .execute(UserId::new(user_id))
        .await
        .map_err(application_error_to_response)?;

    Ok(Json(ChatMessagesResponse {
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/v1/chat/sessions/{user_id}/messages - Reply to a customer
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions/{user_id}/messages",
    tag = "chat",
    params(("user_id" = Uuid, Path, description = "Customer ID")),
    request_body = SendChatMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = ChatMessageDto),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 422, description = "Blank or oversized message", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request), fields(admin_id = %auth.0.user_id))]
pub async fn send_chat_message(
    State(state): State<ConsoleState>,
    auth: AdminAuth,
    Path(user_id): Path<Uuid>,
    Json(request): Json<SendChatMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessageDto>), Response> {
    let message = state
        .chat
        .send_message_use_case
        .execute(UserId::new(user_id), &auth.0, &request.message)
        .await
        .map_err(application_error_to_response)?;

    Ok((StatusCode::CREATED, Json(message.into())))
}
