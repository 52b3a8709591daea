use super::{chat_dto::ChatRequest, chat_models::ChatMessage};
use crate::{
    doctor::doctor_dto::PaginatedResponse,
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Send a message to the symptom analysis service
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 201, description = "Exchange stored", body = ChatMessage),
        (status = 502, description = "Chat service unavailable"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "chat",
    security(("bearer_auth" = []))
)]
pub async fn send_chat_message(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let exchange = state
        .chat_service
        .send_message(user_id, &payload.message)
        .await?;

    Ok((StatusCode::CREATED, Json(exchange)))
}

#[derive(Deserialize)]
pub struct ChatHistoryQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

pub async fn get_chat_history(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<ChatHistoryQuery>,
) -> Result<Json<PaginatedResponse<ChatMessage>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let (messages, total) = state
        .chat_repository
        .find_all_by_user(user_id, page, limit)
        .await?;

    let total_pages = (total as f64 / limit as f64).ceil() as u32;

    Ok(Json(PaginatedResponse {
        data: messages,
        total,
        page,
        limit,
        total_pages,
    }))
}

pub async fn clear_chat_history(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<StatusCode> {
    state.chat_repository.delete_all_by_user(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
