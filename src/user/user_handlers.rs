use super::{user_dto::UpdateProfileRequest, user_models::UserResponse};
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{extract::State, Extension, Json};
use uuid::Uuid;
use validator::Validate;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Own profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<UserResponse>> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state
        .user_repository
        .update_profile(
            user_id,
            payload.username.as_deref(),
            payload.bio.as_deref(),
            payload.avatar_url.as_deref(),
            payload.notification_enabled,
        )
        .await?;

    Ok(Json(user.into()))
}
