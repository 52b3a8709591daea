use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

/// Requires the authenticated user's stored role to be `admin`.
/// The role is re-read from the database rather than trusted from the
/// token claims, so revoking admin takes effect immediately.
pub async fn admin_authorization(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

    if user.role != "admin" {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}
