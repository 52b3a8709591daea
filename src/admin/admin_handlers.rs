use axum::{extract::{Query, State}, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    doctor::doctor_dto::PaginatedResponse,
    error::Result,
    state::AppState,
    user::user_models::UserResponse,
};

/// Entity counts for the admin dashboard
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Entity counts"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Value>> {
    let users = state.user_repository.count().await?;
    let doctors = state.doctor_repository.count().await?;
    let appointments = state.appointment_repository.count().await?;
    let pending_appointments = state
        .appointment_repository
        .count_by_status("pending")
        .await?;
    let reports = state.report_repository.count().await?;

    Ok(Json(json!({
        "users": users,
        "doctors": doctors,
        "appointments": appointments,
        "pending_appointments": pending_appointments,
        "reports": reports,
    })))
}

#[derive(Deserialize)]
pub struct UserListQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let (users, total) = state.user_repository.find_all(page, limit).await?;
    let total_pages = (total as f64 / limit as f64).ceil() as u32;

    Ok(Json(PaginatedResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
        total,
        page,
        limit,
        total_pages,
    }))
}
