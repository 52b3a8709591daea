use super::{
    report_dto::{CreateReportRequest, UpdateReportRequest},
    report_models::Report,
};
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

/// List the authenticated user's reports
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Reports", body = Vec<Report>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports",
    security(("bearer_auth" = []))
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<Report>>> {
    let reports = state.report_repository.find_all_by_user(user_id).await?;

    Ok(Json(reports))
}

pub async fn create_report(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state
        .report_repository
        .create(
            user_id,
            &payload.title,
            &payload.kind,
            &payload.file_url,
            payload.notes.as_deref(),
            payload.report_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn get_report(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<Report>> {
    let report = state
        .report_repository
        .find_by_id(report_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    Ok(Json(report))
}

pub async fn update_report(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(report_id): Path<Uuid>,
    Json(payload): Json<UpdateReportRequest>,
) -> Result<Json<Report>> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state
        .report_repository
        .update(
            report_id,
            user_id,
            payload.title.as_deref(),
            payload.kind.as_deref(),
            payload.file_url.as_deref(),
            payload.notes.as_deref(),
            payload.report_date,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    Ok(Json(report))
}

pub async fn delete_report(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(report_id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state.report_repository.delete(report_id, user_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Report not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
