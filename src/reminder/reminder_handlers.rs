use super::{
    reminder_dto::{validate_recurrence_rules, CreateReminderRequest, UpdateReminderRequest},
    reminder_models::{Recurrence, Reminder},
    reminder_scheduler::parse_fire_time,
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
use tracing::error;
use uuid::Uuid;
use validator::Validate;

/// List the authenticated user's reminders
#[utoipa::path(
    get,
    path = "/api/reminders",
    responses(
        (status = 200, description = "Reminders", body = Vec<Reminder>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn list_reminders(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<Reminder>>> {
    let reminders = state.reminder_repository.find_all_by_user(user_id).await?;

    Ok(Json(reminders))
}

/// Create a reminder and install its daily job
#[utoipa::path(
    post,
    path = "/api/reminders",
    request_body = CreateReminderRequest,
    responses(
        (status = 201, description = "Reminder created", body = Reminder),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn create_reminder(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateReminderRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    parse_fire_time(&payload.fire_time)?;

    let recurrence = payload.recurrence.unwrap_or(Recurrence::None);
    let days_of_week = payload.days_of_week.unwrap_or_default();
    validate_recurrence_rules(recurrence, &days_of_week)?;

    let reminder = state
        .reminder_repository
        .create(
            user_id,
            &payload.title,
            payload.description.as_deref(),
            payload.kind,
            &payload.fire_time,
            payload.date,
            recurrence,
            &days_of_week,
        )
        .await?;

    // Scheduling failures are invisible to the client; the reminder row
    // is the source of truth and the job can be rebuilt at restart.
    if let Err(e) = state.reminder_scheduler.schedule(&reminder).await {
        error!("Failed to schedule reminder {}: {}", reminder.id, e);
    }

    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Update a reminder; a changed fire time re-installs its job
#[utoipa::path(
    put,
    path = "/api/reminders/{id}",
    params(("id" = Uuid, Path, description = "Reminder ID")),
    request_body = UpdateReminderRequest,
    responses(
        (status = 200, description = "Reminder updated", body = Reminder),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Reminder not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn update_reminder(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(reminder_id): Path<Uuid>,
    Json(payload): Json<UpdateReminderRequest>,
) -> Result<Json<Reminder>> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if let Some(ref fire_time) = payload.fire_time {
        parse_fire_time(fire_time)?;
    }

    let existing = state
        .reminder_repository
        .find_by_id(reminder_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    let recurrence = payload.recurrence.unwrap_or(existing.recurrence);
    let days_of_week = payload
        .days_of_week
        .clone()
        .unwrap_or_else(|| existing.days_of_week.clone());
    validate_recurrence_rules(recurrence, &days_of_week)?;

    let reminder = state
        .reminder_repository
        .update(
            reminder_id,
            user_id,
            payload.title.as_deref(),
            payload.description.as_deref(),
            payload.kind,
            payload.fire_time.as_deref(),
            payload.date,
            payload.recurrence,
            payload.days_of_week,
            payload.is_completed,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    if reminder.fire_time != existing.fire_time {
        if let Err(e) = state.reminder_scheduler.schedule(&reminder).await {
            error!("Failed to reschedule reminder {}: {}", reminder.id, e);
        }
    }

    Ok(Json(reminder))
}

/// Delete a reminder and its job
#[utoipa::path(
    delete,
    path = "/api/reminders/{id}",
    params(("id" = Uuid, Path, description = "Reminder ID")),
    responses(
        (status = 204, description = "Reminder deleted"),
        (status = 404, description = "Reminder not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn delete_reminder(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(reminder_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .reminder_repository
        .find_by_id(reminder_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    state.reminder_scheduler.cancel(reminder_id).await;

    state.reminder_repository.delete(reminder_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
