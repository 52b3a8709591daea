use super::{
    appointment_dto::{CreateAppointmentRequest, UpdateAppointmentStatusRequest},
    appointment_models::{Appointment, AppointmentStatus},
};
use crate::{
    doctor::doctor_dto::PaginatedResponse,
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Book an appointment with a doctor
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Validation error or slot taken"),
        (status = 404, description = "Doctor not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let appointment = state.appointment_service.book(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// List the authenticated user's appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "Appointments", body = Vec<Appointment>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<Appointment>>> {
    let appointments = state
        .appointment_repository
        .find_all_by_user(user_id)
        .await?;

    Ok(Json(appointments))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>> {
    let appointment = state
        .appointment_repository
        .find_by_id(appointment_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

    Ok(Json(appointment))
}

pub async fn cancel_appointment(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>> {
    let appointment = state
        .appointment_service
        .cancel(user_id, appointment_id)
        .await?;

    Ok(Json(appointment))
}

#[derive(Deserialize)]
pub struct AppointmentListQuery {
    status: Option<AppointmentStatus>,
    page: Option<u32>,
    limit: Option<u32>,
}

pub async fn admin_list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<PaginatedResponse<Appointment>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let (appointments, total) = state
        .appointment_repository
        .find_all(query.status, page, limit)
        .await?;

    let total_pages = (total as f64 / limit as f64).ceil() as u32;

    Ok(Json(PaginatedResponse {
        data: appointments,
        total,
        page,
        limit,
        total_pages,
    }))
}

pub async fn admin_update_appointment_status(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<Appointment>> {
    let appointment = state
        .appointment_service
        .set_status(appointment_id, payload.status)
        .await?;

    Ok(Json(appointment))
}
