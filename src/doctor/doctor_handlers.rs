use super::{
    doctor_dto::{CreateDoctorRequest, PaginatedResponse, UpdateDoctorRequest},
    doctor_models::Doctor,
    doctor_repository::DoctorFilters,
};
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize)]
pub struct DoctorListQuery {
    specialty: Option<String>,
    search: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

/// Browse the doctor directory
#[utoipa::path(
    get,
    path = "/api/doctors",
    params(
        ("specialty" = Option<String>, Query, description = "Filter by specialty"),
        ("search" = Option<String>, Query, description = "Search by name or hospital"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("limit" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of doctors", body = PaginatedResponse<Doctor>)
    ),
    tag = "doctors"
)]
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(query): Query<DoctorListQuery>,
) -> Result<Json<PaginatedResponse<Doctor>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let (doctors, total) = state
        .doctor_repository
        .find_all(DoctorFilters {
            specialty: query.specialty,
            search: query.search,
            page,
            limit,
        })
        .await?;

    let total_pages = (total as f64 / limit as f64).ceil() as u32;

    Ok(Json(PaginatedResponse {
        data: doctors,
        total,
        page,
        limit,
        total_pages,
    }))
}

/// Fetch a single doctor
#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    params(("id" = Uuid, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor", body = Doctor),
        (status = 404, description = "Doctor not found")
    ),
    tag = "doctors"
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Doctor>> {
    let doctor = state
        .doctor_repository
        .find_by_id(doctor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(doctor))
}

pub async fn create_doctor(
    State(state): State<AppState>,
    Json(payload): Json<CreateDoctorRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let doctor = state
        .doctor_repository
        .create(
            &payload.name,
            &payload.specialty,
            &payload.hospital,
            &payload.address,
            payload.phone.as_deref(),
            payload.image_url.as_deref(),
            payload.rating.unwrap_or(0.0),
            payload.bio.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(doctor)))
}

pub async fn update_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
    Json(payload): Json<UpdateDoctorRequest>,
) -> Result<Json<Doctor>> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let doctor = state
        .doctor_repository
        .update(
            doctor_id,
            payload.name.as_deref(),
            payload.specialty.as_deref(),
            payload.hospital.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.image_url.as_deref(),
            payload.rating,
            payload.bio.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(doctor))
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state.doctor_repository.delete(doctor_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
