use super::symptom_models::{CreateSymptomRequest, Symptom};
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
pub struct SymptomListQuery {
    search: Option<String>,
}

pub async fn list_symptoms(
    State(state): State<AppState>,
    Query(query): Query<SymptomListQuery>,
) -> Result<Json<Vec<Symptom>>> {
    let symptoms = state
        .symptom_repository
        .find_all(query.search.as_deref())
        .await?;

    Ok(Json(symptoms))
}

pub async fn create_symptom(
    State(state): State<AppState>,
    Json(payload): Json<CreateSymptomRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let symptom = state
        .symptom_repository
        .create(
            &payload.name,
            payload.description.as_deref(),
            &payload.specialty,
        )
        .await
        .map_err(|e| {
            if let AppError::Database(ref db_err) = e {
                if db_err.to_string().contains("duplicate key") {
                    return AppError::BadRequest("Symptom already exists".to_string());
                }
            }
            e
        })?;

    Ok((StatusCode::CREATED, Json(symptom)))
}

pub async fn delete_symptom(
    State(state): State<AppState>,
    Path(symptom_id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state.symptom_repository.delete(symptom_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Symptom not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
