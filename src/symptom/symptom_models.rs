use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Catalog entry mapping a symptom to the doctor specialty it is
/// usually seen by.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Symptom {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub specialty: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSymptomRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub specialty: String,
}
