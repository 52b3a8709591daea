use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata for a medical report. The file itself lives in external
/// object storage; `file_url` points at it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub kind: String,
    pub file_url: String,
    pub notes: Option<String>,
    pub report_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
