use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub kind: String,
    #[validate(url)]
    pub file_url: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub report_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReportRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub kind: Option<String>,
    #[validate(url)]
    pub file_url: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub report_date: Option<NaiveDate>,
}
