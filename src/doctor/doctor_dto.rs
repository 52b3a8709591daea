use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDoctorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub specialty: String,
    #[validate(length(min = 1, max = 255))]
    pub hospital: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    pub phone: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDoctorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub specialty: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub hospital: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}
