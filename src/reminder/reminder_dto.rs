use super::reminder_models::{Recurrence, ReminderKind};
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReminderRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub kind: ReminderKind,
    /// `HH:MM` (24-hour)
    pub fire_time: String,
    pub date: Option<NaiveDate>,
    pub recurrence: Option<Recurrence>,
    pub days_of_week: Option<Vec<i16>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReminderRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub kind: Option<ReminderKind>,
    pub fire_time: Option<String>,
    pub date: Option<NaiveDate>,
    pub recurrence: Option<Recurrence>,
    pub days_of_week: Option<Vec<i16>>,
    pub is_completed: Option<bool>,
}

/// Cross-field rules that `validator` attributes cannot express: weekly
/// reminders need at least one day, and days must be 0..=6 (Sunday = 0).
pub fn validate_recurrence_rules(recurrence: Recurrence, days_of_week: &[i16]) -> Result<()> {
    if days_of_week.iter().any(|d| !(0..=6).contains(d)) {
        return Err(AppError::Validation(
            "days_of_week entries must be between 0 and 6".to_string(),
        ));
    }

    if recurrence == Recurrence::Weekly && days_of_week.is_empty() {
        return Err(AppError::Validation(
            "A weekly reminder needs at least one entry in days_of_week".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_without_days_is_rejected() {
        assert!(validate_recurrence_rules(Recurrence::Weekly, &[]).is_err());
    }

    #[test]
    fn weekly_with_days_is_accepted() {
        assert!(validate_recurrence_rules(Recurrence::Weekly, &[1, 3, 5]).is_ok());
    }

    #[test]
    fn out_of_range_day_is_rejected() {
        assert!(validate_recurrence_rules(Recurrence::Daily, &[7]).is_err());
        assert!(validate_recurrence_rules(Recurrence::Daily, &[-1]).is_err());
    }

    #[test]
    fn non_weekly_without_days_is_accepted() {
        assert!(validate_recurrence_rules(Recurrence::None, &[]).is_ok());
        assert!(validate_recurrence_rules(Recurrence::Monthly, &[]).is_ok());
    }
}
