use super::notification_models::{NotificationKind, RecurrencePattern};
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

fn default_advance_notice() -> bool {
    true
}

fn default_advance_notice_minutes() -> i32 {
    60
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    pub kind: NotificationKind,
    #[validate(length(min = 1, max = 50))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    pub schedule_time: DateTime<Utc>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[serde(default = "default_advance_notice")]
    pub advance_notice: bool,
    #[serde(default = "default_advance_notice_minutes")]
    #[validate(range(min = 1, max = 1440))]
    pub advance_notice_minutes: i32,
}

impl CreateNotificationRequest {
    /// Rules beyond field-level attributes: the fire time must still be
    /// ahead of us, and recurrence flags must agree.
    pub fn check_rules(&self, now: DateTime<Utc>) -> Result<()> {
        if self.schedule_time <= now {
            return Err(AppError::Validation(
                "schedule_time must be in the future".to_string(),
            ));
        }

        if self.is_recurring != self.recurrence_pattern.is_some() {
            return Err(AppError::Validation(
                "is_recurring requires recurrence_pattern, and vice versa".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(schedule_offset: Duration) -> CreateNotificationRequest {
        CreateNotificationRequest {
            kind: NotificationKind::Medicine,
            title: "Take pill".to_string(),
            description: "Two with water".to_string(),
            schedule_time: Utc::now() + schedule_offset,
            is_recurring: false,
            recurrence_pattern: None,
            advance_notice: true,
            advance_notice_minutes: 60,
        }
    }

    #[test]
    fn past_schedule_time_is_rejected() {
        let payload = request(Duration::minutes(-5));
        assert!(payload.check_rules(Utc::now()).is_err());
    }

    #[test]
    fn future_schedule_time_is_accepted() {
        let payload = request(Duration::minutes(5));
        assert!(payload.check_rules(Utc::now()).is_ok());
    }

    #[test]
    fn recurring_without_pattern_is_rejected() {
        let mut payload = request(Duration::minutes(5));
        payload.is_recurring = true;
        assert!(payload.check_rules(Utc::now()).is_err());

        payload.is_recurring = false;
        payload.recurrence_pattern = Some(RecurrencePattern::Weekly);
        assert!(payload.check_rules(Utc::now()).is_err());
    }
}
