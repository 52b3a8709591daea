use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Medicine,
    Exercise,
    Appointment,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Medicine => write!(f, "medicine"),
            NotificationKind::Exercise => write!(f, "exercise"),
            NotificationKind::Appointment => write!(f, "appointment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrencePattern::Daily => write!(f, "daily"),
            RecurrencePattern::Weekly => write!(f, "weekly"),
            RecurrencePattern::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    /// The absolute point at which the main notification fires.
    pub schedule_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub advance_notice: bool,
    /// 1..=1440; window for the early "upcoming" email.
    pub advance_notice_minutes: i32,
    /// Latched once the advance email goes out so a wide window cannot
    /// produce repeat sends; reset when a recurring notification rolls over.
    pub advance_sent: bool,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_kind_display() {
        assert_eq!(NotificationKind::Medicine.to_string(), "medicine");
        assert_eq!(NotificationKind::Exercise.to_string(), "exercise");
        assert_eq!(NotificationKind::Appointment.to_string(), "appointment");
    }

    #[test]
    fn test_recurrence_pattern_display() {
        assert_eq!(RecurrencePattern::Daily.to_string(), "daily");
        assert_eq!(RecurrencePattern::Weekly.to_string(), "weekly");
        assert_eq!(RecurrencePattern::Monthly.to_string(), "monthly");
    }
}
