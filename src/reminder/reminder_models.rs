use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Medication,
    Appointment,
    Exercise,
    Other,
}

impl std::fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderKind::Medication => write!(f, "medication"),
            ReminderKind::Appointment => write!(f, "appointment"),
            ReminderKind::Exercise => write!(f, "exercise"),
            ReminderKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recurrence::None => write!(f, "none"),
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
            Recurrence::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub kind: ReminderKind,
    /// Recurring daily fire time as `HH:MM` (24-hour), independent of `date`.
    pub fire_time: String,
    /// Only meaningful for one-time reminders (`recurrence = none`).
    pub date: Option<NaiveDate>,
    pub recurrence: Recurrence,
    /// 0 = Sunday. Must be non-empty when `recurrence = weekly`.
    pub days_of_week: Vec<i16>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_kind_display() {
        assert_eq!(ReminderKind::Medication.to_string(), "medication");
        assert_eq!(ReminderKind::Appointment.to_string(), "appointment");
        assert_eq!(ReminderKind::Exercise.to_string(), "exercise");
        assert_eq!(ReminderKind::Other.to_string(), "other");
    }

    #[test]
    fn test_recurrence_display() {
        assert_eq!(Recurrence::None.to_string(), "none");
        assert_eq!(Recurrence::Daily.to_string(), "daily");
        assert_eq!(Recurrence::Weekly.to_string(), "weekly");
        assert_eq!(Recurrence::Monthly.to_string(), "monthly");
    }
}
