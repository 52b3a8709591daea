use crate::error::{AppError, Result};
use crate::notification::notification_models::Notification;
use crate::reminder::reminder_models::Reminder;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Outbound email delivery. Callers treat failures as loggable and
/// non-fatal; implementations must return errors instead of panicking.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Delivers mail through an HTTP mail API (JSON POST, bearer key).
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(endpoint: String, api_key: String, from: String) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            from,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("mail API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "mail API returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Fallback used when no mail API is configured: logs instead of sending.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<()> {
        tracing::info!("email to {} suppressed (no mail API configured): {}", to, subject);
        Ok(())
    }
}

pub fn reminder_email(reminder: &Reminder) -> (String, String) {
    let subject = format!("Reminder: {}", reminder.title);
    let mut body = format!(
        "This is your {} reminder \"{}\" scheduled for {}.",
        reminder.kind, reminder.title, reminder.fire_time
    );
    if let Some(ref description) = reminder.description {
        body.push_str("\n\n");
        body.push_str(description);
    }
    (subject, body)
}

pub fn notification_email(notification: &Notification) -> (String, String) {
    let subject = format!("{} — it's time", notification.title);
    let body = format!(
        "Your {} notification \"{}\" is due now.\n\n{}",
        notification.kind, notification.title, notification.description
    );
    (subject, body)
}

pub fn advance_email(notification: &Notification, minutes_left: i64) -> (String, String) {
    let subject = format!("Upcoming: {}", notification.title);
    let body = format!(
        "Your {} notification \"{}\" is coming up in {} minutes.\n\n{}",
        notification.kind, notification.title, minutes_left, notification.description
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notification_models::NotificationKind;
    use crate::reminder::reminder_models::{Recurrence, ReminderKind};
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_reminder() -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Take pill".to_string(),
            description: Some("Two with water".to_string()),
            kind: ReminderKind::Medication,
            fire_time: "08:00".to_string(),
            date: None,
            recurrence: Recurrence::Daily,
            days_of_week: vec![],
            is_completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_notification() -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: NotificationKind::Appointment,
            title: "Visit".to_string(),
            description: "Cardiology checkup".to_string(),
            schedule_time: Utc::now(),
            is_recurring: false,
            recurrence_pattern: None,
            advance_notice: true,
            advance_notice_minutes: 15,
            advance_sent: false,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reminder_email_includes_kind_time_and_description() {
        let (subject, body) = reminder_email(&sample_reminder());
        assert_eq!(subject, "Reminder: Take pill");
        assert!(body.contains("medication"));
        assert!(body.contains("08:00"));
        assert!(body.contains("Two with water"));
    }

    #[test]
    fn advance_email_mentions_minutes_left() {
        let (subject, body) = advance_email(&sample_notification(), 15);
        assert!(subject.starts_with("Upcoming"));
        assert!(body.contains("in 15 minutes"));
    }

    #[test]
    fn main_email_says_now() {
        let (_, body) = notification_email(&sample_notification());
        assert!(body.contains("due now"));
    }
}
