use super::notification_models::{Notification, NotificationKind, RecurrencePattern};
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        title: &str,
        description: &str,
        schedule_time: DateTime<Utc>,
        is_recurring: bool,
        recurrence_pattern: Option<RecurrencePattern>,
        advance_notice: bool,
        advance_notice_minutes: i32,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications
                (user_id, kind, title, description, schedule_time, is_recurring,
                 recurrence_pattern, advance_notice, advance_notice_minutes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
        .bind(user_id)
        .bind(kind)
        .bind(title)
        .bind(description)
        .bind(schedule_time)
        .bind(is_recurring)
        .bind(recurrence_pattern)
        .bind(advance_notice)
        .bind(advance_notice_minutes)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY schedule_time DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Incomplete notifications whose fire time falls at or before the
    /// horizon; the sweep classifies them further in memory.
    pub async fn find_pending_until(&self, horizon: DateTime<Utc>) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications
             WHERE is_completed = false AND schedule_time <= $1
             ORDER BY schedule_time ASC"
        )
        .bind(horizon)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn mark_completed(&self, id: Uuid, user_id: Uuid) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_completed = true
             WHERE id = $1 AND user_id = $2
             RETURNING *"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    /// Terminal state for a non-recurring notification after its main fire.
    pub async fn complete(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE notifications SET is_completed = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Rollover for a recurring notification after its main fire: next
    /// period, advance latch re-armed, still incomplete.
    pub async fn roll_over(&self, id: Uuid, next_schedule_time: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            "UPDATE notifications
             SET schedule_time = $2, advance_sent = false, is_completed = false
             WHERE id = $1"
        )
        .bind(id)
        .bind(next_schedule_time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn mark_advance_sent(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE notifications SET advance_sent = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn unread_count(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications
             WHERE user_id = $1 AND is_completed = false AND schedule_time <= $2"
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
