use super::reminder_models::{Recurrence, Reminder, ReminderKind};
use crate::error::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All reminders across all users, used to rebuild the job table at
    /// process start.
    pub async fn find_all(&self) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>("SELECT * FROM reminders")
            .fetch_all(&self.pool)
            .await?;

        Ok(reminders)
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = $1 ORDER BY created_at DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE id = $1 AND user_id = $2"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    /// Unscoped lookup for fire callbacks, which run outside any request.
    pub async fn find_by_id_any(&self, id: Uuid) -> Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>("SELECT * FROM reminders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reminder)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        kind: ReminderKind,
        fire_time: &str,
        date: Option<NaiveDate>,
        recurrence: Recurrence,
        days_of_week: &[i16],
    ) -> Result<Reminder> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "INSERT INTO reminders (user_id, title, description, kind, fire_time, date, recurrence, days_of_week)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
        .bind(user_id)
        .bind(title.trim())
        .bind(description)
        .bind(kind)
        .bind(fire_time)
        .bind(date)
        .bind(recurrence)
        .bind(days_of_week.to_vec())
        .fetch_one(&self.pool)
        .await?;

        Ok(reminder)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        kind: Option<ReminderKind>,
        fire_time: Option<&str>,
        date: Option<NaiveDate>,
        recurrence: Option<Recurrence>,
        days_of_week: Option<Vec<i16>>,
        is_completed: Option<bool>,
    ) -> Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "UPDATE reminders SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                kind = COALESCE($5, kind),
                fire_time = COALESCE($6, fire_time),
                date = COALESCE($7, date),
                recurrence = COALESCE($8, recurrence),
                days_of_week = COALESCE($9, days_of_week),
                is_completed = COALESCE($10, is_completed),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING *"
        )
        .bind(id)
        .bind(user_id)
        .bind(title.map(str::trim))
        .bind(description)
        .bind(kind)
        .bind(fire_time)
        .bind(date)
        .bind(recurrence)
        .bind(days_of_week)
        .bind(is_completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
