use super::appointment_models::{Appointment, AppointmentStatus};
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        doctor_id: Uuid,
        scheduled_for: DateTime<Utc>,
        reason: Option<&str>,
    ) -> Result<Appointment> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (user_id, doctor_id, scheduled_for, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING *"
        )
        .bind(user_id)
        .bind(doctor_id)
        .bind(scheduled_for)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE user_id = $1 ORDER BY scheduled_for DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE id = $1 AND user_id = $2"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    /// A doctor's slot is taken when a non-cancelled, non-rejected
    /// appointment already exists at the same instant.
    pub async fn slot_taken(&self, doctor_id: Uuid, scheduled_for: DateTime<Utc>) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments
             WHERE doctor_id = $1 AND scheduled_for = $2
             AND status NOT IN ('cancelled', 'rejected')"
        )
        .bind(doctor_id)
        .bind(scheduled_for)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = $1, updated_at = NOW()
             WHERE id = $2 AND user_id = $3
             RETURNING *"
        )
        .bind(status)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn update_status_any(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING *"
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn find_all(
        &self,
        status: Option<AppointmentStatus>,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Appointment>, i64)> {
        let offset = (page.saturating_sub(1)) * limit;

        let (appointments, total) = match status {
            Some(status) => {
                let rows = sqlx::query_as::<_, Appointment>(
                    "SELECT * FROM appointments WHERE status = $1
                     ORDER BY scheduled_for DESC LIMIT $2 OFFSET $3"
                )
                .bind(status)
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await?;

                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM appointments WHERE status = $1"
                )
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

                (rows, total)
            }
            None => {
                let rows = sqlx::query_as::<_, Appointment>(
                    "SELECT * FROM appointments ORDER BY scheduled_for DESC LIMIT $1 OFFSET $2"
                )
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await?;

                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
                    .fetch_one(&self.pool)
                    .await?;

                (rows, total)
            }
        };

        Ok((appointments, total))
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_status(&self, status: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments WHERE status = $1"
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
