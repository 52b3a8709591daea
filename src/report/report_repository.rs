use super::report_models::Report;
use crate::error::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        kind: &str,
        file_url: &str,
        notes: Option<&str>,
        report_date: Option<NaiveDate>,
    ) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            "INSERT INTO reports (user_id, title, kind, file_url, notes, report_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *"
        )
        .bind(user_id)
        .bind(title)
        .bind(kind)
        .bind(file_url)
        .bind(notes)
        .bind(report_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE user_id = $1 ORDER BY created_at DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE id = $1 AND user_id = $2"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
        kind: Option<&str>,
        file_url: Option<&str>,
        notes: Option<&str>,
        report_date: Option<NaiveDate>,
    ) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(
            "UPDATE reports SET
                title = COALESCE($3, title),
                kind = COALESCE($4, kind),
                file_url = COALESCE($5, file_url),
                notes = COALESCE($6, notes),
                report_date = COALESCE($7, report_date)
             WHERE id = $1 AND user_id = $2
             RETURNING *"
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(kind)
        .bind(file_url)
        .bind(notes)
        .bind(report_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
