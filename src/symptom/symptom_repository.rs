use super::symptom_models::Symptom;
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct SymptomRepository {
    pool: PgPool,
}

impl SymptomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, search: Option<&str>) -> Result<Vec<Symptom>> {
        let symptoms = match search {
            Some(term) => {
                sqlx::query_as::<_, Symptom>(
                    "SELECT * FROM symptoms WHERE name ILIKE $1 ORDER BY name ASC"
                )
                .bind(format!("%{}%", term))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Symptom>("SELECT * FROM symptoms ORDER BY name ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(symptoms)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        specialty: &str,
    ) -> Result<Symptom> {
        let symptom = sqlx::query_as::<_, Symptom>(
            "INSERT INTO symptoms (name, description, specialty)
             VALUES ($1, $2, $3)
             RETURNING *"
        )
        .bind(name)
        .bind(description)
        .bind(specialty)
        .fetch_one(&self.pool)
        .await?;

        Ok(symptom)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM symptoms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
