use super::doctor_models::Doctor;
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DoctorFilters {
    pub specialty: Option<String>,
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

#[derive(Clone)]
pub struct DoctorRepository {
    pool: PgPool,
}

impl DoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, filters: DoctorFilters) -> Result<(Vec<Doctor>, i64)> {
        let mut query = "SELECT * FROM doctors WHERE 1=1".to_string();
        let mut count_query = "SELECT COUNT(*) FROM doctors WHERE 1=1".to_string();
        let mut params_count = 0;

        if filters.specialty.is_some() {
            params_count += 1;
            let clause = format!(" AND specialty = ${}", params_count);
            query.push_str(&clause);
            count_query.push_str(&clause);
        }

        if filters.search.is_some() {
            params_count += 1;
            let clause = format!(" AND (name ILIKE ${0} OR hospital ILIKE ${0})", params_count);
            query.push_str(&clause);
            count_query.push_str(&clause);
        }

        query.push_str(&format!(
            " ORDER BY rating DESC, name ASC LIMIT ${} OFFSET ${}",
            params_count + 1,
            params_count + 2
        ));

        let offset = (filters.page.saturating_sub(1)) * filters.limit;
        let search_pattern = filters.search.as_ref().map(|s| format!("%{}%", s));

        let mut db_query = sqlx::query_as::<_, Doctor>(&query);
        let mut db_count = sqlx::query_scalar::<_, i64>(&count_query);

        if let Some(ref specialty) = filters.specialty {
            db_query = db_query.bind(specialty.clone());
            db_count = db_count.bind(specialty.clone());
        }

        if let Some(ref pattern) = search_pattern {
            db_query = db_query.bind(pattern.clone());
            db_count = db_count.bind(pattern.clone());
        }

        let doctors = db_query
            .bind(filters.limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        let total = db_count.fetch_one(&self.pool).await?;

        Ok((doctors, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>> {
        let doctor = sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doctor)
    }

    pub async fn create(
        &self,
        name: &str,
        specialty: &str,
        hospital: &str,
        address: &str,
        phone: Option<&str>,
        image_url: Option<&str>,
        rating: f64,
        bio: Option<&str>,
    ) -> Result<Doctor> {
        let doctor = sqlx::query_as::<_, Doctor>(
            "INSERT INTO doctors (name, specialty, hospital, address, phone, image_url, rating, bio)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
        .bind(name)
        .bind(specialty)
        .bind(hospital)
        .bind(address)
        .bind(phone)
        .bind(image_url)
        .bind(rating)
        .bind(bio)
        .fetch_one(&self.pool)
        .await?;

        Ok(doctor)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        specialty: Option<&str>,
        hospital: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        image_url: Option<&str>,
        rating: Option<f64>,
        bio: Option<&str>,
    ) -> Result<Option<Doctor>> {
        let doctor = sqlx::query_as::<_, Doctor>(
            "UPDATE doctors SET
                name = COALESCE($2, name),
                specialty = COALESCE($3, specialty),
                hospital = COALESCE($4, hospital),
                address = COALESCE($5, address),
                phone = COALESCE($6, phone),
                image_url = COALESCE($7, image_url),
                rating = COALESCE($8, rating),
                bio = COALESCE($9, bio),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *"
        )
        .bind(id)
        .bind(name)
        .bind(specialty)
        .bind(hospital)
        .bind(address)
        .bind(phone)
        .bind(image_url)
        .bind(rating)
        .bind(bio)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM doctors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
