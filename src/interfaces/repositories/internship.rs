use async_trait::async_trait;

use crate::{
    entities::internship::{Internship, InternshipFields},
    errors::AppError,
    repositories::sqlx_repo::SqlxRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InternshipRepository: Send + Sync {
    async fn list_internships(&self) -> Result<Vec<Internship>, AppError>;
    async fn get_internship(&self, id: i64) -> Result<Option<Internship>, AppError>;
    async fn internship_exists(&self, id: i64) -> Result<bool, AppError>;
    async fn create_internship(&self, fields: &InternshipFields) -> Result<Internship, AppError>;
    async fn update_internship(&self, id: i64, fields: &InternshipFields) -> Result<Option<Internship>, AppError>;
    async fn delete_internship(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl InternshipRepository for SqlxRepo {
    async fn list_internships(&self) -> Result<Vec<Internship>, AppError> {
        let internships = sqlx::query_as::<_, Internship>(
            "SELECT id, title, company, start_date, end_date, status FROM internships ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(internships)
    }

    async fn get_internship(&self, id: i64) -> Result<Option<Internship>, AppError> {
        let internship = sqlx::query_as::<_, Internship>(
            "SELECT id, title, company, start_date, end_date, status FROM internships WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(internship)
    }

    async fn internship_exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM internships WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_internship(&self, fields: &InternshipFields) -> Result<Internship, AppError> {
        let internship = sqlx::query_as::<_, Internship>(
            r#"
            INSERT INTO internships (title, company, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, company, start_date, end_date, status
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.company)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(&fields.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(internship)
    }

    async fn update_internship(&self, id: i64, fields: &InternshipFields) -> Result<Option<Internship>, AppError> {
        let internship = sqlx::query_as::<_, Internship>(
            r#"
            UPDATE internships
            SET
                title = $1,
                company = $2,
                start_date = $3,
                end_date = $4,
                status = $5
            WHERE id = $6
            RETURNING id, title, company, start_date, end_date, status
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.company)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(&fields.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(internship)
    }

    async fn delete_internship(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM internships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
