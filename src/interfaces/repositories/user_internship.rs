use async_trait::async_trait;

use crate::{
    entities::user_internship::{UserInternship, UserInternshipFields},
    errors::AppError,
    repositories::sqlx_repo::SqlxRepo,
};

/// Caller-scoped like [`super::user_skill::UserSkillRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserInternshipRepository: Send + Sync {
    async fn list_user_internships(&self, user_id: i64) -> Result<Vec<UserInternship>, AppError>;
    async fn get_user_internship(&self, id: i64, user_id: i64) -> Result<Option<UserInternship>, AppError>;
    async fn create_user_internship(&self, user_id: i64, fields: &UserInternshipFields) -> Result<UserInternship, AppError>;
    async fn update_user_internship(&self, id: i64, user_id: i64, fields: &UserInternshipFields) -> Result<Option<UserInternship>, AppError>;
    async fn delete_user_internship(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}

const INTERNSHIP_COLUMNS: &str = r#"
    i.id AS internship_id,
    i.title AS internship_title,
    i.company AS internship_company,
    i.start_date AS internship_start_date,
    i.end_date AS internship_end_date,
    i.status AS internship_status
"#;

#[async_trait]
impl UserInternshipRepository for SqlxRepo {
    async fn list_user_internships(&self, user_id: i64) -> Result<Vec<UserInternship>, AppError> {
        let query = format!(
            "SELECT ui.id, ui.user_id, ui.application_status, ui.notes, {INTERNSHIP_COLUMNS}
            FROM user_internships ui
            JOIN internships i ON i.id = ui.internship_id
            WHERE ui.user_id = $1
            ORDER BY ui.id"
        );
        let user_internships = sqlx::query_as::<_, UserInternship>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(user_internships)
    }

    async fn get_user_internship(&self, id: i64, user_id: i64) -> Result<Option<UserInternship>, AppError> {
        let query = format!(
            "SELECT ui.id, ui.user_id, ui.application_status, ui.notes, {INTERNSHIP_COLUMNS}
            FROM user_internships ui
            JOIN internships i ON i.id = ui.internship_id
            WHERE ui.id = $1 AND ui.user_id = $2"
        );
        let user_internship = sqlx::query_as::<_, UserInternship>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user_internship)
    }

    async fn create_user_internship(&self, user_id: i64, fields: &UserInternshipFields) -> Result<UserInternship, AppError> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO user_internships (user_id, internship_id, application_status, notes)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, internship_id, application_status, notes
            )
            SELECT ui.id, ui.user_id, ui.application_status, ui.notes, {INTERNSHIP_COLUMNS}
            FROM inserted ui
            JOIN internships i ON i.id = ui.internship_id"
        );
        let user_internship = sqlx::query_as::<_, UserInternship>(&query)
            .bind(user_id)
            .bind(fields.internship_id)
            .bind(&fields.application_status)
            .bind(&fields.notes)
            .fetch_one(&self.pool)
            .await?;

        Ok(user_internship)
    }

    async fn update_user_internship(&self, id: i64, user_id: i64, fields: &UserInternshipFields) -> Result<Option<UserInternship>, AppError> {
        let query = format!(
            "WITH updated AS (
                UPDATE user_internships
                SET
                    internship_id = $1,
                    application_status = $2,
                    notes = $3
                WHERE id = $4 AND user_id = $5
                RETURNING id, user_id, internship_id, application_status, notes
            )
            SELECT ui.id, ui.user_id, ui.application_status, ui.notes, {INTERNSHIP_COLUMNS}
            FROM updated ui
            JOIN internships i ON i.id = ui.internship_id"
        );
        let user_internship = sqlx::query_as::<_, UserInternship>(&query)
            .bind(fields.internship_id)
            .bind(&fields.application_status)
            .bind(&fields.notes)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user_internship)
    }

    async fn delete_user_internship(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_internships WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
