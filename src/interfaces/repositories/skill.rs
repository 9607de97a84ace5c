use async_trait::async_trait;

use crate::{
    entities::skill::{Skill, SkillFields},
    errors::AppError,
    repositories::sqlx_repo::SqlxRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Lists every skill in the shared catalog, oldest first
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;

    async fn get_skill(&self, id: i64) -> Result<Option<Skill>, AppError>;

    async fn skill_exists(&self, id: i64) -> Result<bool, AppError>;

    async fn create_skill(&self, fields: &SkillFields) -> Result<Skill, AppError>;

    /// Overwrites a skill. `None` when the row vanished in the meantime
    async fn update_skill(&self, id: i64, fields: &SkillFields) -> Result<Option<Skill>, AppError>;

    /// Deletes a skill and, through the foreign key, every user skill on it.
    /// Returns whether a row was removed
    async fn delete_skill(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl SkillRepository for SqlxRepo {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT id, name, description, proficiency_level FROM skills ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn get_skill(&self, id: i64) -> Result<Option<Skill>, AppError> {
        let skill = sqlx::query_as::<_, Skill>(
            "SELECT id, name, description, proficiency_level FROM skills WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(skill)
    }

    async fn skill_exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM skills WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_skill(&self, fields: &SkillFields) -> Result<Skill, AppError> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name, description, proficiency_level)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, proficiency_level
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.proficiency_level)
        .fetch_one(&self.pool)
        .await?;

        Ok(skill)
    }

    async fn update_skill(&self, id: i64, fields: &SkillFields) -> Result<Option<Skill>, AppError> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills
            SET
                name = $1,
                description = $2,
                proficiency_level = $3
            WHERE id = $4
            RETURNING id, name, description, proficiency_level
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.proficiency_level)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(skill)
    }

    async fn delete_skill(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
