use async_trait::async_trait;

use crate::{
    entities::user_skill::{UserSkill, UserSkillFields},
    errors::AppError,
    repositories::sqlx_repo::SqlxRepo,
};

/// Every method is scoped to `user_id`: rows owned by someone else behave
/// exactly like missing rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSkillRepository: Send + Sync {
    async fn list_user_skills(&self, user_id: i64) -> Result<Vec<UserSkill>, AppError>;
    async fn get_user_skill(&self, id: i64, user_id: i64) -> Result<Option<UserSkill>, AppError>;
    async fn create_user_skill(&self, user_id: i64, fields: &UserSkillFields) -> Result<UserSkill, AppError>;
    async fn update_user_skill(&self, id: i64, user_id: i64, fields: &UserSkillFields) -> Result<Option<UserSkill>, AppError>;
    async fn delete_user_skill(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}

const SELECT_WITH_SKILL: &str = r#"
    SELECT
        us.id, us.user_id, us.progress, us.last_updated,
        s.id AS skill_id,
        s.name AS skill_name,
        s.description AS skill_description,
        s.proficiency_level AS skill_proficiency_level
    FROM user_skills us
    JOIN skills s ON s.id = us.skill_id
"#;

#[async_trait]
impl UserSkillRepository for SqlxRepo {
    async fn list_user_skills(&self, user_id: i64) -> Result<Vec<UserSkill>, AppError> {
        let query = format!("{SELECT_WITH_SKILL} WHERE us.user_id = $1 ORDER BY us.id");
        let user_skills = sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(user_skills)
    }

    async fn get_user_skill(&self, id: i64, user_id: i64) -> Result<Option<UserSkill>, AppError> {
        let query = format!("{SELECT_WITH_SKILL} WHERE us.id = $1 AND us.user_id = $2");
        let user_skill = sqlx::query_as::<_, UserSkill>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user_skill)
    }

    async fn create_user_skill(&self, user_id: i64, fields: &UserSkillFields) -> Result<UserSkill, AppError> {
        let user_skill = sqlx::query_as::<_, UserSkill>(
            r#"
            WITH inserted AS (
                INSERT INTO user_skills (user_id, skill_id, progress, last_updated)
                VALUES ($1, $2, $3, NOW())
                RETURNING id, user_id, skill_id, progress, last_updated
            )
            SELECT
                i.id, i.user_id, i.progress, i.last_updated,
                s.id AS skill_id,
                s.name AS skill_name,
                s.description AS skill_description,
                s.proficiency_level AS skill_proficiency_level
            FROM inserted i
            JOIN skills s ON s.id = i.skill_id
            "#,
        )
        .bind(user_id)
        .bind(fields.skill_id)
        .bind(fields.progress)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_skill)
    }

    async fn update_user_skill(&self, id: i64, user_id: i64, fields: &UserSkillFields) -> Result<Option<UserSkill>, AppError> {
        let user_skill = sqlx::query_as::<_, UserSkill>(
            r#"
            WITH updated AS (
                UPDATE user_skills
                SET
                    skill_id = $1,
                    progress = $2,
                    last_updated = NOW()
                WHERE id = $3 AND user_id = $4
                RETURNING id, user_id, skill_id, progress, last_updated
            )
            SELECT
                u.id, u.user_id, u.progress, u.last_updated,
                s.id AS skill_id,
                s.name AS skill_name,
                s.description AS skill_description,
                s.proficiency_level AS skill_proficiency_level
            FROM updated u
            JOIN skills s ON s.id = u.skill_id
            "#,
        )
        .bind(fields.skill_id)
        .bind(fields.progress)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_skill)
    }

    async fn delete_user_skill(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_skills WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
