use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::entities::skill::{Skill, SkillInput};
use crate::errors::AppError;
use crate::repositories::skill::SkillRepository;

pub struct SkillHandler<R>
where
    R: SkillRepository + ?Sized,
{
    pub skill_repo: Arc<R>,
}

impl<R> SkillHandler<R>
where
    R: SkillRepository + ?Sized,
{
    pub fn new(skill_repo: Arc<R>) -> Self {
        SkillHandler { skill_repo }
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills().await
    }

    pub async fn get_skill(&self, id: i64) -> Result<Skill, AppError> {
        self.skill_repo.get_skill(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Skill {} not found", id)))
    }

    #[instrument(skip(self, data))]
    pub async fn create_skill(&self, data: &Value) -> Result<Skill, AppError> {
        let fields = SkillInput::parse(data)?.into_fields(None);
        let skill = self.skill_repo.create_skill(&fields).await?;

        tracing::info!(skill_id = skill.id, "Skill created");
        Ok(skill)
    }

    /// Full replacement; optional fields left out of the body keep their
    /// stored values.
    #[instrument(skip(self, data))]
    pub async fn update_skill(&self, id: i64, data: &Value) -> Result<Skill, AppError> {
        let existing = self.get_skill(id).await?;
        let fields = SkillInput::parse(data)?.into_fields(Some(&existing));

        self.skill_repo.update_skill(id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Skill {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn delete_skill(&self, id: i64) -> Result<(), AppError> {
        if !self.skill_repo.delete_skill(id).await? {
            return Err(AppError::NotFound(format!("Skill {} not found", id)));
        }

        tracing::info!(skill_id = id, "Skill deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use serde_json::json;

    use crate::entities::skill::SkillFields;
    use crate::repositories::skill::MockSkillRepository;

    fn rust_skill() -> Skill {
        Skill {
            id: 1,
            name: "Rust".into(),
            description: "Systems language".into(),
            proficiency_level: 70,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults_before_insert() {
        let mut repo = MockSkillRepository::new();
        repo.expect_create_skill()
            .with(eq(SkillFields {
                name: "Go".into(),
                description: String::new(),
                proficiency_level: 0,
            }))
            .returning(|fields| Ok(Skill {
                id: 2,
                name: fields.name.clone(),
                description: fields.description.clone(),
                proficiency_level: fields.proficiency_level,
            }));

        let skill = SkillHandler::new(Arc::new(repo))
            .create_skill(&json!({"name": "Go"}))
            .await
            .unwrap();

        assert_eq!(skill.id, 2);
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_the_store() {
        let mut repo = MockSkillRepository::new();
        repo.expect_create_skill().never();

        let result = SkillHandler::new(Arc::new(repo))
            .create_skill(&json!({"proficiency_level": "high"}))
            .await;

        match result {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.contains_key("name"));
                assert_eq!(errors["proficiency_level"], vec!["A valid integer is required."]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_of_missing_skill_is_not_found_before_validation() {
        let mut repo = MockSkillRepository::new();
        repo.expect_get_skill().returning(|_| Ok(None));
        repo.expect_update_skill().never();

        let result = SkillHandler::new(Arc::new(repo))
            .update_skill(9, &json!({}))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_keeps_omitted_fields() {
        let mut repo = MockSkillRepository::new();
        repo.expect_get_skill().returning(|_| Ok(Some(rust_skill())));
        repo.expect_update_skill()
            .withf(|id, fields| *id == 1 && fields.name == "Rust 2024" && fields.proficiency_level == 70)
            .returning(|id, fields| Ok(Some(Skill {
                id,
                name: fields.name.clone(),
                description: fields.description.clone(),
                proficiency_level: fields.proficiency_level,
            })));

        let skill = SkillHandler::new(Arc::new(repo))
            .update_skill(1, &json!({"name": "Rust 2024"}))
            .await
            .unwrap();

        assert_eq!(skill.description, "Systems language");
    }

    #[tokio::test]
    async fn delete_of_missing_skill_is_not_found() {
        let mut repo = MockSkillRepository::new();
        repo.expect_delete_skill().returning(|_| Ok(false));

        let result = SkillHandler::new(Arc::new(repo)).delete_skill(4).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
