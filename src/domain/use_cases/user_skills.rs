use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::domain::validation::does_not_exist;
use crate::entities::user::CurrentUser;
use crate::entities::user_skill::{UserSkill, UserSkillFields, UserSkillInput};
use crate::errors::AppError;
use crate::repositories::skill::SkillRepository;
use crate::repositories::user_skill::UserSkillRepository;

/// Operations on the caller's own skill records. Records of other users are
/// reported as not found.
pub struct UserSkillHandler<R, S>
where
    R: UserSkillRepository + ?Sized,
    S: SkillRepository + ?Sized,
{
    pub user_skill_repo: Arc<R>,
    pub skill_repo: Arc<S>,
}

impl<R, S> UserSkillHandler<R, S>
where
    R: UserSkillRepository + ?Sized,
    S: SkillRepository + ?Sized,
{
    pub fn new(user_skill_repo: Arc<R>, skill_repo: Arc<S>) -> Self {
        UserSkillHandler {
            user_skill_repo,
            skill_repo,
        }
    }

    pub async fn list_user_skills(&self, caller: &CurrentUser) -> Result<Vec<UserSkill>, AppError> {
        self.user_skill_repo.list_user_skills(caller.id).await
    }

    pub async fn get_user_skill(&self, caller: &CurrentUser, id: i64) -> Result<UserSkill, AppError> {
        self.user_skill_repo.get_user_skill(id, caller.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User skill {} not found", id)))
    }

    #[instrument(skip(self, caller, data), fields(user_id = caller.id))]
    pub async fn create_user_skill(&self, caller: &CurrentUser, data: &Value) -> Result<UserSkill, AppError> {
        let fields = UserSkillInput::parse(data)?.into_fields(None);
        self.ensure_skill_exists(&fields).await?;

        let user_skill = self.user_skill_repo.create_user_skill(caller.id, &fields)
            .await
            .map_err(|e| missing_skill(e, &fields))?;

        tracing::info!(user_skill_id = user_skill.id, "User skill created");
        Ok(user_skill)
    }

    #[instrument(skip(self, caller, data), fields(user_id = caller.id))]
    pub async fn update_user_skill(&self, caller: &CurrentUser, id: i64, data: &Value) -> Result<UserSkill, AppError> {
        let existing = self.get_user_skill(caller, id).await?;
        let fields = UserSkillInput::parse(data)?.into_fields(Some(&existing));
        self.ensure_skill_exists(&fields).await?;

        self.user_skill_repo.update_user_skill(id, caller.id, &fields)
            .await
            .map_err(|e| missing_skill(e, &fields))?
            .ok_or_else(|| AppError::NotFound(format!("User skill {} not found", id)))
    }

    #[instrument(skip(self, caller), fields(user_id = caller.id))]
    pub async fn delete_user_skill(&self, caller: &CurrentUser, id: i64) -> Result<(), AppError> {
        if !self.user_skill_repo.delete_user_skill(id, caller.id).await? {
            return Err(AppError::NotFound(format!("User skill {} not found", id)));
        }

        tracing::info!(user_skill_id = id, "User skill deleted");
        Ok(())
    }

    async fn ensure_skill_exists(&self, fields: &UserSkillFields) -> Result<(), AppError> {
        if self.skill_repo.skill_exists(fields.skill_id).await? {
            Ok(())
        } else {
            Err(AppError::field("skill_id", does_not_exist(fields.skill_id)))
        }
    }
}

/// A foreign key violation here means the skill was deleted between the
/// existence check and the write.
fn missing_skill(err: AppError, fields: &UserSkillFields) -> AppError {
    match err {
        AppError::Conflict(_) => AppError::field("skill_id", does_not_exist(fields.skill_id)),
        other => other,
    }
}
