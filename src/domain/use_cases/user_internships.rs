use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::domain::validation::does_not_exist;
use crate::entities::user::CurrentUser;
use crate::entities::user_internship::{UserInternship, UserInternshipFields, UserInternshipInput};
use crate::errors::AppError;
use crate::repositories::internship::InternshipRepository;
use crate::repositories::user_internship::UserInternshipRepository;

pub struct UserInternshipHandler<R, I>
where
    R: UserInternshipRepository + ?Sized,
    I: InternshipRepository + ?Sized,
{
    pub user_internship_repo: Arc<R>,
    pub internship_repo: Arc<I>,
}

impl<R, I> UserInternshipHandler<R, I>
where
    R: UserInternshipRepository + ?Sized,
    I: InternshipRepository + ?Sized,
{
    pub fn new(user_internship_repo: Arc<R>, internship_repo: Arc<I>) -> Self {
        UserInternshipHandler {
            user_internship_repo,
            internship_repo,
        }
    }

    pub async fn list_user_internships(&self, caller: &CurrentUser) -> Result<Vec<UserInternship>, AppError> {
        self.user_internship_repo.list_user_internships(caller.id).await
    }

    pub async fn get_user_internship(&self, caller: &CurrentUser, id: i64) -> Result<UserInternship, AppError> {
        self.user_internship_repo.get_user_internship(id, caller.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User internship {} not found", id)))
    }

    #[instrument(skip(self, caller, data), fields(user_id = caller.id))]
    pub async fn create_user_internship(&self, caller: &CurrentUser, data: &Value) -> Result<UserInternship, AppError> {
        let fields = UserInternshipInput::parse(data)?.into_fields(None);
        self.ensure_internship_exists(&fields).await?;

        let user_internship = self.user_internship_repo.create_user_internship(caller.id, &fields)
            .await
            .map_err(|e| missing_internship(e, &fields))?;

        tracing::info!(user_internship_id = user_internship.id, "User internship created");
        Ok(user_internship)
    }

    #[instrument(skip(self, caller, data), fields(user_id = caller.id))]
    pub async fn update_user_internship(
        &self,
        caller: &CurrentUser,
        id: i64,
        data: &Value,
    ) -> Result<UserInternship, AppError> {
        let existing = self.get_user_internship(caller, id).await?;
        let fields = UserInternshipInput::parse(data)?.into_fields(Some(&existing));
        self.ensure_internship_exists(&fields).await?;

        self.user_internship_repo.update_user_internship(id, caller.id, &fields)
            .await
            .map_err(|e| missing_internship(e, &fields))?
            .ok_or_else(|| AppError::NotFound(format!("User internship {} not found", id)))
    }

    #[instrument(skip(self, caller), fields(user_id = caller.id))]
    pub async fn delete_user_internship(&self, caller: &CurrentUser, id: i64) -> Result<(), AppError> {
        if !self.user_internship_repo.delete_user_internship(id, caller.id).await? {
            return Err(AppError::NotFound(format!("User internship {} not found", id)));
        }

        tracing::info!(user_internship_id = id, "User internship deleted");
        Ok(())
    }

    async fn ensure_internship_exists(&self, fields: &UserInternshipFields) -> Result<(), AppError> {
        if self.internship_repo.internship_exists(fields.internship_id).await? {
            Ok(())
        } else {
            Err(AppError::field("internship_id", does_not_exist(fields.internship_id)))
        }
    }
}

/// A foreign key violation here means the internship was deleted between the
/// existence check and the write.
fn missing_internship(err: AppError, fields: &UserInternshipFields) -> AppError {
    match err {
        AppError::Conflict(_) => AppError::field("internship_id", does_not_exist(fields.internship_id)),
        other => other,
    }
}
