use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::entities::internship::{Internship, InternshipInput};
use crate::errors::AppError;
use crate::repositories::internship::InternshipRepository;

pub struct InternshipHandler<R>
where
    R: InternshipRepository + ?Sized,
{
    pub internship_repo: Arc<R>,
}

impl<R> InternshipHandler<R>
where
    R: InternshipRepository + ?Sized,
{
    pub fn new(internship_repo: Arc<R>) -> Self {
        InternshipHandler { internship_repo }
    }

    pub async fn list_internships(&self) -> Result<Vec<Internship>, AppError> {
        self.internship_repo.list_internships().await
    }

    pub async fn get_internship(&self, id: i64) -> Result<Internship, AppError> {
        self.internship_repo.get_internship(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Internship {} not found", id)))
    }

    #[instrument(skip(self, data))]
    pub async fn create_internship(&self, data: &Value) -> Result<Internship, AppError> {
        let fields = InternshipInput::parse(data)?;
        let internship = self.internship_repo.create_internship(&fields).await?;

        tracing::info!(internship_id = internship.id, "Internship created");
        Ok(internship)
    }

    #[instrument(skip(self, data))]
    pub async fn update_internship(&self, id: i64, data: &Value) -> Result<Internship, AppError> {
        self.get_internship(id).await?;
        let fields = InternshipInput::parse(data)?;

        self.internship_repo.update_internship(id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Internship {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn delete_internship(&self, id: i64) -> Result<(), AppError> {
        if !self.internship_repo.delete_internship(id).await? {
            return Err(AppError::NotFound(format!("Internship {} not found", id)));
        }

        tracing::info!(internship_id = id, "Internship deleted");
        Ok(())
    }
}
