use std::sync::Arc;

use crate::repositories::{
    internship::InternshipRepository,
    skill::SkillRepository,
    sqlx_repo::SqlxRepo,
    user::UserRepository,
    user_internship::UserInternshipRepository,
    user_skill::UserSkillRepository,
};

/// One handle per repository trait, all pointing at the same store.
#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub skill_repo: Arc<dyn SkillRepository>,
    pub internship_repo: Arc<dyn InternshipRepository>,
    pub user_skill_repo: Arc<dyn UserSkillRepository>,
    pub user_internship_repo: Arc<dyn UserInternshipRepository>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self::from_store(Arc::new(SqlxRepo::new(pool)))
    }

    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + SkillRepository
            + InternshipRepository
            + UserSkillRepository
            + UserInternshipRepository
            + 'static,
    {
        SharedRepositories {
            user_repo: store.clone(),
            skill_repo: store.clone(),
            internship_repo: store.clone(),
            user_skill_repo: store.clone(),
            user_internship_repo: store,
        }
    }
}
