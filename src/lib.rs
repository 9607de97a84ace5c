mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, password, use_cases, validation};
pub use interfaces::{handlers, middlewares, openapi, repositories, routes};
pub use infrastructure::{auth, db};

use auth::jwt::JwtService;
use repositories::{
    internship::InternshipRepository,
    skill::SkillRepository,
    user::UserRepository,
    user_internship::UserInternshipRepository,
    user_skill::UserSkillRepository,
};
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler,
    internships::InternshipHandler,
    skills::SkillHandler,
    user_internships::UserInternshipHandler,
    user_skills::UserSkillHandler,
};

pub type AppAuthHandler = AuthHandler<dyn UserRepository, JwtService>;
pub type AppSkillHandler = SkillHandler<dyn SkillRepository>;
pub type AppInternshipHandler = InternshipHandler<dyn InternshipRepository>;
pub type AppUserSkillHandler = UserSkillHandler<dyn UserSkillRepository, dyn SkillRepository>;
pub type AppUserInternshipHandler = UserInternshipHandler<dyn UserInternshipRepository, dyn InternshipRepository>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub skill_handler: AppSkillHandler,
    pub internship_handler: AppInternshipHandler,
    pub user_skill_handler: AppUserSkillHandler,
    pub user_internship_handler: AppUserInternshipHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        Self::from_repositories(config, SharedRepositories::new(pool))
    }

    pub fn from_repositories(config: &settings::AppConfig, repos: SharedRepositories) -> Self {
        let jwt_service = JwtService::new(config);

        AppState {
            auth_handler: AuthHandler::new(repos.user_repo, jwt_service),
            skill_handler: SkillHandler::new(repos.skill_repo.clone()),
            internship_handler: InternshipHandler::new(repos.internship_repo.clone()),
            user_skill_handler: UserSkillHandler::new(repos.user_skill_repo, repos.skill_repo),
            user_internship_handler: UserInternshipHandler::new(repos.user_internship_repo, repos.internship_repo),
        }
    }
}
