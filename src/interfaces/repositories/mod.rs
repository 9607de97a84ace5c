pub mod internship;
pub mod skill;
pub mod sqlx_repo;
pub mod token;
pub mod user;
pub mod user_internship;
pub mod user_skill;
