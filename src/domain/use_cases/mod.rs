pub mod auth;
pub mod extractors;
pub mod internships;
pub mod skills;
pub mod user_internships;
pub mod user_skills;
