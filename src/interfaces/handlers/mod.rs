pub mod auth;
pub mod home;
pub mod internships;
pub mod json_error;
pub mod skills;
pub mod system;
pub mod user_internships;
pub mod user_skills;
