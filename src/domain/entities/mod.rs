pub mod internship;
pub mod skill;
pub mod token;
pub mod user;
pub mod user_internship;
pub mod user_skill;
