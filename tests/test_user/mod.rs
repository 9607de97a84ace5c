#![allow(dead_code)]

use autolearn_api::{
    auth::jwt::JwtService,
    entities::user::User,
    repositories::token::TokenServiceRepository,
};

use crate::test_utils::{test_config, InMemoryRepo};

/// A user seeded straight into the store together with a valid access token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user: User,
    pub access_token: String,
}

impl TestUser {
    pub fn seed(repo: &InMemoryRepo, username: &str) -> Self {
        let user = repo.insert_user(username);
        let access_token = JwtService::new(&test_config())
            .create_jwt(&user)
            .expect("Failed to sign test token");

        TestUser { user, access_token }
    }

    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.access_token))
    }
}

pub fn valid_registration() -> serde_json::Value {
    serde_json::json!({
        "username": "ada",
        "email": "ada@example.com",
        "password": "violet-Harbor-mango-42"
    })
}

pub fn backend_internship() -> serde_json::Value {
    serde_json::json!({
        "title": "Backend Intern",
        "company": "Acme",
        "start_date": "2024-06-01",
        "end_date": "2024-08-31",
        "status": "Open"
    })
}

pub fn valid_login() -> serde_json::Value {
    serde_json::json!({
        "username": "ada",
        "password": "violet-Harbor-mango-42"
    })
}
