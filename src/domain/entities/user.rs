use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::password::validate_password_strength;
use crate::domain::validation::{ErrorMap, Payload};

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid")
});

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UserInsert {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// The identity a request was authenticated as. Resolved once by the
/// authentication middleware and handed to every resource operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        CurrentUser {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterInput {
    #[validate(
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        regex(
            path = *USERNAME_RE,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    pub username: String,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,

    pub password: String,
}

impl RegisterInput {
    pub fn parse(data: &Value) -> Result<Self, ErrorMap> {
        let mut payload = Payload::new(data)?;
        let username = payload.required_string("username");
        let email = payload.optional_string("email").filter(|e| !e.is_empty());
        let password = payload.required_secret("password");

        if let Some(password) = &password {
            let inputs: Vec<&str> = username.iter().chain(email.iter()).map(String::as_str).collect();
            if let Err(problems) = validate_password_strength(password, &inputs) {
                for problem in problems {
                    payload.add_error("password", problem);
                }
            }
        }

        payload.finish(RegisterInput {
            username: username.unwrap_or_default(),
            email,
            password: password.unwrap_or_default(),
        })
    }

    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        UserInsert {
            username: self.username.clone(),
            email: self.email.clone().unwrap_or_default(),
            password_hash,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn parse(data: &Value) -> Result<Self, ErrorMap> {
        let mut payload = Payload::new(data)?;
        let username = payload.required_string("username");
        let password = payload.required_secret("password");

        payload.finish(LoginInput {
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct RefreshInput {
    pub refresh: String,
}

impl RefreshInput {
    pub fn parse(data: &Value) -> Result<Self, ErrorMap> {
        let mut payload = Payload::new(data)?;
        let refresh = payload.required_secret("refresh");

        payload.finish(RefreshInput {
            refresh: refresh.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
}
