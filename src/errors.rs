use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use jsonwebtoken::errors::Error as JwtError;
use validator::ValidationErrors;

use crate::constants::{NOT_FOUND_DETAIL, SERVER_ERROR_DETAIL};
use crate::domain::validation::{merge_validation_errors, ErrorMap};

#[derive(Debug)]
pub enum AppError {
    /// Field-keyed messages, rendered as the bare response body.
    ValidationError(ErrorMap),
    /// Carries a description for the logs; the response body is always fixed.
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl AppError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ErrorMap::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::ValidationError(errors)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|(field, messages)| format!("{}:{}", field, messages.join(" ")))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(what) => write!(f, "Not found: {}", what),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => serde_json::json!(errors),
            AppError::NotFound(_) => serde_json::json!({"detail": NOT_FOUND_DETAIL}),
            AppError::Conflict(msg) => serde_json::json!({"detail": msg}),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Request failed with an internal error");
                serde_json::json!({"detail": SERVER_ERROR_DETAIL})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorMap> for AppError {
    fn from(errors: ErrorMap) -> Self {
        AppError::ValidationError(errors)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = ErrorMap::new();
        merge_validation_errors(&mut map, &errors);
        AppError::ValidationError(map)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Database conflict occurred".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                AppError::Conflict("Foreign key violation".into())
            }
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum AuthError {
    #[display("Authentication credentials were not provided.")]
    MissingCredentials,

    #[display("Given token not valid for any token type")]
    InvalidToken,

    #[display("Token is invalid or expired")]
    InvalidRefreshToken,

    #[display("No active account found with the given credentials")]
    WrongCredentials,

    #[display("User not found")]
    UserNotFound,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Application state is not configured")]
    MissingAppState,

    #[display("Failed to resolve user: {_0}")]
    UserLookup(String),
}

impl AuthError {
    fn code(&self) -> Option<&'static str> {
        match self {
            AuthError::InvalidToken | AuthError::InvalidRefreshToken => Some("token_not_valid"),
            AuthError::UserNotFound => Some("user_not_found"),
            _ => None,
        }
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let body = match (self, self.code()) {
            (AuthError::UserLookup(msg), _) => {
                tracing::error!(error = %msg, "Failed to resolve authenticated user");
                serde_json::json!({"detail": SERVER_ERROR_DETAIL})
            }
            (_, Some(code)) => serde_json::json!({"detail": self.to_string(), "code": code}),
            (_, None) => serde_json::json!({"detail": self.to_string()}),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingAppState => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::UserLookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        tracing::debug!(error = %e, "Rejected bearer token");
        AuthError::InvalidToken
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}
