use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::entities::token::{AccessToken, TokenPair};
use crate::entities::user::{CurrentUser, LoginInput, RefreshInput, RegisterInput, RegisterResponse};
use crate::errors::{AppError, AuthError};
use crate::repositories::user::UserRepository;
use crate::auth::password::{burn_verification_time, hash_password, verify_password};
use crate::repositories::token::TokenServiceRepository;

const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

pub struct AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub user_repo: Arc<R>,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: Arc<R>, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            token_service
        }
    }

    /// Registers a new user after validation and password hashing
    #[instrument(skip(self, data))]
    pub async fn register(&self, data: &Value) -> Result<RegisterResponse, AppError> {
        let request = RegisterInput::parse(data)?;

        if self.user_repo.get_user_by_username(&request.username).await?.is_some() {
            return Err(AppError::field("username", DUPLICATE_USERNAME));
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        match self.user_repo.create_user(&user_insert).await {
            Ok(user_id) => {
                tracing::info!(user_id, "User registered");
                Ok(RegisterResponse {
                    message: "User registered successfully".to_string(),
                })
            }
            Err(AppError::Conflict(_)) => Err(AppError::field("username", DUPLICATE_USERNAME)),
            Err(e) => Err(e),
        }
    }

    /// Checks credentials and issues an access/refresh token pair
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginInput) -> Result<TokenPair, AuthError> {
        let user = self.user_repo.get_user_by_username(&request.username)
            .await
            .map_err(|e| AuthError::UserLookup(e.to_string()))?;

        let Some(user) = user else {
            burn_verification_time(&request.password);
            return Err(AuthError::WrongCredentials);
        };

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!("Stored password hash is unusable: {}", e);
                AuthError::WrongCredentials
            })?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let pair = TokenPair {
            access: self.token_service.create_jwt(&user)?,
            refresh: self.token_service.create_refresh_jwt(user.id)?,
        };

        tracing::info!(user_id = user.id, "User logged in successfully");
        Ok(pair)
    }

    /// Issues a fresh access token from a valid refresh token
    #[instrument(skip_all)]
    pub async fn refresh_token(&self, request: RefreshInput) -> Result<AccessToken, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(&request.refresh)?;
        let user_id = decoded.claims.sub.parse::<i64>()
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self.user_repo.get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::UserLookup(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AccessToken {
            access: self.token_service.create_jwt(&user)?,
        })
    }

    /// Resolves the bearer token of a request to the identity it belongs to
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let claims = self.token_service.decode_jwt(token)?.claims;
        let user_id = claims.sub.parse::<i64>().map_err(|_| AuthError::InvalidToken)?;

        let user = self.user_repo.get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::UserLookup(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        Ok(CurrentUser::from(&user))
    }
}
