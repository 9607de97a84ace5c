use actix_web::{post, web, HttpResponse, Responder};
use serde_json::Value;

use crate::entities::user::{LoginInput, RefreshInput};
use crate::errors::AppError;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = crate::entities::user::RegisterInput,
    responses(
        (status = 201, description = "User registered", body = crate::entities::user::RegisterResponse),
        (status = 400, description = "Field-keyed validation errors")
    )
)]
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<Value>
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.register(&body).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Access and refresh token pair", body = crate::entities::token::TokenPair),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "No active account found with the given credentials")
    )
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<Value>
) -> Result<impl Responder, actix_web::Error> {
    let request = LoginInput::parse(&body).map_err(AppError::from)?;
    let pair = state.auth_handler.login(request).await?;
    Ok(HttpResponse::Ok().json(pair))
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    request_body = RefreshInput,
    responses(
        (status = 200, description = "Fresh access token", body = crate::entities::token::AccessToken),
        (status = 400, description = "Missing refresh token"),
        (status = 401, description = "Token is invalid or expired")
    )
)]
#[post("/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<impl Responder, actix_web::Error> {
    let request = RefreshInput::parse(&body).map_err(AppError::from)?;
    let token = state.auth_handler.refresh_token(request).await?;
    Ok(HttpResponse::Ok().json(token))
}
