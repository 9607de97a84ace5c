use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::Caller, AppState};

#[utoipa::path(
    get,
    path = "/autolearn/user-internships",
    tag = "user-internships",
    responses((status = 200, description = "The caller's applications, ordered by id", body = [crate::entities::user_internship::UserInternship])),
    security(("bearer" = []))
)]
pub async fn list_user_internships(
    caller: Caller,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_internships = state.user_internship_handler.list_user_internships(&caller.0).await?;
    Ok(HttpResponse::Ok().json(user_internships))
}

#[utoipa::path(
    post,
    path = "/autolearn/user-internships",
    tag = "user-internships",
    request_body = crate::openapi::UserInternshipWriteDoc,
    responses(
        (status = 201, description = "Application recorded for the caller", body = crate::entities::user_internship::UserInternship),
        (status = 400, description = "Field-keyed validation errors")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(caller, state, data), fields(user_id = caller.0.id))]
pub async fn create_user_internship(
    caller: Caller,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let user_internship = state.user_internship_handler
        .create_user_internship(&caller.0, &data)
        .await?;
    Ok(HttpResponse::Created().json(user_internship))
}

#[utoipa::path(
    get,
    path = "/autolearn/user-internships/{id}",
    tag = "user-internships",
    params(("id" = i64, Path, description = "User internship id")),
    responses(
        (status = 200, description = "The application", body = crate::entities::user_internship::UserInternship),
        (status = 404, description = "Not found, or owned by someone else")
    ),
    security(("bearer" = []))
)]
pub async fn get_user_internship(
    caller: Caller,
    user_internship_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_internship = state.user_internship_handler
        .get_user_internship(&caller.0, user_internship_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user_internship))
}

#[utoipa::path(
    put,
    path = "/autolearn/user-internships/{id}",
    tag = "user-internships",
    params(("id" = i64, Path, description = "User internship id")),
    request_body = crate::openapi::UserInternshipWriteDoc,
    responses(
        (status = 200, description = "The updated application", body = crate::entities::user_internship::UserInternship),
        (status = 400, description = "Field-keyed validation errors"),
        (status = 404, description = "Not found, or owned by someone else")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(caller, state, data), fields(user_id = caller.0.id))]
pub async fn update_user_internship(
    caller: Caller,
    user_internship_id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let user_internship = state.user_internship_handler
        .update_user_internship(&caller.0, user_internship_id.into_inner(), &data)
        .await?;
    Ok(HttpResponse::Ok().json(user_internship))
}

#[utoipa::path(
    delete,
    path = "/autolearn/user-internships/{id}",
    tag = "user-internships",
    params(("id" = i64, Path, description = "User internship id")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Not found, or owned by someone else")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(caller, state), fields(user_id = caller.0.id))]
pub async fn delete_user_internship(
    caller: Caller,
    user_internship_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.user_internship_handler
        .delete_user_internship(&caller.0, user_internship_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
