use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::Caller, AppState};

#[utoipa::path(
    get,
    path = "/autolearn/internships",
    tag = "internships",
    responses((status = 200, description = "Every internship, ordered by id", body = [crate::entities::internship::Internship])),
    security(("bearer" = []))
)]
pub async fn list_internships(
    _caller: Caller,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let internships = state.internship_handler.list_internships().await?;
    Ok(HttpResponse::Ok().json(internships))
}

#[utoipa::path(
    post,
    path = "/autolearn/internships",
    tag = "internships",
    request_body = crate::entities::internship::Internship,
    responses(
        (status = 201, description = "Internship created", body = crate::entities::internship::Internship),
        (status = 400, description = "Field-keyed validation errors")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(_caller, state, data))]
pub async fn create_internship(
    _caller: Caller,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let internship = state.internship_handler.create_internship(&data).await?;
    Ok(HttpResponse::Created().json(internship))
}

#[utoipa::path(
    get,
    path = "/autolearn/internships/{id}",
    tag = "internships",
    params(("id" = i64, Path, description = "Internship id")),
    responses(
        (status = 200, description = "The internship", body = crate::entities::internship::Internship),
        (status = 404, description = "Not found.")
    ),
    security(("bearer" = []))
)]
pub async fn get_internship(
    _caller: Caller,
    internship_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let internship = state.internship_handler.get_internship(internship_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(internship))
}

#[utoipa::path(
    put,
    path = "/autolearn/internships/{id}",
    tag = "internships",
    params(("id" = i64, Path, description = "Internship id")),
    request_body = crate::entities::internship::Internship,
    responses(
        (status = 200, description = "The updated internship", body = crate::entities::internship::Internship),
        (status = 400, description = "Field-keyed validation errors"),
        (status = 404, description = "Not found.")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(_caller, state, data))]
pub async fn update_internship(
    _caller: Caller,
    internship_id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let internship = state.internship_handler
        .update_internship(internship_id.into_inner(), &data)
        .await?;
    Ok(HttpResponse::Ok().json(internship))
}

#[utoipa::path(
    delete,
    path = "/autolearn/internships/{id}",
    tag = "internships",
    params(("id" = i64, Path, description = "Internship id")),
    responses(
        (status = 204, description = "Internship deleted along with every application to it"),
        (status = 404, description = "Not found.")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(_caller, state))]
pub async fn delete_internship(
    _caller: Caller,
    internship_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.internship_handler.delete_internship(internship_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
