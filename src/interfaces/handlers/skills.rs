use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::Caller, AppState};

#[utoipa::path(
    get,
    path = "/autolearn/skills",
    tag = "skills",
    responses((status = 200, description = "Every skill, ordered by id", body = [crate::entities::skill::Skill])),
    security(("bearer" = []))
)]
pub async fn list_skills(
    _caller: Caller,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[utoipa::path(
    post,
    path = "/autolearn/skills",
    tag = "skills",
    request_body = crate::entities::skill::Skill,
    responses(
        (status = 201, description = "Skill created", body = crate::entities::skill::Skill),
        (status = 400, description = "Field-keyed validation errors")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(_caller, state, data))]
pub async fn create_skill(
    _caller: Caller,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.create_skill(&data).await?;
    Ok(HttpResponse::Created().json(skill))
}

#[utoipa::path(
    get,
    path = "/autolearn/skills/{id}",
    tag = "skills",
    params(("id" = i64, Path, description = "Skill id")),
    responses(
        (status = 200, description = "The skill", body = crate::entities::skill::Skill),
        (status = 404, description = "Not found.")
    ),
    security(("bearer" = []))
)]
pub async fn get_skill(
    _caller: Caller,
    skill_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.get_skill(skill_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[utoipa::path(
    put,
    path = "/autolearn/skills/{id}",
    tag = "skills",
    params(("id" = i64, Path, description = "Skill id")),
    request_body = crate::entities::skill::Skill,
    responses(
        (status = 200, description = "The updated skill", body = crate::entities::skill::Skill),
        (status = 400, description = "Field-keyed validation errors"),
        (status = 404, description = "Not found.")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(_caller, state, data))]
pub async fn update_skill(
    _caller: Caller,
    skill_id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.update_skill(skill_id.into_inner(), &data).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[utoipa::path(
    delete,
    path = "/autolearn/skills/{id}",
    tag = "skills",
    params(("id" = i64, Path, description = "Skill id")),
    responses(
        (status = 204, description = "Skill deleted along with every user skill on it"),
        (status = 404, description = "Not found.")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(_caller, state))]
pub async fn delete_skill(
    _caller: Caller,
    skill_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill(skill_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
