use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::Caller, AppState};

#[utoipa::path(
    get,
    path = "/autolearn/user-skills",
    tag = "user-skills",
    responses((status = 200, description = "The caller's skills, ordered by id", body = [crate::entities::user_skill::UserSkill])),
    security(("bearer" = []))
)]
pub async fn list_user_skills(
    caller: Caller,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_skills = state.user_skill_handler.list_user_skills(&caller.0).await?;
    Ok(HttpResponse::Ok().json(user_skills))
}

#[utoipa::path(
    post,
    path = "/autolearn/user-skills",
    tag = "user-skills",
    request_body = crate::openapi::UserSkillWriteDoc,
    responses(
        (status = 201, description = "User skill created for the caller", body = crate::entities::user_skill::UserSkill),
        (status = 400, description = "Field-keyed validation errors")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(caller, state, data), fields(user_id = caller.0.id))]
pub async fn create_user_skill(
    caller: Caller,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let user_skill = state.user_skill_handler.create_user_skill(&caller.0, &data).await?;
    Ok(HttpResponse::Created().json(user_skill))
}

#[utoipa::path(
    get,
    path = "/autolearn/user-skills/{id}",
    tag = "user-skills",
    params(("id" = i64, Path, description = "User skill id")),
    responses(
        (status = 200, description = "The user skill", body = crate::entities::user_skill::UserSkill),
        (status = 404, description = "Not found, or owned by someone else")
    ),
    security(("bearer" = []))
)]
pub async fn get_user_skill(
    caller: Caller,
    user_skill_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_skill = state.user_skill_handler
        .get_user_skill(&caller.0, user_skill_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user_skill))
}

#[utoipa::path(
    put,
    path = "/autolearn/user-skills/{id}",
    tag = "user-skills",
    params(("id" = i64, Path, description = "User skill id")),
    request_body = crate::openapi::UserSkillWriteDoc,
    responses(
        (status = 200, description = "The updated user skill", body = crate::entities::user_skill::UserSkill),
        (status = 400, description = "Field-keyed validation errors"),
        (status = 404, description = "Not found, or owned by someone else")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(caller, state, data), fields(user_id = caller.0.id))]
pub async fn update_user_skill(
    caller: Caller,
    user_skill_id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let user_skill = state.user_skill_handler
        .update_user_skill(&caller.0, user_skill_id.into_inner(), &data)
        .await?;
    Ok(HttpResponse::Ok().json(user_skill))
}

#[utoipa::path(
    delete,
    path = "/autolearn/user-skills/{id}",
    tag = "user-skills",
    params(("id" = i64, Path, description = "User skill id")),
    responses(
        (status = 204, description = "User skill deleted"),
        (status = 404, description = "Not found, or owned by someone else")
    ),
    security(("bearer" = []))
)]
#[instrument(skip(caller, state), fields(user_id = caller.0.id))]
pub async fn delete_user_skill(
    caller: Caller,
    user_skill_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.user_skill_handler
        .delete_user_skill(&caller.0, user_skill_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
