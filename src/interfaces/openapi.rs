use actix_web::{get, HttpResponse, Responder};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::entities::{
    internship::Internship,
    skill::Skill,
    token::{AccessToken, TokenPair},
    user::{LoginInput, RefreshInput, RegisterInput, RegisterResponse},
    user_internship::UserInternship,
    user_skill::UserSkill,
};
use crate::handlers;

/// Write shape of a user skill; the owner is always the caller.
#[derive(ToSchema)]
pub struct UserSkillWriteDoc {
    pub skill_id: i64,
    pub progress: Option<i32>,
}

/// Write shape of a user internship; the owner is always the caller.
#[derive(ToSchema)]
pub struct UserInternshipWriteDoc {
    pub internship_id: i64,
    pub application_status: String,
    pub notes: Option<String>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home::home,
        handlers::system::health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh_token,
        handlers::skills::list_skills,
        handlers::skills::create_skill,
        handlers::skills::get_skill,
        handlers::skills::update_skill,
        handlers::skills::delete_skill,
        handlers::internships::list_internships,
        handlers::internships::create_internship,
        handlers::internships::get_internship,
        handlers::internships::update_internship,
        handlers::internships::delete_internship,
        handlers::user_skills::list_user_skills,
        handlers::user_skills::create_user_skill,
        handlers::user_skills::get_user_skill,
        handlers::user_skills::update_user_skill,
        handlers::user_skills::delete_user_skill,
        handlers::user_internships::list_user_internships,
        handlers::user_internships::create_user_internship,
        handlers::user_internships::get_user_internship,
        handlers::user_internships::update_user_internship,
        handlers::user_internships::delete_user_internship,
    ),
    components(
        schemas(
            Skill,
            Internship,
            UserSkill,
            UserInternship,
            UserSkillWriteDoc,
            UserInternshipWriteDoc,
            RegisterInput,
            RegisterResponse,
            LoginInput,
            RefreshInput,
            TokenPair,
            AccessToken,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "system"),
        (name = "auth"),
        (name = "skills"),
        (name = "internships"),
        (name = "user-skills"),
        (name = "user-internships")
    )
)]
pub struct ApiDoc;

#[get("/swagger.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
