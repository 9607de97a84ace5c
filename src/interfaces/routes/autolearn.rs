use actix_web::web;

use crate::constants::API_PREFIX;
use crate::handlers::{internships, skills, user_internships, user_skills};
use crate::middlewares::auth::AuthMiddleware;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .wrap(AuthMiddleware)
            .service(
                web::scope("/skills")
                    .service(
                        web::resource("")
                            .route(web::get().to(skills::list_skills))
                            .route(web::post().to(skills::create_skill))
                    )
                    .service(
                        web::resource("/{id:\\d+}")
                            .route(web::get().to(skills::get_skill))
                            .route(web::put().to(skills::update_skill))
                            .route(web::delete().to(skills::delete_skill))
                    )
            )
            .service(
                web::scope("/internships")
                    .service(
                        web::resource("")
                            .route(web::get().to(internships::list_internships))
                            .route(web::post().to(internships::create_internship))
                    )
                    .service(
                        web::resource("/{id:\\d+}")
                            .route(web::get().to(internships::get_internship))
                            .route(web::put().to(internships::update_internship))
                            .route(web::delete().to(internships::delete_internship))
                    )
            )
            .service(
                web::scope("/user-skills")
                    .service(
                        web::resource("")
                            .route(web::get().to(user_skills::list_user_skills))
                            .route(web::post().to(user_skills::create_user_skill))
                    )
                    .service(
                        web::resource("/{id:\\d+}")
                            .route(web::get().to(user_skills::get_user_skill))
                            .route(web::put().to(user_skills::update_user_skill))
                            .route(web::delete().to(user_skills::delete_user_skill))
                    )
            )
            .service(
                web::scope("/user-internships")
                    .service(
                        web::resource("")
                            .route(web::get().to(user_internships::list_user_internships))
                            .route(web::post().to(user_internships::create_user_internship))
                    )
                    .service(
                        web::resource("/{id:\\d+}")
                            .route(web::get().to(user_internships::get_user_internship))
                            .route(web::put().to(user_internships::update_user_internship))
                            .route(web::delete().to(user_internships::delete_user_internship))
                    )
            )
    );
}
