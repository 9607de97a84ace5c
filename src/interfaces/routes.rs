use actix_web::web;

use crate::handlers::{home::home, system::health_check};
use crate::openapi::openapi_json;

mod auth;
mod autolearn;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);
    cfg.service(openapi_json);

    cfg.configure(auth::config_routes);
    cfg.configure(autolearn::config_routes);

    cfg.configure(json_error::config_routes);
}
