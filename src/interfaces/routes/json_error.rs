use actix_web::web;

use crate::handlers::json_error::{json_error_handler, not_found, path_error_handler};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler));
    cfg.default_service(web::to(not_found));
}
