use actix_web::{get, HttpResponse, Responder};

use crate::constants::API_PREFIX;

#[utoipa::path(get, path = "/", tag = "system", responses((status = 200, description = "Service information")))]
#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the AutoLearn API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "api": API_PREFIX,
        "auth": "/auth",
        "documentation": "/swagger.json"
    }))
}
