pub mod handlers;
pub mod middlewares;
pub mod openapi;
pub mod repositories;
pub mod routes;
