mod test_utils;
mod test_user;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use test_user::*;
use test_utils::*;

#[actix_rt::test]
async fn register_user_returns_201_for_valid_input() {
    let app = test::init_service(build_app(memory_state(InMemoryRepo::new()))).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(valid_registration())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "User registered successfully"}));
}

#[actix_rt::test]
async fn register_rejects_duplicate_username() {
    let app = test::init_service(build_app(memory_state(InMemoryRepo::new()))).await;

    let req = test::TestRequest::post().uri("/auth/register").set_json(valid_registration()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/auth/register").set_json(valid_registration()).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let errors: Value = test::read_body_json(resp).await;
    assert_eq!(errors["username"], json!(["A user with that username already exists."]));
}

#[actix_rt::test]
async fn register_rejects_weak_passwords() {
    let app = test::init_service(build_app(memory_state(InMemoryRepo::new()))).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"username": "ada", "password": "1234"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let errors: Value = test::read_body_json(resp).await;
    let messages = errors["password"].as_array().unwrap();
    assert!(messages.contains(&json!("This password is too short. It must contain at least 8 characters.")));
    assert!(messages.contains(&json!("This password is entirely numeric.")));
}

#[actix_rt::test]
async fn login_returns_tokens_accepted_by_resource_routes() {
    let app = test::init_service(build_app(memory_state(InMemoryRepo::new()))).await;

    let req = test::TestRequest::post().uri("/auth/register").set_json(valid_registration()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/auth/login").set_json(valid_login()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tokens: Value = test::read_body_json(resp).await;
    let access = tokens["access"].as_str().unwrap();
    assert!(tokens["refresh"].is_string());

    let req = test::TestRequest::get()
        .uri("/autolearn/user-skills/")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test::init_service(build_app(memory_state(InMemoryRepo::new()))).await;

    let req = test::TestRequest::post().uri("/auth/register").set_json(valid_registration()).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"username": "ada", "password": "not-the-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "No active account found with the given credentials");
}

#[actix_rt::test]
async fn login_without_password_is_a_validation_error() {
    let app = test::init_service(build_app(memory_state(InMemoryRepo::new()))).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"username": "ada"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let errors: Value = test::read_body_json(resp).await;
    assert_eq!(errors, json!({"password": ["This field is required."]}));
}

#[actix_rt::test]
async fn refresh_issues_a_new_access_token() {
    let app = test::init_service(build_app(memory_state(InMemoryRepo::new()))).await;

    let req = test::TestRequest::post().uri("/auth/register").set_json(valid_registration()).to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post().uri("/auth/login").set_json(valid_login()).to_request();
    let tokens: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh": tokens["refresh"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed: Value = test::read_body_json(resp).await;
    assert!(refreshed["access"].is_string());
    assert!(refreshed.get("refresh").is_none());
}

#[actix_rt::test]
async fn refresh_rejects_an_access_token() {
    let repo = InMemoryRepo::new();
    let ada = TestUser::seed(&repo, "ada");
    let app = test::init_service(build_app(memory_state(repo))).await;

    let req = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh": ada.access_token}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"detail": "Token is invalid or expired", "code": "token_not_valid"}));
}
