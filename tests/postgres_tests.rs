mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};

use test_utils::*;

#[actix_rt::test]
async fn user_skill_flow_against_postgres() {
    let Some(app) = TestApp::spawn().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping Postgres end-to-end test");
        return;
    };
    let ada = app.signed_in_user().await;
    let bob = app.signed_in_user().await;

    let response = app.client
        .post(app.url("/autolearn/skills/"))
        .bearer_auth(&ada)
        .json(&json!({"name": "Go", "proficiency_level": 50}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let skill: Value = response.json().await.unwrap();
    assert_eq!(skill["description"], "");

    let response = app.client
        .post(app.url("/autolearn/user-skills/"))
        .bearer_auth(&ada)
        .json(&json!({"skill_id": skill["id"], "progress": 40}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let user_skill: Value = response.json().await.unwrap();
    assert_eq!(user_skill["skill"], skill);
    assert!(user_skill["last_updated"].is_string());

    let theirs: Value = app.client
        .get(app.url("/autolearn/user-skills/"))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(theirs, json!([]));

    let uri = app.url(&format!("/autolearn/user-skills/{}/", user_skill["id"]));
    let response = app.client
        .put(&uri)
        .bearer_auth(&ada)
        .json(&json!({"skill_id": skill["id"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["progress"], 40);

    let response = app.client.delete(&uri).bearer_auth(&bob).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.client
        .delete(app.url(&format!("/autolearn/skills/{}", skill["id"])))
        .bearer_auth(&ada)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.client.get(&uri).bearer_auth(&ada).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_skills WHERE skill_id = $1")
        .bind(skill["id"].as_i64().unwrap())
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[actix_rt::test]
async fn internship_dates_round_trip_through_postgres() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let ada = app.signed_in_user().await;

    let payload = json!({
        "title": "Backend Intern",
        "company": "Acme",
        "start_date": "2024-06-01",
        "end_date": "2024-08-31",
        "status": "Applied"
    });
    let response = app.client
        .post(app.url("/autolearn/internships"))
        .bearer_auth(&ada)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();

    let fetched: Value = app.client
        .get(app.url(&format!("/autolearn/internships/{}", created["id"])))
        .bearer_auth(&ada)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched["end_date"], "2024-08-31");
}
