#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::NormalizePath,
    web, App,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use autolearn_api::{
    entities::{
        internship::{Internship, InternshipFields},
        skill::{Skill, SkillFields},
        user::{User, UserInsert},
        user_internship::{UserInternship, UserInternshipFields},
        user_skill::{UserSkill, UserSkillFields},
    },
    errors::AppError,
    repositories::{
        internship::InternshipRepository,
        skill::SkillRepository,
        user::UserRepository,
        user_internship::UserInternshipRepository,
        user_skill::UserSkillRepository,
    },
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    shared_repos::SharedRepositories,
    AppState,
};

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "AutoLearn API Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/autolearn_test".into()),
        database_max_connections: 5,
        cors_allowed_origins: vec!["*".to_string()],
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
        jwt_expiration_minutes: 5,
        refresh_token_secret: "test_refresh_secret_that_is_long_enough_1234567890".into(),
        refresh_token_exp_days: 1,
    }
}

/// Builds the application exactly as `main` does, minus CORS and request logging.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(NormalizePath::trim())
        .configure(configure_routes)
}

pub fn memory_state(repo: Arc<InMemoryRepo>) -> web::Data<AppState> {
    web::Data::new(AppState::from_repositories(
        &test_config(),
        SharedRepositories::from_store(repo),
    ))
}

struct StoredUserSkill {
    user_id: i64,
    skill_id: i64,
    progress: i32,
    last_updated: DateTime<Utc>,
}

struct StoredUserInternship {
    user_id: i64,
    internship_id: i64,
    application_status: String,
    notes: String,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    skills: BTreeMap<i64, Skill>,
    internships: BTreeMap<i64, Internship>,
    user_skills: BTreeMap<i64, StoredUserSkill>,
    user_internships: BTreeMap<i64, StoredUserInternship>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_skill(&self, id: i64) -> Option<UserSkill> {
        let row = self.user_skills.get(&id)?;
        Some(UserSkill {
            id,
            user_id: row.user_id,
            skill: self.skills.get(&row.skill_id)?.clone(),
            progress: row.progress,
            last_updated: row.last_updated,
        })
    }

    fn user_internship(&self, id: i64) -> Option<UserInternship> {
        let row = self.user_internships.get(&id)?;
        Some(UserInternship {
            id,
            user_id: row.user_id,
            internship: self.internships.get(&row.internship_id)?.clone(),
            application_status: row.application_status.clone(),
            notes: row.notes.clone(),
        })
    }
}

/// Store with the same observable behaviour as the Postgres one: ids are
/// assigned in increasing order, usernames are unique and deleting a user,
/// skill or internship cascades to the rows referencing it.
#[derive(Default)]
pub struct InMemoryRepo {
    tables: Mutex<Tables>,
}

impl InMemoryRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_user(&self, username: &str) -> User {
        let mut tables = self.tables();
        let id = tables.next_id();
        let user = User {
            id,
            username: username.to_string(),
            email: String::new(),
            password_hash: "unused".to_string(),
            date_joined: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        user
    }

    pub fn delete_user(&self, id: i64) {
        let mut tables = self.tables();
        tables.users.remove(&id);
        tables.user_skills.retain(|_, row| row.user_id != id);
        tables.user_internships.retain(|_, row| row.user_id != id);
    }

    pub fn user_skill_count(&self) -> usize {
        self.tables().user_skills.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_user(&self, user: &UserInsert) -> Result<i64, AppError> {
        let mut tables = self.tables();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Database conflict occurred".into()));
        }
        let id = tables.next_id();
        tables.users.insert(id, User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            date_joined: Utc::now(),
        });
        Ok(id)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.values().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.get(&id).cloned())
    }
}

#[async_trait]
impl SkillRepository for InMemoryRepo {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        Ok(self.tables().skills.values().cloned().collect())
    }

    async fn get_skill(&self, id: i64) -> Result<Option<Skill>, AppError> {
        Ok(self.tables().skills.get(&id).cloned())
    }

    async fn skill_exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().skills.contains_key(&id))
    }

    async fn create_skill(&self, fields: &SkillFields) -> Result<Skill, AppError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let skill = Skill {
            id,
            name: fields.name.clone(),
            description: fields.description.clone(),
            proficiency_level: fields.proficiency_level,
        };
        tables.skills.insert(id, skill.clone());
        Ok(skill)
    }

    async fn update_skill(&self, id: i64, fields: &SkillFields) -> Result<Option<Skill>, AppError> {
        let mut tables = self.tables();
        Ok(tables.skills.get_mut(&id).map(|skill| {
            skill.name = fields.name.clone();
            skill.description = fields.description.clone();
            skill.proficiency_level = fields.proficiency_level;
            skill.clone()
        }))
    }

    async fn delete_skill(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let removed = tables.skills.remove(&id).is_some();
        tables.user_skills.retain(|_, row| row.skill_id != id);
        Ok(removed)
    }
}

#[async_trait]
impl InternshipRepository for InMemoryRepo {
    async fn list_internships(&self) -> Result<Vec<Internship>, AppError> {
        Ok(self.tables().internships.values().cloned().collect())
    }

    async fn get_internship(&self, id: i64) -> Result<Option<Internship>, AppError> {
        Ok(self.tables().internships.get(&id).cloned())
    }

    async fn internship_exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables().internships.contains_key(&id))
    }

    async fn create_internship(&self, fields: &InternshipFields) -> Result<Internship, AppError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let internship = Internship {
            id,
            title: fields.title.clone(),
            company: fields.company.clone(),
            start_date: fields.start_date,
            end_date: fields.end_date,
            status: fields.status.clone(),
        };
        tables.internships.insert(id, internship.clone());
        Ok(internship)
    }

    async fn update_internship(&self, id: i64, fields: &InternshipFields) -> Result<Option<Internship>, AppError> {
        let mut tables = self.tables();
        Ok(tables.internships.get_mut(&id).map(|internship| {
            internship.title = fields.title.clone();
            internship.company = fields.company.clone();
            internship.start_date = fields.start_date;
            internship.end_date = fields.end_date;
            internship.status = fields.status.clone();
            internship.clone()
        }))
    }

    async fn delete_internship(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let removed = tables.internships.remove(&id).is_some();
        tables.user_internships.retain(|_, row| row.internship_id != id);
        Ok(removed)
    }
}

#[async_trait]
impl UserSkillRepository for InMemoryRepo {
    async fn list_user_skills(&self, user_id: i64) -> Result<Vec<UserSkill>, AppError> {
        let tables = self.tables();
        Ok(tables.user_skills.iter()
            .filter(|(_, row)| row.user_id == user_id)
            .filter_map(|(id, _)| tables.user_skill(*id))
            .collect())
    }

    async fn get_user_skill(&self, id: i64, user_id: i64) -> Result<Option<UserSkill>, AppError> {
        Ok(self.tables().user_skill(id).filter(|us| us.user_id == user_id))
    }

    async fn create_user_skill(&self, user_id: i64, fields: &UserSkillFields) -> Result<UserSkill, AppError> {
        let mut tables = self.tables();
        if !tables.skills.contains_key(&fields.skill_id) {
            return Err(AppError::Conflict("Foreign key violation".into()));
        }
        let id = tables.next_id();
        tables.user_skills.insert(id, StoredUserSkill {
            user_id,
            skill_id: fields.skill_id,
            progress: fields.progress,
            last_updated: Utc::now(),
        });
        tables.user_skill(id).ok_or_else(|| AppError::InternalError("row vanished".into()))
    }

    async fn update_user_skill(&self, id: i64, user_id: i64, fields: &UserSkillFields) -> Result<Option<UserSkill>, AppError> {
        let mut tables = self.tables();
        match tables.user_skills.get_mut(&id) {
            Some(row) if row.user_id == user_id => {
                row.skill_id = fields.skill_id;
                row.progress = fields.progress;
                row.last_updated = Utc::now();
            }
            _ => return Ok(None),
        }
        Ok(tables.user_skill(id))
    }

    async fn delete_user_skill(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let owned = tables.user_skills.get(&id).is_some_and(|row| row.user_id == user_id);
        if owned {
            tables.user_skills.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl UserInternshipRepository for InMemoryRepo {
    async fn list_user_internships(&self, user_id: i64) -> Result<Vec<UserInternship>, AppError> {
        let tables = self.tables();
        Ok(tables.user_internships.iter()
            .filter(|(_, row)| row.user_id == user_id)
            .filter_map(|(id, _)| tables.user_internship(*id))
            .collect())
    }

    async fn get_user_internship(&self, id: i64, user_id: i64) -> Result<Option<UserInternship>, AppError> {
        Ok(self.tables().user_internship(id).filter(|ui| ui.user_id == user_id))
    }

    async fn create_user_internship(&self, user_id: i64, fields: &UserInternshipFields) -> Result<UserInternship, AppError> {
        let mut tables = self.tables();
        if !tables.internships.contains_key(&fields.internship_id) {
            return Err(AppError::Conflict("Foreign key violation".into()));
        }
        let id = tables.next_id();
        tables.user_internships.insert(id, StoredUserInternship {
            user_id,
            internship_id: fields.internship_id,
            application_status: fields.application_status.clone(),
            notes: fields.notes.clone(),
        });
        tables.user_internship(id).ok_or_else(|| AppError::InternalError("row vanished".into()))
    }

    async fn update_user_internship(
        &self,
        id: i64,
        user_id: i64,
        fields: &UserInternshipFields,
    ) -> Result<Option<UserInternship>, AppError> {
        let mut tables = self.tables();
        match tables.user_internships.get_mut(&id) {
            Some(row) if row.user_id == user_id => {
                row.internship_id = fields.internship_id;
                row.application_status = fields.application_status.clone();
                row.notes = fields.notes.clone();
            }
            _ => return Ok(None),
        }
        Ok(tables.user_internship(id))
    }

    async fn delete_user_internship(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let owned = tables.user_internships.get(&id).is_some_and(|row| row.user_id == user_id);
        if owned {
            tables.user_internships.remove(&id);
        }
        Ok(owned)
    }
}

/// A real server on an ephemeral port backed by Postgres, for end-to-end runs.
pub struct TestApp {
    pub address: String,
    pub db_pool: sqlx::PgPool,
    pub client: reqwest::Client,
}

impl TestApp {
    /// `None` when `TEST_DATABASE_URL` is not set.
    pub async fn spawn() -> Option<Self> {
        let database_url = std::env::var("TEST_DATABASE_URL").ok()?;
        let config = AppConfig { database_url, ..test_config() };

        let db_pool = autolearn_api::db::postgres::create_pool(&config.database_url, config.database_max_connections)
            .await
            .expect("Failed to create test DB pool");
        autolearn_api::db::postgres::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let state = web::Data::new(AppState::new(&config, db_pool.clone()));
        let server = actix_web::HttpServer::new(move || build_app(state.clone()))
            .listen(listener)
            .expect("Failed to bind server")
            .workers(1)
            .run();
        tokio::spawn(server);

        let client = reqwest::Client::new();
        while client.get(format!("{}/", address)).send().await.is_err() {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        Some(TestApp { address, db_pool, client })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Registers and logs in a fresh user, returning its access token.
    pub async fn signed_in_user(&self) -> String {
        let username = format!("user_{}", uuid::Uuid::new_v4().simple());
        let password = "violet-Harbor-mango-42";

        let response = self.client
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to register user");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let tokens: serde_json::Value = self.client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to login user")
            .json()
            .await
            .expect("Failed to parse login response");

        tokens["access"].as_str().expect("access token").to_string()
    }
}
