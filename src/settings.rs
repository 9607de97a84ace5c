use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl AppEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        }
    }
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [AppEnvironment::Development, AppEnvironment::Production, AppEnvironment::Testing]
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::Message(format!("Invalid APP_ENV value: {}", s)))
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime settings. Defaults live in [`AppConfig::new`], secrets have none.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub env: AppEnvironment,
    pub name: String,
    pub port: u16,
    pub host: String,
    pub worker_count: usize,
    #[serde(default)]
    pub database_url: String,
    pub database_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    #[serde(default)]
    pub refresh_token_secret: String,
    pub refresh_token_exp_days: i64,
}

impl AppConfig {
    /// Layers built-in defaults, `config/default`, `config/<APP_ENV>` and
    /// `APP_*` variables, later sources winning. `APP_CORS_ALLOWED_ORIGINS`
    /// takes a comma separated list.
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let env_name: AppEnvironment = env::var("APP_ENV")
            .unwrap_or_else(|_| AppEnvironment::Development.to_string())
            .parse()?;

        let config: Self = Config::builder()
            .set_default("env", env_name.as_str())?
            .set_default("name", "AutoLearn-API")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("worker_count", num_cpus::get() as u64)?
            .set_default("database_max_connections", 20)?
            .set_default("cors_allowed_origins", vec!["*"])?
            .set_default("jwt_expiration_minutes", 5)?
            .set_default("refresh_token_exp_days", 1)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            )
            .set_override("env", env_name.as_str())?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.database_url.trim().is_empty() {
            problems.push("APP_DATABASE_URL must be set");
        }
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            problems.push("APP_JWT_SECRET must be at least 32 characters");
        }
        if self.refresh_token_secret.len() < MIN_SECRET_LEN {
            problems.push("APP_REFRESH_TOKEN_SECRET must be at least 32 characters");
        }
        if self.jwt_expiration_minutes <= 0 || self.refresh_token_exp_days <= 0 {
            problems.push("Token lifetimes must be positive");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            problems.push("Wildcard CORS (*) is not allowed in production");
        }

        match problems.is_empty() {
            true => Ok(()),
            false => Err(ConfigError::Message(problems.join(", "))),
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }
}

const MIN_SECRET_LEN: usize = 32;

fn redact(secret: &str) -> &'static str {
    match secret.len() {
        0 => "[MISSING]",
        n if n < MIN_SECRET_LEN => "[TOO_SHORT]",
        _ => "[REDACTED]",
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("bind", &format_args!("{}:{}", self.host, self.port))
            .field("worker_count", &self.worker_count)
            .field("database_url", &redact(&self.database_url))
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret", &redact(&self.jwt_secret))
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("refresh_token_secret", &redact(&self.refresh_token_secret))
            .field("refresh_token_exp_days", &self.refresh_token_exp_days)
            .finish()
    }
}

/// Signing material for access and refresh tokens.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub refresh_encoding: EncodingKey,
    pub refresh_decoding: DecodingKey,
}

impl From<&AppConfig> for JwtKeys {
    fn from(config: &AppConfig) -> Self {
        let jwt_secret = Zeroizing::new(config.jwt_secret.clone());
        let refresh_secret = Zeroizing::new(config.refresh_token_secret.clone());

        JwtKeys {
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtKeys([REDACTED])")
    }
}
