use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const NOT_FOUND_DETAIL: &str = "Not found.";
pub const SERVER_ERROR_DETAIL: &str = "A server error occurred.";

/// Prefix of every resource route.
pub const API_PREFIX: &str = "/autolearn";
