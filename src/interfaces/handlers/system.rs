use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::{
    sync::RwLock,
    time::{Duration, Instant},
};
use sysinfo::System;

use crate::{constants::START_TIME, AppState};

const REPORT_TTL: Duration = Duration::from_secs(5);

#[derive(Serialize, Clone)]
struct ComponentCheck {
    status: &'static str,
    latency_ms: Option<u128>,
}

#[derive(Serialize, Clone)]
struct HostInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
    process_memory: String,
}

#[derive(Serialize, Clone)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    started_at: String,
    checked_at: String,
    uptime: String,
    database: ComponentCheck,
    host: HostInfo,
}

static LAST_REPORT: Lazy<RwLock<Option<(Instant, HealthReport)>>> = Lazy::new(|| RwLock::new(None));

fn megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

fn host_info() -> HostInfo {
    let mut sys = System::new_all();
    sys.refresh_all();

    let unknown = || "Unknown".to_string();
    let process_memory = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or_else(unknown, |process| megabytes(process.memory()));

    HostInfo {
        os: System::name().unwrap_or_else(unknown),
        kernel: System::kernel_version().unwrap_or_else(unknown),
        hostname: System::host_name().unwrap_or_else(unknown),
        cpu_count: sys.cpus().len(),
        memory_total: format!("{:.2} GB", sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0),
        process_memory,
    }
}

async fn database_check(state: &AppState) -> ComponentCheck {
    let started = Instant::now();

    match state.auth_handler.user_repo.check_connection().await {
        Ok(()) => ComponentCheck {
            status: "ok",
            latency_ms: Some(started.elapsed().as_millis()),
        },
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            ComponentCheck { status: "unavailable", latency_ms: None }
        }
    }
}

async fn build_report(state: &AppState) -> HealthReport {
    let now = Utc::now();
    let uptime = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;
    let database = database_check(state).await;

    HealthReport {
        status: if database.status == "ok" { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        started_at: START_TIME.to_rfc3339(),
        checked_at: now.to_rfc3339(),
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
        database,
        host: host_info(),
    }
}

fn cached_report() -> Option<HealthReport> {
    let guard = LAST_REPORT.read().ok()?;
    guard
        .as_ref()
        .filter(|(taken, _)| taken.elapsed() < REPORT_TTL)
        .map(|(_, report)| report.clone())
}

/// Liveness plus a database round trip. Host probing is slow, so reports are reused briefly.
#[utoipa::path(get, path = "/health", tag = "system", responses((status = 200, description = "Health report")))]
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    if let Some(report) = cached_report() {
        return HttpResponse::Ok().json(report);
    }

    let report = build_report(&state).await;
    match LAST_REPORT.write() {
        Ok(mut slot) => *slot = Some((Instant::now(), report.clone())),
        Err(e) => tracing::warn!("Health report cache lock poisoned: {}", e),
    }

    HttpResponse::Ok().json(report)
}
