//! Health endpoints: liveness ping, dependency detail, readiness.
//!
//! The service is built to stay useful without its database, so readiness
//! requires the remote store *or* a writable fallback store — never both.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::db;
use crate::store::LocalStore;

lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Pins the start instant; called once from `run()`.
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub database: ServiceCheck,
    pub fallback_store: ServiceCheck,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub ready: bool,
}

async fn check_database() -> ServiceCheck {
    match db::health_check().await {
        Ok(elapsed) => ServiceCheck {
            status: "healthy".into(),
            response_time_ms: Some(elapsed.as_millis() as u64),
            error: None,
        },
        Err(e) => ServiceCheck {
            status: "unavailable".into(),
            response_time_ms: None,
            error: Some(e.to_string()),
        },
    }
}

fn check_fallback_store() -> ServiceCheck {
    let start = Instant::now();
    match LocalStore::default().probe() {
        Ok(()) => ServiceCheck {
            status: "healthy".into(),
            response_time_ms: Some(start.elapsed().as_millis() as u64),
            error: None,
        },
        Err(e) => ServiceCheck {
            status: "unhealthy".into(),
            response_time_ms: None,
            error: Some(e.to_string()),
        },
    }
}

/// GET /health
pub async fn health_ping() -> impl IntoResponse {
    Json(PingResponse {
        status: "ok".into(),
        timestamp: Utc::now(),
        uptime_secs: SERVER_START.elapsed().as_secs(),
    })
}

/// GET /health/detailed
pub async fn health_detailed() -> impl IntoResponse {
    let database = check_database().await;
    let fallback_store = check_fallback_store();

    // Degraded-but-serving is still "ok"; only losing both stores is not.
    let status = if database.status == "healthy" || fallback_store.status == "healthy" {
        "ok"
    } else {
        "unhealthy"
    };
    let code = if status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(DetailedHealthResponse {
            status: status.into(),
            timestamp: Utc::now(),
            uptime_secs: SERVER_START.elapsed().as_secs(),
            checks: HealthChecks {
                database,
                fallback_store,
            },
        }),
    )
}

/// GET /health/database
pub async fn health_database() -> impl IntoResponse {
    let check = check_database().await;
    let code = if check.status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(check))
}

/// GET /health/ready
pub async fn health_ready() -> impl IntoResponse {
    let ready =
        db::health_check().await.is_ok() || LocalStore::default().probe().is_ok();
    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(ReadyResponse { ready }))
}
