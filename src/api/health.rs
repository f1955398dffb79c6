//! Health check and statistics endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::notify::DispatcherStatsSnapshot;
use crate::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealthResponse,
    pub smtp: SmtpHealthResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealthResponse {
    pub backend: String,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpHealthResponse {
    pub host: String,
    pub port: u16,
    pub secure: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub notifications: DispatcherStatsSnapshot,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_connected = state.store.ping().await.is_ok();
    let status = if db_connected { "healthy" } else { "degraded" };

    Json(HealthResponse {
        success: true,
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database: DatabaseHealthResponse {
            backend: state.store.backend_type().to_string(),
            connected: db_connected,
        },
        smtp: SmtpHealthResponse {
            host: state.settings.smtp.host.clone(),
            port: state.settings.smtp.port,
            secure: state.settings.smtp.secure,
        },
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        success: true,
        notifications: state.dispatcher.stats(),
    })
}
