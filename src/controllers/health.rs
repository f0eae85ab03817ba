use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// Backends wired in at startup, reported by the readiness probe
#[derive(Debug, Clone)]
pub struct ReadinessInfo {
    pub translation_provider: &'static str,
    pub tts_provider: &'static str,
    pub audio_delivery: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(info): State<Arc<ReadinessInfo>>) -> impl IntoResponse {
    // Backends are built (and optionally warmed up) before the listener binds
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "translation": info.translation_provider,
            "tts": info.tts_provider,
            "audio_delivery": info.audio_delivery
        })),
    )
}
