//! Health handler

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub service: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        service: "ml-carbon-predictor".to_string(),
    })
}
