//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub cooperative: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        cooperative: state.config.cooperative.name.clone(),
    })
}

/// Fallback for unknown endpoints
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint".to_string())
}
