//! Route definitions for the Cocoa Cooperative Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/grading", grading_routes())
        .nest("/routes", route_planning_routes())
}

/// Quality grading routes
fn grading_routes() -> Router<AppState> {
    Router::new()
        .route("/assess", post(handlers::assess_quality))
        .route("/collections", post(handlers::grade_collection))
        .route("/stock", post(handlers::reassess_stock))
}

/// Route planning routes
fn route_planning_routes() -> Router<AppState> {
    Router::new()
        .route("/distance", post(handlers::preview_route_distance))
        .route("/estimate", post(handlers::estimate_route))
        .route("/optimize", post(handlers::optimize_route_order))
}
