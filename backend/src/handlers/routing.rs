//! HTTP handlers for route planning endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::routing::{
    OptimizeOrderInput, OptimizedOrder, RouteEstimateReport, RoutePreviewInput,
};
use crate::services::RoutingService;
use crate::AppState;
use shared::RouteBreakdown;

/// Live distance preview for the route planning form
pub async fn preview_route_distance(
    State(state): State<AppState>,
    Json(input): Json<RoutePreviewInput>,
) -> AppResult<Json<RouteBreakdown>> {
    let service = RoutingService::from_config(&state.config);
    let breakdown = service.preview_distance(input)?;
    Ok(Json(breakdown))
}

/// Distance, duration and fuel for the route report
pub async fn estimate_route(
    State(state): State<AppState>,
    Json(input): Json<RoutePreviewInput>,
) -> AppResult<Json<RouteEstimateReport>> {
    let service = RoutingService::from_config(&state.config);
    let report = service.estimate(input)?;
    Ok(Json(report))
}

/// Suggest a visiting order for a set of producers
pub async fn optimize_route_order(
    State(state): State<AppState>,
    Json(input): Json<OptimizeOrderInput>,
) -> AppResult<Json<OptimizedOrder>> {
    let service = RoutingService::from_config(&state.config);
    let order = service.optimize_order(input)?;
    Ok(Json(order))
}
