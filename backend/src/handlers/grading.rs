//! HTTP handlers for cocoa quality grading endpoints

use axum::Json;

use crate::error::AppResult;
use crate::services::grading::{AssessQualityInput, GradingReport};
use crate::services::GradingService;
use shared::{Collection, StockEntry};

/// Grade a cut-test
pub async fn assess_quality(Json(input): Json<AssessQualityInput>) -> AppResult<Json<GradingReport>> {
    let service = GradingService::new();
    let report = service.assess(input)?;
    Ok(Json(report))
}

/// Grade a field collection at intake
pub async fn grade_collection(Json(collection): Json<Collection>) -> AppResult<Json<Collection>> {
    let service = GradingService::new();
    let collection = service.grade_collection(collection)?;
    Ok(Json(collection))
}

/// Re-assess a warehouse stock lot
pub async fn reassess_stock(Json(stock): Json<StockEntry>) -> AppResult<Json<StockEntry>> {
    let service = GradingService::new();
    let stock = service.reassess_stock(stock)?;
    Ok(Json(stock))
}
