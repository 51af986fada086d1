//! WebAssembly module for the Cocoa Cooperative Platform
//!
//! Provides client-side computation for:
//! - Cut-test grading on the collection and stock forms
//! - Live route distance preview on the route planning form
//! - Travel time and fuel estimates
//! - Nearest-neighbour stop ordering

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::grading::*;
pub use shared::models::*;
pub use shared::routing::*;
pub use shared::types::*;
pub use shared::validation::*;

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&format!("{}: {}", context, err)).into()
}

/// Grade a cut-test given as JSON, returns the grading result as JSON
#[wasm_bindgen]
pub fn calculate_cocoa_grade(assessment_json: &str) -> Result<String, JsValue> {
    let assessment: QualityAssessment = serde_json::from_str(assessment_json)
        .map_err(|e| js_error("Invalid assessment JSON", e))?;

    let result = calculate_grade(&assessment);
    serde_json::to_string(&result).map_err(|e| js_error("Cannot encode grading result", e))
}

/// Grade label for the seven cut-test percentages
#[wasm_bindgen]
pub fn classify_cocoa_grade(
    mouldy_beans: f64,
    flat_beans: f64,
    violet_beans: f64,
    germinated_beans: f64,
    insect_damaged_beans: f64,
    foreign_matter: f64,
    humidity: f64,
) -> String {
    let assessment = QualityAssessment {
        mouldy_beans,
        flat_beans,
        violet_beans,
        germinated_beans,
        insect_damaged_beans,
        foreign_matter,
        humidity,
    };

    calculate_grade(&assessment).grade.to_string()
}

/// A/B/C tier for a grade label; empty for an unknown label
#[wasm_bindgen]
pub fn grade_to_quality_tier(grade: &str) -> String {
    grade
        .parse::<QualityGrade>()
        .map(|g| QualityTier::from(g).to_string())
        .unwrap_or_default()
}

/// Route length in km from JSON route, producers and cooperative
#[wasm_bindgen]
pub fn calculate_route_distance_json(
    route_json: &str,
    producers_json: &str,
    cooperative_json: &str,
) -> Result<f64, JsValue> {
    let route: Route =
        serde_json::from_str(route_json).map_err(|e| js_error("Invalid route JSON", e))?;
    let producers: Vec<Producer> =
        serde_json::from_str(producers_json).map_err(|e| js_error("Invalid producers JSON", e))?;
    let cooperative: Cooperative = serde_json::from_str(cooperative_json)
        .map_err(|e| js_error("Invalid cooperative JSON", e))?;

    let breakdown = route_breakdown(&route, &producers, &cooperative);
    if !breakdown.skipped_stops.is_empty() {
        warn(&format!(
            "Route {}: no coordinates for {}",
            route.id,
            breakdown.skipped_stops.join(", ")
        ));
    }
    Ok(breakdown.total_km)
}

/// Travel time in minutes
#[wasm_bindgen]
pub fn estimate_travel_minutes(distance_km: f64) -> f64 {
    estimate_duration(distance_km)
}

/// Fuel in litres, using the default consumption when `rate` is not positive
#[wasm_bindgen]
pub fn estimate_fuel_liters(distance_km: f64, rate: f64) -> f64 {
    let rate = if rate > 0.0 {
        rate
    } else {
        DEFAULT_FUEL_CONSUMPTION_PER_100KM
    };
    calculate_fuel_consumption(distance_km, rate)
}

/// Producers reordered by nearest neighbour from (lat, lon), as JSON
#[wasm_bindgen]
pub fn order_producers_json(producers_json: &str, latitude: f64, longitude: f64) -> Result<String, JsValue> {
    let producers: Vec<Producer> =
        serde_json::from_str(producers_json).map_err(|e| js_error("Invalid producers JSON", e))?;

    let ordered = order_by_nearest_neighbor(&producers, GeoPoint::new(latitude, longitude));
    serde_json::to_string(&ordered).map_err(|e| js_error("Cannot encode producers", e))
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}
