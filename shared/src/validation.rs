//! Validation utilities for the Cocoa Cooperative Platform
//!
//! The grading and routing functions accept any numeric input. These checks
//! are what intake forms and API handlers run before calling them.

use std::collections::HashSet;

use crate::grading::{QualityAssessment, HUMIDITY_WARNING_THRESHOLD};
use crate::models::Route;
use crate::types::GeoPoint;

// ============================================================================
// Quality Validations
// ============================================================================

/// Validate a cut-test percentage (0-100)
pub fn validate_percentage(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Percentage must be a number");
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate all seven measurements of a cut-test
pub fn validate_quality_assessment(assessment: &QualityAssessment) -> Result<(), &'static str> {
    [
        assessment.mouldy_beans,
        assessment.flat_beans,
        assessment.violet_beans,
        assessment.germinated_beans,
        assessment.insect_damaged_beans,
        assessment.foreign_matter,
        assessment.humidity,
    ]
    .into_iter()
    .try_for_each(validate_percentage)
}

/// Humidity at or below the drying target
pub fn is_humidity_acceptable(humidity: f64) -> bool {
    humidity <= HUMIDITY_WARNING_THRESHOLD
}

// ============================================================================
// Routing Validations
// ============================================================================

/// Validate GPS coordinates
pub fn validate_coordinates(point: &GeoPoint) -> Result<(), &'static str> {
    if !point.latitude.is_finite() || !(-90.0..=90.0).contains(&point.latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !point.longitude.is_finite() || !(-180.0..=180.0).contains(&point.longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a route before it is saved or previewed
pub fn validate_route(route: &Route) -> Result<(), &'static str> {
    if route.stops.is_empty() {
        return Err("Route must have at least one stop");
    }

    let mut seen = HashSet::new();
    if !route.stops.iter().all(|s| seen.insert(s.producer_id.as_str())) {
        return Err("A producer can only appear once per route");
    }

    for location in [route.start_location, route.end_location].iter().flatten() {
        validate_coordinates(location)?;
    }
    Ok(())
}

/// Validate vehicle fuel consumption (litres per 100 km)
pub fn validate_fuel_rate(rate: f64) -> Result<(), &'static str> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err("Fuel consumption must be a positive number");
    }
    Ok(())
}
