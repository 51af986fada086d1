//! Route distance, duration and fuel estimation for collection tours
//!
//! All figures derive from great-circle distances between plantation
//! coordinates. Distances are recomputed from the producers' current
//! coordinates on every call; nothing here snapshots a route.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{find_producer, Cooperative, Producer, Route};
use crate::types::{GeoPoint, Located};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average speed of a collection truck on rural roads
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

pub const DEFAULT_FUEL_CONSUMPTION_PER_100KM: f64 = 8.0;

// ============================================================================
// Distance primitives
// ============================================================================

/// Great-circle distance in kilometres (haversine)
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    // Rounding can push h just past 1 for antipodal points
    let h = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance of each consecutive leg
pub fn segment_distances(points: &[GeoPoint]) -> Vec<f64> {
    points.windows(2).map(|w| distance(w[0], w[1])).collect()
}

/// Sum of consecutive leg distances. Zero for fewer than two points.
pub fn total_distance(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Travel time in minutes at [`AVERAGE_SPEED_KMH`]
pub fn estimate_duration(distance_km: f64) -> f64 {
    distance_km / AVERAGE_SPEED_KMH * 60.0
}

/// Fuel in litres for a vehicle burning `consumption_per_100km`
pub fn calculate_fuel_consumption(distance_km: f64, consumption_per_100km: f64) -> f64 {
    distance_km * consumption_per_100km / 100.0
}

/// Human-readable duration, e.g. `"1h 30min"` or `"45min"`
pub fn format_duration(minutes: f64) -> String {
    let total = if minutes.is_finite() && minutes > 0.0 {
        minutes.round() as u64
    } else {
        0
    };
    let (hours, mins) = (total / 60, total % 60);
    match (hours, mins) {
        (0, m) => format!("{}min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}

// ============================================================================
// Stop ordering
// ============================================================================

/// Reorder items with a greedy nearest-neighbour walk from `start`.
///
/// At each step the closest unvisited item is taken; on ties the earlier
/// item in `items` wins. This is a heuristic, O(n²), and does not find the
/// shortest possible tour. Items without a location cannot be placed and are
/// appended at the end in their original order.
pub fn order_by_nearest_neighbor<T: Located + Clone>(items: &[T], start: GeoPoint) -> Vec<T> {
    let mut pending: Vec<(usize, GeoPoint)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.location().map(|loc| (i, loc)))
        .collect();

    let mut ordered = Vec::with_capacity(items.len());
    let mut current = start;

    while !pending.is_empty() {
        let mut nearest = 0;
        let mut nearest_km = distance(current, pending[0].1);
        for (slot, (_, loc)) in pending.iter().enumerate().skip(1) {
            let km = distance(current, *loc);
            if km < nearest_km {
                nearest = slot;
                nearest_km = km;
            }
        }

        let (index, loc) = pending.remove(nearest);
        ordered.push(items[index].clone());
        current = loc;
    }

    ordered.extend(items.iter().filter(|item| item.location().is_none()).cloned());
    ordered
}

// ============================================================================
// Route distance
// ============================================================================

/// Resolved geometry of a route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteBreakdown {
    /// Points in travel order, start and end included
    pub points: Vec<GeoPoint>,
    pub segments_km: Vec<f64>,
    pub total_km: f64,
    /// Stops whose producer or producer location could not be found
    pub skipped_stops: Vec<String>,
}

/// Resolve a route into its travel points and legs.
///
/// A stop whose producer is missing, or has no coordinates, is skipped and
/// reported in `skipped_stops`; the remaining legs still count. Skipping
/// understates the distance rather than failing the whole route.
pub fn route_breakdown(route: &Route, producers: &[Producer], cooperative: &Cooperative) -> RouteBreakdown {
    let mut stop_points = Vec::with_capacity(route.stops.len());
    let mut skipped_stops = Vec::new();

    for stop in route.ordered_stops() {
        match find_producer(producers, &stop.producer_id).and_then(|p| p.location) {
            Some(loc) => stop_points.push(loc),
            None => skipped_stops.push(stop.producer_id.clone()),
        }
    }

    let start = if route.use_cooperative_as_start {
        Some(cooperative.location)
    } else {
        route.start_location
    };

    let end = if route.use_cooperative_as_end {
        Some(cooperative.location)
    } else {
        route.end_location.or_else(|| stop_points.last().copied())
    };

    // Without an explicit start the route begins at the first stop
    let mut points = Vec::with_capacity(stop_points.len() + 2);
    points.extend(start);
    points.extend(stop_points);
    if let Some(end) = end {
        if points.last() != Some(&end) {
            points.push(end);
        }
    }

    let segments_km = segment_distances(&points);
    let total_km = segments_km.iter().sum();

    RouteBreakdown {
        points,
        segments_km,
        total_km,
        skipped_stops,
    }
}

/// Total route length in kilometres, see [`route_breakdown`]
pub fn calculate_route_distance(route: &Route, producers: &[Producer], cooperative: &Cooperative) -> f64 {
    route_breakdown(route, producers, cooperative).total_km
}

// ============================================================================
// Estimates
// ============================================================================

/// Vehicle parameters for route estimates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutingParams {
    pub fuel_consumption_per_100km: f64,
    /// Pump price per litre, when known
    pub fuel_price_per_liter: Option<Decimal>,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            fuel_consumption_per_100km: DEFAULT_FUEL_CONSUMPTION_PER_100KM,
            fuel_price_per_liter: None,
        }
    }
}

/// Distance, time and fuel figures shown on route reports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub fuel_liters: f64,
    pub fuel_cost: Option<Decimal>,
}

impl RouteEstimate {
    pub fn from_distance(distance_km: f64, params: &RoutingParams) -> Self {
        let fuel_liters = calculate_fuel_consumption(distance_km, params.fuel_consumption_per_100km);
        let fuel_cost = params.fuel_price_per_liter.and_then(|price| {
            Decimal::try_from(fuel_liters)
                .ok()
                .map(|liters| (liters * price).round_dp(2))
        });

        Self {
            distance_km,
            duration_minutes: estimate_duration(distance_km),
            fuel_liters,
            fuel_cost,
        }
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_minutes)
    }
}

pub fn estimate_route(
    route: &Route,
    producers: &[Producer],
    cooperative: &Cooperative,
    params: &RoutingParams,
) -> RouteEstimate {
    RouteEstimate::from_distance(calculate_route_distance(route, producers, cooperative), params)
}
