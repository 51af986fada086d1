//! Collection route planning service
//!
//! Distances are always recomputed from the producer coordinates supplied
//! with the request; the cooperative HQ and vehicle figures come from
//! configuration and are passed explicitly into the calculator.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::{
    order_by_nearest_neighbor, route_breakdown, total_distance, validate_coordinates,
    validate_route, Cooperative, GeoPoint, Producer, Route, RouteBreakdown, RouteEstimate,
    RoutingParams,
};

/// Route service bound to the cooperative's HQ and vehicle parameters
#[derive(Clone)]
pub struct RoutingService {
    cooperative: Cooperative,
    params: RoutingParams,
}

/// A route together with the producers it references
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoutePreviewInput {
    pub route: Route,
    pub producers: Vec<Producer>,
}

/// Producers to sequence, optionally from a start other than the HQ
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeOrderInput {
    #[validate(length(min = 1, max = 500))]
    pub producers: Vec<Producer>,
    pub start: Option<GeoPoint>,
}

/// Estimate shown on the route report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimateReport {
    #[serde(flatten)]
    pub estimate: RouteEstimate,
    pub formatted_duration: String,
    pub skipped_stops: Vec<String>,
}

/// Producers in visiting order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedOrder {
    pub start: GeoPoint,
    pub producers: Vec<Producer>,
    /// Start through every located producer, without the return leg
    pub total_km: f64,
    /// Producers left at the end because they have no coordinates
    pub unlocated: Vec<String>,
}

impl RoutingService {
    /// Create a new RoutingService instance
    pub fn new(cooperative: Cooperative, params: RoutingParams) -> Self {
        Self {
            cooperative,
            params,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cooperative.to_cooperative(), config.routing.to_params())
    }

    /// Resolve a route into legs and total distance
    pub fn preview_distance(&self, mut input: RoutePreviewInput) -> AppResult<RouteBreakdown> {
        self.validate_preview(&input)?;
        drop_invalid_locations(&input.route.id, &mut input.producers);

        let breakdown = route_breakdown(&input.route, &input.producers, &self.cooperative);
        if !breakdown.skipped_stops.is_empty() {
            tracing::warn!(
                route_id = %input.route.id,
                skipped = ?breakdown.skipped_stops,
                "Stops without producer coordinates were left out of the distance"
            );
        }

        tracing::debug!(
            route_id = %input.route.id,
            total_km = breakdown.total_km,
            legs = breakdown.segments_km.len(),
            "Route distance computed"
        );

        Ok(breakdown)
    }

    /// Distance, duration and fuel for a route
    pub fn estimate(&self, input: RoutePreviewInput) -> AppResult<RouteEstimateReport> {
        let breakdown = self.preview_distance(input)?;
        let estimate = RouteEstimate::from_distance(breakdown.total_km, &self.params);

        Ok(RouteEstimateReport {
            formatted_duration: estimate.formatted_duration(),
            estimate,
            skipped_stops: breakdown.skipped_stops,
        })
    }

    /// Sequence producers with the nearest-neighbour heuristic.
    ///
    /// The order is a good first guess for the planner, not the shortest
    /// possible tour.
    pub fn optimize_order(&self, input: OptimizeOrderInput) -> AppResult<OptimizedOrder> {
        input.validate()?;
        self.validate_producers(&input.producers)?;

        let start = match input.start {
            Some(start) => {
                validate_coordinates(&start).map_err(|e| {
                    AppError::invalid_field("start", e, "Coordonnées de départ invalides")
                })?;
                start
            }
            None => self.cooperative.location,
        };

        let producers = order_by_nearest_neighbor(&input.producers, start);

        let path: Vec<GeoPoint> = std::iter::once(start)
            .chain(producers.iter().filter_map(|p| p.location))
            .collect();
        let unlocated = producers
            .iter()
            .filter(|p| p.location.is_none())
            .map(|p| p.id.clone())
            .collect();

        Ok(OptimizedOrder {
            start,
            total_km: total_distance(&path),
            producers,
            unlocated,
        })
    }

    fn validate_preview(&self, input: &RoutePreviewInput) -> AppResult<()> {
        input.validate()?;
        validate_route(&input.route)
            .map_err(|e| AppError::invalid_field("route", e, "Itinéraire invalide"))?;
        Ok(())
    }

    fn validate_producers(&self, producers: &[Producer]) -> AppResult<()> {
        for producer in producers {
            if let Some(location) = &producer.location {
                validate_coordinates(location).map_err(|e| {
                    AppError::invalid_field(
                        &format!("producers.{}.location", producer.id),
                        e,
                        "Coordonnées du producteur invalides",
                    )
                })?;
            }
        }
        Ok(())
    }
}

/// Out-of-range coordinates count as missing, so the stop is skipped
fn drop_invalid_locations(route_id: &str, producers: &mut [Producer]) {
    for producer in producers.iter_mut() {
        if let Some(location) = producer.location {
            if let Err(reason) = validate_coordinates(&location) {
                tracing::warn!(
                    route_id = %route_id,
                    producer_id = %producer.id,
                    reason,
                    "Ignoring invalid producer coordinates"
                );
                producer.location = None;
            }
        }
    }
}
