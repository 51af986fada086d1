//! Collection route models

use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// A planned collection route through producer plantations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub name: String,
    pub stops: Vec<RouteStop>,
    /// Start from the cooperative HQ instead of the first stop
    pub use_cooperative_as_start: bool,
    /// Return to the cooperative HQ after the last stop
    pub use_cooperative_as_end: bool,
    /// Custom start, used when not starting from the cooperative
    #[serde(default)]
    pub start_location: Option<GeoPoint>,
    /// Custom end, used when not ending at the cooperative
    #[serde(default)]
    pub end_location: Option<GeoPoint>,
}

/// A stop at a producer's plantation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub producer_id: String,
    pub order: u32,
}

impl Route {
    /// Stops sorted by their `order` field. Equal orders keep list order.
    pub fn ordered_stops(&self) -> Vec<&RouteStop> {
        let mut stops: Vec<&RouteStop> = self.stops.iter().collect();
        stops.sort_by_key(|s| s.order);
        stops
    }

    /// Route visiting the given producers in sequence, starting and ending at the HQ
    pub fn round_trip<I, S>(id: impl Into<String>, name: impl Into<String>, producer_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stops = producer_ids
            .into_iter()
            .enumerate()
            .map(|(i, producer_id)| RouteStop {
                producer_id: producer_id.into(),
                order: i as u32,
            })
            .collect();

        Self {
            id: id.into(),
            name: name.into(),
            stops,
            use_cooperative_as_start: true,
            use_cooperative_as_end: true,
            start_location: None,
            end_location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_stops_sorts_by_order() {
        let mut route = Route::round_trip("r1", "Tournée Nord", ["p1", "p2", "p3"]);
        route.stops[0].order = 5;
        let ids: Vec<&str> = route
            .ordered_stops()
            .iter()
            .map(|s| s.producer_id.as_str())
            .collect();
        assert_eq!(ids, vec!["p2", "p3", "p1"]);
    }
}
