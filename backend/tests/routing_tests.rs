//! Tests for collection route estimation
//!
//! Covers haversine distances, route resolution against the cooperative HQ,
//! duration and fuel figures, and nearest-neighbour ordering.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    calculate_fuel_consumption, calculate_route_distance, distance, estimate_duration,
    estimate_route, order_by_nearest_neighbor, route_breakdown, segment_distances,
    total_distance, Cooperative, GeoPoint, Producer, Route, RouteStop, RoutingParams,
    AVERAGE_SPEED_KMH, DEFAULT_FUEL_CONSUMPTION_PER_100KM, EARTH_RADIUS_KM,
};

fn cooperative() -> Cooperative {
    Cooperative {
        name: "Coopérative Test".to_string(),
        location: GeoPoint::new(0.0, 0.0),
    }
}

/// Three producers around the HQ at (0, 0)
fn triangle() -> Vec<Producer> {
    vec![
        Producer::new("p1", "Adjoumani", Some(GeoPoint::new(0.0, 1.0))),
        Producer::new("p2", "Bamba", Some(GeoPoint::new(0.5, 0.0))),
        Producer::new("p3", "Coulibaly", Some(GeoPoint::new(0.6, 0.9))),
    ]
}

fn location(producers: &[Producer], id: &str) -> GeoPoint {
    producers
        .iter()
        .find(|p| p.id == id)
        .and_then(|p| p.location)
        .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Distance Primitive Tests
// =============================================================================

mod distance_primitive {
    use super::*;

    #[test]
    fn london_to_paris() {
        let london = GeoPoint::new(51.5074, -0.1278);
        let paris = GeoPoint::new(48.8566, 2.3522);
        let km = distance(london, paris);
        let reference = 343.556;
        assert!((km - reference).abs() / reference < 0.001, "got {}", km);
    }

    #[test]
    fn abidjan_to_yamoussoukro() {
        let abidjan = GeoPoint::new(5.36, -4.0083);
        let yamoussoukro = GeoPoint::new(6.8276, -5.2893);
        let km = distance(abidjan, yamoussoukro);
        assert!((km - 216.08).abs() / 216.08 < 0.001, "got {}", km);
    }

    #[test]
    fn same_point_is_zero() {
        let p = GeoPoint::new(5.78, -6.6);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        let km = distance(GeoPoint::new(45.0, 10.0), GeoPoint::new(-45.0, -170.0));
        assert!((km - half).abs() / half < 0.001, "got {}", km);

        for lat in -90..=90 {
            for lon in (-180..=180).step_by(5) {
                let a = GeoPoint::new(lat as f64, lon as f64);
                let b = GeoPoint::new(-(lat as f64), lon as f64 + 180.0);
                let km = distance(a, b);
                assert!(km.is_finite(), "NaN for {:?}", a);
                assert!(km <= half + 1e-6);
            }
        }
    }

    #[test]
    fn total_distance_degenerate_inputs() {
        let p = GeoPoint::new(5.78, -6.6);
        assert_eq!(total_distance(&[]), 0.0);
        assert_eq!(total_distance(&[p]), 0.0);
        assert_eq!(total_distance(&[p, p]), 0.0);
        assert!(segment_distances(&[p]).is_empty());
    }

    #[test]
    fn total_is_sum_of_segments() {
        let points: Vec<GeoPoint> = triangle().iter().filter_map(|p| p.location).collect();
        let segments = segment_distances(&points);
        assert_eq!(segments.len(), 2);
        assert!(approx(total_distance(&points), segments.iter().sum()));
    }
}

// =============================================================================
// Duration and Fuel Tests
// =============================================================================

mod estimates {
    use super::*;

    #[test]
    fn forty_km_takes_an_hour() {
        assert_eq!(AVERAGE_SPEED_KMH, 40.0);
        assert!(approx(estimate_duration(40.0), 60.0));
        assert!(approx(estimate_duration(10.0), 15.0));
        assert_eq!(estimate_duration(0.0), 0.0);
    }

    #[test]
    fn default_consumption_is_eight_litres() {
        assert!(approx(
            calculate_fuel_consumption(250.0, DEFAULT_FUEL_CONSUMPTION_PER_100KM),
            20.0
        ));
        assert!(approx(calculate_fuel_consumption(250.0, 12.0), 30.0));
    }

    #[test]
    fn route_estimate_combines_figures() {
        let producers = triangle();
        let route = Route::round_trip("r1", "Tournée", ["p2"]);
        let params = RoutingParams {
            fuel_consumption_per_100km: 10.0,
            fuel_price_per_liter: Some(Decimal::from(800)),
        };

        let estimate = estimate_route(&route, &producers, &cooperative(), &params);
        let expected_km = 2.0 * distance(cooperative().location, location(&producers, "p2"));

        assert!(approx(estimate.distance_km, expected_km));
        assert!(approx(estimate.duration_minutes, expected_km / 40.0 * 60.0));
        assert!(approx(estimate.fuel_liters, expected_km * 10.0 / 100.0));
        let cost = estimate.fuel_cost.unwrap();
        assert_eq!(cost.scale(), 2);
        assert!(cost > Decimal::from(8800) && cost < Decimal::from(9000));
    }
}

// =============================================================================
// Route Distance Tests
// =============================================================================

mod route_distance {
    use super::*;

    #[test]
    fn cooperative_round_trip() {
        let producers = triangle();
        let coop = cooperative();
        let route = Route::round_trip("r1", "Tournée", ["p1", "p2"]);

        let p1 = location(&producers, "p1");
        let p2 = location(&producers, "p2");
        let expected = distance(coop.location, p1) + distance(p1, p2) + distance(p2, coop.location);

        assert!(approx(calculate_route_distance(&route, &producers, &coop), expected));
    }

    #[test]
    fn stops_follow_their_order_field() {
        let producers = triangle();
        let mut route = Route::round_trip("r1", "Tournée", ["p1", "p2"]);
        route.stops[0].order = 9;

        let breakdown = route_breakdown(&route, &producers, &cooperative());
        assert_eq!(breakdown.points[1], location(&producers, "p2"));
        assert_eq!(breakdown.points[2], location(&producers, "p1"));
    }

    #[test]
    fn missing_producer_is_skipped() {
        let producers = triangle();
        let coop = cooperative();
        let with_ghost = Route::round_trip("r1", "Tournée", ["p1", "ghost", "p2"]);
        let without = Route::round_trip("r2", "Tournée", ["p1", "p2"]);

        let breakdown = route_breakdown(&with_ghost, &producers, &coop);
        assert_eq!(breakdown.skipped_stops, vec!["ghost".to_string()]);
        assert!(approx(
            breakdown.total_km,
            calculate_route_distance(&without, &producers, &coop)
        ));
    }

    #[test]
    fn producer_without_coordinates_is_skipped() {
        let mut producers = triangle();
        producers[1].location = None;
        let route = Route::round_trip("r1", "Tournée", ["p1", "p2"]);

        let breakdown = route_breakdown(&route, &producers, &cooperative());
        assert_eq!(breakdown.skipped_stops, vec!["p2".to_string()]);
        assert_eq!(breakdown.points.len(), 3);
    }

    #[test]
    fn start_at_first_stop_without_cooperative() {
        let producers = triangle();
        let coop = cooperative();
        let mut route = Route::round_trip("r1", "Tournée", ["p1", "p2"]);
        route.use_cooperative_as_start = false;

        let p1 = location(&producers, "p1");
        let p2 = location(&producers, "p2");
        let expected = distance(p1, p2) + distance(p2, coop.location);

        assert!(approx(calculate_route_distance(&route, &producers, &coop), expected));
    }

    #[test]
    fn end_at_last_stop_is_not_repeated() {
        let producers = triangle();
        let mut route = Route::round_trip("r1", "Tournée", ["p1", "p2"]);
        route.use_cooperative_as_end = false;

        let breakdown = route_breakdown(&route, &producers, &cooperative());
        assert_eq!(breakdown.points.len(), 3);
        assert_eq!(breakdown.points.last(), Some(&location(&producers, "p2")));
    }

    #[test]
    fn custom_start_and_end_locations() {
        let producers = triangle();
        let depot = GeoPoint::new(-0.2, 0.3);
        let mut route = Route::round_trip("r1", "Tournée", ["p3"]);
        route.use_cooperative_as_start = false;
        route.use_cooperative_as_end = false;
        route.start_location = Some(depot);
        route.end_location = Some(depot);

        let p3 = location(&producers, "p3");
        let expected = 2.0 * distance(depot, p3);
        assert!(approx(calculate_route_distance(&route, &producers, &cooperative()), expected));
    }

    #[test]
    fn empty_route_is_zero() {
        let route = Route::round_trip("r1", "Vide", Vec::<String>::new());
        assert_eq!(calculate_route_distance(&route, &triangle(), &cooperative()), 0.0);
    }

    #[test]
    fn all_stops_missing_is_zero() {
        let route = Route {
            id: "r1".to_string(),
            name: "Fantôme".to_string(),
            stops: vec![RouteStop {
                producer_id: "ghost".to_string(),
                order: 0,
            }],
            use_cooperative_as_start: false,
            use_cooperative_as_end: false,
            start_location: None,
            end_location: None,
        };
        let breakdown = route_breakdown(&route, &triangle(), &cooperative());
        assert!(breakdown.points.is_empty());
        assert_eq!(breakdown.total_km, 0.0);
    }
}

// =============================================================================
// Nearest Neighbour Ordering Tests
// =============================================================================

mod nearest_neighbor {
    use super::*;

    #[test]
    fn triangle_from_cooperative() {
        // From (0,0): p2 is 55.6 km, p1 111.2 km, p3 120.3 km -> p2
        // From p2: p3 is 100.7 km, p1 124.3 km -> p3, then p1
        let ordered = order_by_nearest_neighbor(&triangle(), cooperative().location);
        let ids: Vec<&str> = ordered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p1"]);
    }

    #[test]
    fn empty_input() {
        let ordered = order_by_nearest_neighbor(&Vec::<Producer>::new(), GeoPoint::new(0.0, 0.0));
        assert!(ordered.is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let producers = vec![
            Producer::new("east", "Est", Some(GeoPoint::new(0.0, 1.0))),
            Producer::new("west", "Ouest", Some(GeoPoint::new(0.0, -1.0))),
        ];
        let ordered = order_by_nearest_neighbor(&producers, GeoPoint::new(0.0, 0.0));
        assert_eq!(ordered[0].id, "east");
    }

    #[test]
    fn works_on_plain_points() {
        let points = vec![GeoPoint::new(0.0, 3.0), GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 2.0)];
        let ordered = order_by_nearest_neighbor(&points, GeoPoint::new(0.0, 0.0));
        assert_eq!(
            ordered,
            vec![GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 2.0), GeoPoint::new(0.0, 3.0)]
        );
    }
}

// =============================================================================
// Property Tests
// =============================================================================

fn geo_point() -> impl Strategy<Value = GeoPoint> {
    (4.0f64..8.0, -8.0f64..-3.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// distance(a, b) == distance(b, a)
    #[test]
    fn distance_is_symmetric(a in geo_point(), b in geo_point()) {
        prop_assert!((distance(a, b) - distance(b, a)).abs() < 1e-9);
    }

    /// Triangle inequality holds for great-circle distance
    #[test]
    fn distance_triangle_inequality(a in geo_point(), b in geo_point(), c in geo_point()) {
        prop_assert!(distance(a, c) <= distance(a, b) + distance(b, c) + 1e-9);
    }

    /// Ordering is a permutation of the input
    #[test]
    fn nearest_neighbor_is_permutation(points in prop::collection::vec(geo_point(), 0..20)) {
        let producers: Vec<Producer> = points
            .iter()
            .enumerate()
            .map(|(i, p)| Producer::new(format!("p{}", i), "Producteur", Some(*p)))
            .collect();

        let ordered = order_by_nearest_neighbor(&producers, GeoPoint::new(5.78, -6.6));

        let mut expected: Vec<String> = producers.iter().map(|p| p.id.clone()).collect();
        let mut actual: Vec<String> = ordered.iter().map(|p| p.id.clone()).collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(expected, actual);
    }

    /// Duration and fuel are linear in distance
    #[test]
    fn estimates_are_linear(km in 0.0f64..2000.0) {
        prop_assert!((estimate_duration(km) - km * 1.5).abs() < 1e-6);
        prop_assert!((calculate_fuel_consumption(km, 8.0) - km * 0.08).abs() < 1e-6);
    }
}
