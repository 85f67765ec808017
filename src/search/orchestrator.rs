use super::engine::EvolutionEngine;
use crate::config::SearchConfig;
use crate::error::{EcorouteError, Result};
use crate::types::{RoadMap, Route};

/// One cheapest-route request: where to go, and the fuel parameters the
/// cost formula needs.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub fuel_economy_km_per_l: f64,
    pub fuel_cost_per_l: f64,
}

/// Runs the evolution engine once per stored map and keeps the globally
/// cheapest result.
///
/// A map that cannot be searched (bad graph for this request) or that
/// yields no solution contributes no candidate; only request-level
/// parameter errors abort the whole search.
pub struct RouteSearch<'a> {
    config: &'a SearchConfig,
}

impl<'a> RouteSearch<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        Self { config }
    }

    /// `Ok(None)` means no map could reach the destination from the
    /// origin; `Err` only for request-level configuration problems.
    pub fn cheapest_route(&self, maps: &[RoadMap], request: &RouteRequest) -> Result<Option<Route>> {
        validate_request(request)?;

        let mut best: Option<Route> = None;

        for map in maps {
            let mut engine = match EvolutionEngine::new(
                map,
                &request.origin,
                &request.destination,
                request.fuel_economy_km_per_l,
                request.fuel_cost_per_l,
                self.config,
            ) {
                Ok(engine) => engine,
                Err(err) => {
                    log::warn!("skipping map '{}': {}", map.name, err);
                    continue;
                }
            };

            let route = match engine.run() {
                Some(route) => route,
                None => {
                    log::info!(
                        "map '{}': no route from '{}' to '{}'",
                        map.name,
                        request.origin,
                        request.destination
                    );
                    continue;
                }
            };

            log::info!(
                "map '{}': best route costs {:.2} over {} segments",
                map.name,
                route.total_cost,
                route.segments.len()
            );

            // Strict comparison: the first map evaluated wins ties.
            let is_better = best
                .as_ref()
                .map(|current| route.total_cost < current.total_cost)
                .unwrap_or(true);
            if is_better {
                best = Some(route);
            }
        }

        Ok(best)
    }
}

fn validate_request(request: &RouteRequest) -> Result<()> {
    if request.origin.is_empty() {
        return Err(EcorouteError::Configuration(
            "origin point is required".to_string(),
        ));
    }
    if request.destination.is_empty() {
        return Err(EcorouteError::Configuration(
            "destination point is required".to_string(),
        ));
    }
    if request.fuel_economy_km_per_l <= 0.0 {
        return Err(EcorouteError::Configuration(
            "fuel economy must be positive".to_string(),
        ));
    }
    if request.fuel_cost_per_l <= 0.0 {
        return Err(EcorouteError::Configuration(
            "fuel unit cost must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn request(origin: &str, destination: &str) -> RouteRequest {
        RouteRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            fuel_economy_km_per_l: 10.0,
            fuel_cost_per_l: 2.0,
        }
    }

    fn simple_map(name: &str, distance_km: f64) -> RoadMap {
        let mut map = RoadMap::new(name);
        map.add_segment(Segment::new("A", "B", distance_km));
        map.segments[0].id = 1;
        map
    }

    fn seeded_config() -> SearchConfig {
        SearchConfig {
            max_generations: 10,
            seed: Some(5),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn non_positive_fuel_economy_aborts_the_request() {
        let config = seeded_config();
        let search = RouteSearch::new(&config);
        let mut req = request("A", "B");
        req.fuel_economy_km_per_l = 0.0;
        let result = search.cheapest_route(&[simple_map("m", 10.0)], &req);
        assert!(matches!(result, Err(EcorouteError::Configuration(_))));
    }

    #[test]
    fn unsearchable_map_does_not_abort_the_others() {
        let config = seeded_config();
        let search = RouteSearch::new(&config);
        let maps = vec![RoadMap::new("empty"), simple_map("good", 10.0)];
        let route = search
            .cheapest_route(&maps, &request("A", "B"))
            .unwrap()
            .expect("second map has a route");
        assert_eq!(route.waypoints, vec!["A", "B"]);
    }

    #[test]
    fn zero_maps_yield_no_route() {
        let config = seeded_config();
        let search = RouteSearch::new(&config);
        assert!(search
            .cheapest_route(&[], &request("A", "B"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn lower_cost_map_wins() {
        let config = seeded_config();
        let search = RouteSearch::new(&config);
        let maps = vec![simple_map("long", 100.0), simple_map("short", 40.0)];
        let route = search
            .cheapest_route(&maps, &request("A", "B"))
            .unwrap()
            .unwrap();
        assert!((route.total_cost - 8.0).abs() < 1e-9);
    }

    #[test]
    fn tie_goes_to_the_first_map() {
        let config = seeded_config();
        let search = RouteSearch::new(&config);
        // Same total cost, different shapes: the direct map is evaluated
        // first and must win the tie.
        let first = simple_map("direct", 50.0);
        let mut second = RoadMap::new("via-c");
        second.add_segment(Segment::new("A", "C", 20.0));
        second.add_segment(Segment::new("C", "B", 30.0));
        for (i, segment) in second.segments.iter_mut().enumerate() {
            segment.id = i as u32 + 1;
        }
        let route = search
            .cheapest_route(&[first, second], &request("A", "B"))
            .unwrap()
            .unwrap();
        assert_eq!(route.waypoints, vec!["A", "B"]);
    }
}
