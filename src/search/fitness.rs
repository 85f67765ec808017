use super::branch_index::BranchIndex;
use super::decoder::PathDecoder;
use super::genome::Genome;
use crate::types::RoadMap;

/// Scaling divisor for the fitness formula. Large enough that any
/// realistic route cost maps into (0, 1) while staying monotonically
/// decreasing in cost.
const COST_SCALE: f64 = 1e12;

/// A genome together with its score and the segment ids its leading valid
/// genes resolved to, so callers can rebuild the route without decoding a
/// second time.
#[derive(Debug, Clone)]
pub struct ScoredGenome {
    pub genome: Genome,
    pub fitness: f64,
    pub segment_ids: Vec<u32>,
}

/// Scores candidate routes for one map and one origin/destination pair.
///
/// Fitness is `1 - total_cost / 1e12` for a candidate that reaches the
/// requested destination, and exactly `0` otherwise. Lower real-world cost
/// therefore ranks strictly higher, and `0` doubles as the "no valid
/// route" marker.
pub struct FitnessEvaluator<'a> {
    map: &'a RoadMap,
    index: &'a BranchIndex,
    origin: &'a str,
    destination: &'a str,
    fuel_economy_km_per_l: f64,
    fuel_cost_per_l: f64,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(
        map: &'a RoadMap,
        index: &'a BranchIndex,
        origin: &'a str,
        destination: &'a str,
        fuel_economy_km_per_l: f64,
        fuel_cost_per_l: f64,
    ) -> Self {
        Self {
            map,
            index,
            origin,
            destination,
            fuel_economy_km_per_l,
            fuel_cost_per_l,
        }
    }

    pub fn score(&self, genome: Genome) -> ScoredGenome {
        let decoder = PathDecoder::new(self.map, self.index, self.origin);
        let segment_ids = decoder.decode(&genome);

        let reaches_destination = segment_ids
            .last()
            .and_then(|id| self.map.segment_by_id(*id))
            .map(|segment| segment.destination == self.destination)
            .unwrap_or(false);

        let fitness = if reaches_destination {
            // A valid route must stay strictly positive even when the
            // cost exceeds the scaling constant, so it can never be
            // mistaken for (or lose to) a non-terminating candidate.
            (1.0 - self.cost_of(&segment_ids) / COST_SCALE).max(f64::EPSILON)
        } else {
            0.0
        };

        ScoredGenome {
            genome,
            fitness,
            segment_ids,
        }
    }

    /// Fuel cost of driving the given segments.
    pub fn cost_of(&self, segment_ids: &[u32]) -> f64 {
        let distance_km: f64 = segment_ids
            .iter()
            .filter_map(|id| self.map.segment_by_id(*id))
            .map(|segment| segment.distance_km)
            .sum();
        self.cost_of_distance(distance_km)
    }

    pub fn cost_of_distance(&self, distance_km: f64) -> f64 {
        (distance_km / self.fuel_economy_km_per_l) * self.fuel_cost_per_l
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoadMap, Segment};

    fn numbered(origin: &str, destination: &str, distance_km: f64, id: u32) -> Segment {
        let mut s = Segment::new(origin, destination, distance_km);
        s.id = id;
        s
    }

    fn sample_map() -> RoadMap {
        let mut map = RoadMap::new("sample");
        map.add_segment(numbered("A", "B", 100.0, 1));
        map.add_segment(numbered("A", "C", 50.0, 2));
        map.add_segment(numbered("B", "C", 30.0, 3));
        map
    }

    fn evaluator<'a>(map: &'a RoadMap, index: &'a BranchIndex) -> FitnessEvaluator<'a> {
        FitnessEvaluator::new(map, index, "A", "C", 10.0, 2.0)
    }

    #[test]
    fn cost_formula_matches_fixture() {
        let map = sample_map();
        let index = BranchIndex::build(&map);
        let eval = FitnessEvaluator::new(&map, &index, "A", "C", 13.5, 3.20);
        let cost = eval.cost_of_distance(426.0);
        assert!((cost - 100.977).abs() < 0.01, "got {cost}");
    }

    #[test]
    fn valid_route_scores_below_one_and_tracks_cost() {
        let map = sample_map();
        let index = BranchIndex::build(&map);
        let eval = evaluator(&map, &index);

        let direct = eval.score(vec![1, -1, 0]); // A-C, 50 km
        let detour = eval.score(vec![0, 0, -1]); // A-B-C, 130 km

        assert!(direct.fitness > 0.0 && direct.fitness < 1.0);
        assert!(detour.fitness > 0.0 && detour.fitness < 1.0);
        assert!(direct.fitness > detour.fitness);
        assert_eq!(direct.segment_ids, vec![2]);
        assert_eq!(detour.segment_ids, vec![1, 3]);
    }

    #[test]
    fn wrong_destination_scores_zero() {
        let map = sample_map();
        let index = BranchIndex::build(&map);
        let eval = evaluator(&map, &index);

        // A-B then explicit stop: ends at B, not C.
        let scored = eval.score(vec![0, -1, 0]);
        assert_eq!(scored.fitness, 0.0);
        assert_eq!(scored.segment_ids, vec![1]);
    }

    #[test]
    fn pathological_cost_still_scores_strictly_positive() {
        let mut map = RoadMap::new("absurd");
        map.add_segment(numbered("A", "B", 1e16, 1));
        let index = BranchIndex::build(&map);
        // Raw formula would go negative: cost is 2e16, far past 1e12.
        let eval = FitnessEvaluator::new(&map, &index, "A", "B", 1.0, 2.0);
        let scored = eval.score(vec![0]);
        assert!(scored.fitness > 0.0);
        assert_eq!(scored.segment_ids, vec![1]);
    }

    #[test]
    fn empty_decoded_path_scores_zero() {
        let map = sample_map();
        let index = BranchIndex::build(&map);
        // C has no outgoing legs: decoding from C stops immediately.
        let eval = FitnessEvaluator::new(&map, &index, "C", "A", 10.0, 2.0);
        let scored = eval.score(vec![0, 0, 0]);
        assert_eq!(scored.fitness, 0.0);
        assert!(scored.segment_ids.is_empty());
    }
}
