use super::branch_index::BranchIndex;
use super::fitness::{FitnessEvaluator, ScoredGenome};
use super::genome::Genome;
use super::operators::{crossover, mutate, random_genome, roulette_selection, tournament_selection};
use crate::config::{SearchConfig, SelectionMethod};
use crate::error::{EcorouteError, Result};
use crate::types::{RoadMap, Route, Segment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Runs one genetic search over one map.
///
/// The population holds `segment_count^2` genomes, so larger maps get
/// proportionally more search breadth. Each generation applies elitism,
/// selection, crossover and mutation, then re-scores every individual.
/// The loop stops at the generation cap or when the wall-clock budget is
/// exhausted, whichever comes first; the deadline is only checked between
/// generations because a half-evolved population has no usable result.
pub struct EvolutionEngine<'a> {
    map: &'a RoadMap,
    origin: &'a str,
    destination: &'a str,
    fuel_economy_km_per_l: f64,
    fuel_cost_per_l: f64,
    config: &'a SearchConfig,
    index: BranchIndex,
    rng: StdRng,
}

impl<'a> EvolutionEngine<'a> {
    /// Set up a search for one map. Rejects maps the search cannot run on
    /// (no segments, or origin/destination absent from the graph) before
    /// any evolution happens.
    pub fn new(
        map: &'a RoadMap,
        origin: &'a str,
        destination: &'a str,
        fuel_economy_km_per_l: f64,
        fuel_cost_per_l: f64,
        config: &'a SearchConfig,
    ) -> Result<Self> {
        if map.segments.is_empty() {
            return Err(EcorouteError::Configuration(format!(
                "map '{}' has no segments",
                map.name
            )));
        }

        let index = BranchIndex::build(map);

        if !index.has_origin(origin) {
            return Err(EcorouteError::Configuration(format!(
                "origin '{}' has no outgoing segments in map '{}'",
                origin, map.name
            )));
        }
        let destination_known = map
            .segments
            .iter()
            .any(|s| s.destination == destination || s.origin == destination);
        if !destination_known {
            return Err(EcorouteError::Configuration(format!(
                "destination '{}' is not a point of map '{}'",
                destination, map.name
            )));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            map,
            origin,
            destination,
            fuel_economy_km_per_l,
            fuel_cost_per_l,
            config,
            index,
            rng,
        })
    }

    /// Run the evolution to completion. `None` means the search found no
    /// genome that reaches the destination -- a first-class outcome, not
    /// an error.
    pub fn run(&mut self) -> Option<Route> {
        let evaluator = FitnessEvaluator::new(
            self.map,
            &self.index,
            self.origin,
            self.destination,
            self.fuel_economy_km_per_l,
            self.fuel_cost_per_l,
        );

        let genome_length = self.map.segments.len();
        let population_size = genome_length * genome_length;
        let max_branch_count = self.index.max_branch_count();
        let rng = &mut self.rng;

        // The budget covers the whole run, including scoring the initial
        // population.
        let start = Instant::now();
        let timeout = Duration::from_millis(self.config.timeout_ms);

        let mut scored: Vec<ScoredGenome> = (0..population_size)
            .map(|_| evaluator.score(random_genome(genome_length, max_branch_count, rng)))
            .collect();

        for generation in 0..self.config.max_generations {
            let offspring = next_generation(
                &scored,
                self.config,
                max_branch_count,
                population_size,
                rng,
            );
            scored = offspring
                .into_iter()
                .map(|genome| evaluator.score(genome))
                .collect();

            log::debug!(
                "map '{}' generation {}: best fitness {:.6}",
                self.map.name,
                generation + 1,
                best_fitness(&scored)
            );

            if start.elapsed() >= timeout {
                log::info!(
                    "map '{}': time budget exhausted after {} generations",
                    self.map.name,
                    generation + 1
                );
                break;
            }
        }

        let best = scored.into_iter().max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

        if best.fitness == 0.0 {
            // Not a single individual reached the destination.
            return None;
        }

        let segments: Vec<Segment> = best
            .segment_ids
            .iter()
            .filter_map(|id| self.map.segment_by_id(*id).cloned())
            .collect();
        let mut waypoints: Vec<String> = segments.iter().map(|s| s.origin.clone()).collect();
        if let Some(last) = segments.last() {
            waypoints.push(last.destination.clone());
        }
        let total_cost = evaluator.cost_of(&best.segment_ids);

        Some(Route {
            segments,
            waypoints,
            total_cost,
        })
    }
}

fn best_fitness(scored: &[ScoredGenome]) -> f64 {
    scored
        .iter()
        .map(|s| s.fitness)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0)
}

fn select<R: Rng>(population: &[ScoredGenome], config: &SearchConfig, rng: &mut R) -> Genome {
    match config.selection_method {
        SelectionMethod::Tournament => {
            tournament_selection(population, config.tournament_size, rng)
        }
        SelectionMethod::Roulette => roulette_selection(population, rng),
    }
}

/// Produce the next population: elite copies first, then offspring from
/// selection plus crossover/mutation until the population is full again.
fn next_generation<R: Rng>(
    scored: &[ScoredGenome],
    config: &SearchConfig,
    max_branch_count: usize,
    population_size: usize,
    rng: &mut R,
) -> Vec<Genome> {
    let mut next = Vec::with_capacity(population_size);

    // Elitism: copy top performers unchanged
    let elite_count = (population_size as f64 * config.elitism_rate) as usize;
    let mut sorted: Vec<&ScoredGenome> = scored.iter().collect();
    sorted.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for elite in sorted.iter().take(elite_count) {
        next.push(elite.genome.clone());
    }

    while next.len() < population_size {
        if rng.gen::<f64>() < config.crossover_rate {
            let parent1 = select(scored, config, rng);
            let parent2 = select(scored, config, rng);

            let (mut child1, mut child2) = crossover(&parent1, &parent2, rng);
            mutate(&mut child1, config.mutation_rate, max_branch_count, rng);
            mutate(&mut child2, config.mutation_rate, max_branch_count, rng);

            next.push(child1);
            if next.len() < population_size {
                next.push(child2);
            }
        } else {
            // Reproduction (copy)
            let mut child = select(scored, config, rng);
            mutate(&mut child, config.mutation_rate, max_branch_count, rng);
            next.push(child);
        }
    }

    next.truncate(population_size);
    next
}
