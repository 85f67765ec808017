use super::fitness::ScoredGenome;
use super::genome::{gene_lower_bound, Genome};
use rand::Rng;

/// Tournament selection: pick best of K random candidates
pub fn tournament_selection<R: Rng>(
    population: &[ScoredGenome],
    tournament_size: usize,
    rng: &mut R,
) -> Genome {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = population[best_idx].fitness;

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].fitness > best_fitness {
            best_idx = idx;
            best_fitness = population[idx].fitness;
        }
    }

    population[best_idx].genome.clone()
}

/// Roulette wheel selection: probability proportional to fitness
pub fn roulette_selection<R: Rng>(population: &[ScoredGenome], rng: &mut R) -> Genome {
    let total_fitness: f64 = population.iter().map(|s| s.fitness.max(0.0)).sum();

    if total_fitness <= 0.0 {
        // Nothing valid to weight by, pick random
        return population[rng.gen_range(0..population.len())].genome.clone();
    }

    let mut spin = rng.gen::<f64>() * total_fitness;

    for scored in population {
        spin -= scored.fitness.max(0.0);
        if spin <= 0.0 {
            return scored.genome.clone();
        }
    }

    // Fallback
    population[population.len() - 1].genome.clone()
}

/// Single-point crossover: swap genome tails
pub fn crossover<R: Rng>(parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Genome, Genome) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.gen_range(1..len);

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[point..].copy_from_slice(&parent2[point..]);
    child2[point..].copy_from_slice(&parent1[point..]);

    (child1, child2)
}

/// Mutation: redraw genes at `mutation_rate`, each within its own domain.
/// Gene 0 stays non-negative so a mutant always encodes at least one leg.
pub fn mutate<R: Rng>(
    genome: &mut Genome,
    mutation_rate: f64,
    max_branch_count: usize,
    rng: &mut R,
) {
    for (i, gene) in genome.iter_mut().enumerate() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = rng.gen_range(gene_lower_bound(i)..max_branch_count as i32);
        }
    }
}

/// Generate a random genome of `length` genes, each within its domain.
pub fn random_genome<R: Rng>(length: usize, max_branch_count: usize, rng: &mut R) -> Genome {
    (0..length)
        .map(|i| rng.gen_range(gene_lower_bound(i)..max_branch_count as i32))
        .collect()
}
