use super::traits::ConfigSection;
use crate::error::{EcorouteError, Result};
use serde::{Deserialize, Serialize};

/// Parameters of one genetic route search. Population size and genome
/// length are not configured here: both are derived from the map being
/// searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_generations: usize,
    pub timeout_ms: u64,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elitism_rate: f64,
    pub selection_method: SelectionMethod,
    pub tournament_size: usize,
    /// Fixed RNG seed for reproducible searches; `None` seeds from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SelectionMethod {
    Tournament,
    Roulette,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_generations: 300,
            timeout_ms: 90_000,
            mutation_rate: 0.15,
            crossover_rate: 0.85,
            elitism_rate: 0.1,
            selection_method: SelectionMethod::Tournament,
            tournament_size: 3,
            seed: None,
        }
    }
}

impl ConfigSection for SearchConfig {
    fn section_name() -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EcorouteError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(EcorouteError::Configuration(
                "Crossover rate must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.elitism_rate) {
            return Err(EcorouteError::Configuration(
                "Elitism rate must be between 0 and 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(EcorouteError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
