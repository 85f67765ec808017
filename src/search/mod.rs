pub mod branch_index;
pub mod decoder;
pub mod engine;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod orchestrator;

pub use branch_index::BranchIndex;
pub use decoder::PathDecoder;
pub use engine::EvolutionEngine;
pub use fitness::{FitnessEvaluator, ScoredGenome};
pub use genome::Genome;
pub use orchestrator::{RouteRequest, RouteSearch};
