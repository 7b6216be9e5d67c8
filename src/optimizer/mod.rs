pub mod anneal;
pub mod differential;
pub mod linear;
pub mod mutation;
pub mod runner;

pub use self::runner::{OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback};

use self::anneal::{AnnealParams, Annealer};
use self::differential::{DifferentialEvolution, DifferentialParams};
use crate::config::{Config, EngineKind};
use crate::error::PfResult;

/// Opaque handle tying a `tell` back to the `ask` that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProposalId(pub usize);

#[derive(Debug, Clone)]
pub struct Proposal {
    pub id: ProposalId,
    pub candidate: Vec<f64>,
}

/// A derivative-free minimizer driven from outside: the caller asks for a
/// candidate, scores it, and tells the score back.
pub trait SearchEngine: Send {
    fn dimensions(&self) -> usize;

    /// How many proposals may be outstanding before the first `tell`.
    fn batch_size(&self) -> usize {
        1
    }

    fn ask(&mut self) -> Proposal;

    /// The only point where the engine's population changes.
    fn tell(&mut self, id: ProposalId, candidate: Vec<f64>, fitness: f64);

    /// Best fitness seen so far; infinite before the first `tell`.
    fn best(&self) -> f64;

    fn best_candidate(&self) -> Option<&[f64]>;
}

/// Builds the configured engine over `[0, budget]` in every dimension.
pub fn build_engine(
    config: &Config,
    dimensions: usize,
    budget: u64,
    seed: Option<u64>,
) -> PfResult<Box<dyn SearchEngine>> {
    let s = &config.search;
    let bounds = vec![(0.0, budget as f64); dimensions];

    let engine: Box<dyn SearchEngine> = match s.engine {
        EngineKind::Differential => Box::new(DifferentialEvolution::new(
            DifferentialParams {
                population_size: s.population_per_dim * dimensions,
                mutation_factor: s.mutation_factor,
                crossover_rate: s.crossover_rate,
            },
            bounds,
            seed,
        )?),
        EngineKind::Anneal => Box::new(Annealer::new(
            AnnealParams {
                temp_max: s.temp_max,
                temp_min: s.temp_min,
                cooling: s.cooling,
                step_fraction: s.step_fraction,
            },
            bounds,
            seed,
        )?),
    };
    Ok(engine)
}
