use crate::config::Config;
use crate::error::{PathflowError, PfResult};
use crate::model::Evaluator;
use crate::optimizer::{Proposal, SearchEngine};
use rayon::prelude::*;
use tracing::debug;

pub struct OptimizationOptions {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub patience: usize,
    pub parallel: bool,
    pub report_every: usize,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            max_iterations: cfg.search.max_iterations,
            tolerance: cfg.search.tolerance,
            patience: cfg.patience(),
            parallel: !cfg.search.sequential,
            report_every: cfg.search.report_every.max(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub fitness: f64,
    pub candidate: Vec<f64>,
    /// Evaluations spent.
    pub iterations: usize,
    /// True when the plateau stop ended the search.
    pub plateaued: bool,
    /// True when the progress callback asked to stop.
    pub aborted: bool,
}

/// Receives periodic updates during a search.
/// Returning false aborts the search.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, iteration: usize, best: f64) -> bool;
}

/// A callback that never reports and never aborts.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_progress(&self, _iteration: usize, _best: f64) -> bool {
        true
    }
}

pub struct Optimizer<'a> {
    evaluator: &'a Evaluator,
    options: OptimizationOptions,
}

impl<'a> Optimizer<'a> {
    pub fn new(evaluator: &'a Evaluator, options: OptimizationOptions) -> Self {
        Self { evaluator, options }
    }

    /// Runs ask → evaluate → tell until the iteration cap, the plateau stop,
    /// or the callback ends it. Each batch is scored in parallel; tells are
    /// applied in ask order so a seeded run is reproducible either way.
    pub fn run<E, CB>(&self, engine: &mut E, callback: &CB) -> PfResult<OptimizationResult>
    where
        E: SearchEngine + ?Sized,
        CB: ProgressCallback,
    {
        let opts = &self.options;

        if engine.dimensions() != self.evaluator.dimensions() {
            return Err(PathflowError::Engine(format!(
                "engine searches {} dimensions but the problem has {}",
                engine.dimensions(),
                self.evaluator.dimensions()
            )));
        }

        let mut iterations = 0;
        let mut stall = 0;
        let mut previous = f64::INFINITY;
        let mut plateaued = false;
        let mut aborted = false;

        'search: while iterations < opts.max_iterations {
            let batch = engine
                .batch_size()
                .max(1)
                .min(opts.max_iterations - iterations);
            let proposals: Vec<Proposal> = (0..batch).map(|_| engine.ask()).collect();

            let scores: Vec<f64> = if opts.parallel {
                proposals
                    .par_iter()
                    .map(|p| self.evaluator.evaluate(&p.candidate))
                    .collect()
            } else {
                proposals
                    .iter()
                    .map(|p| self.evaluator.evaluate(&p.candidate))
                    .collect()
            };

            for (proposal, fitness) in proposals.into_iter().zip(scores) {
                engine.tell(proposal.id, proposal.candidate, fitness);
                iterations += 1;

                // Improvement is measured against the best after the previous tell.
                let best = engine.best();
                if previous - best > opts.tolerance {
                    stall = 0;
                } else {
                    stall += 1;
                }
                previous = best;

                if stall >= opts.patience {
                    debug!(
                        "Plateau after {} evaluations (best {:.6})",
                        iterations, best
                    );
                    plateaued = true;
                    break 'search;
                }

                if iterations % opts.report_every == 0 && !callback.on_progress(iterations, best) {
                    aborted = true;
                    break 'search;
                }
            }
        }

        let candidate = engine
            .best_candidate()
            .map(<[f64]>::to_vec)
            .ok_or_else(|| PathflowError::Engine("search finished without a candidate".into()))?;

        Ok(OptimizationResult {
            fitness: engine.best(),
            candidate,
            iterations,
            plateaued,
            aborted,
        })
    }
}
