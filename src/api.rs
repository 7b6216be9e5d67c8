use crate::config::Config;
use crate::error::{PathflowError, PfResult};
use crate::model::Evaluator;
use crate::optimizer::linear::solve_minimax;
use crate::optimizer::{
    build_engine, OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback,
};
use crate::plan::{self, Plan, PlanSource, SearchSummary};
use crate::problem::Problem;
use tracing::info;

pub use crate::problem::loader::load_problem;

/// Service: stochastic minimax search with FEC-aware path times.
///
/// Runs `attempts` independent searches (at least one) and keeps the one
/// with the lowest fitness. Seeded runs are reproducible.
pub fn plan_transfer<CB: ProgressCallback>(
    problem: &Problem,
    config: &Config,
    seed: Option<u64>,
    attempts: usize,
    callback: &CB,
) -> PfResult<Plan> {
    config.validate()?;
    if problem.path_count() == 0 {
        return Ok(plan::empty(problem));
    }

    let evaluator = Evaluator::new(problem, config.search.penalty);
    let optimizer = Optimizer::new(&evaluator, OptimizationOptions::from(config));
    let attempts = attempts.max(1);

    let mut best: Option<OptimizationResult> = None;
    for attempt in 1..=attempts {
        let attempt_seed = seed.map(|s| s.wrapping_add((attempt as u64 - 1) * 100));
        let mut engine = build_engine(
            config,
            problem.path_count(),
            problem.budget(),
            attempt_seed,
        )?;

        let result = optimizer.run(engine.as_mut(), callback)?;
        info!(
            "➡️  Attempt #{} of {}: fitness {:.6} after {} evaluations{}",
            attempt,
            attempts,
            result.fitness,
            result.iterations,
            if result.plateaued { " (plateau)" } else { "" }
        );

        let aborted = result.aborted;
        if best.as_ref().map_or(true, |b| result.fitness < b.fitness) {
            best = Some(result);
        }
        if aborted {
            break;
        }
    }

    let best = best.ok_or_else(|| PathflowError::Engine("no search attempt completed".into()))?;
    let summary = SearchSummary {
        engine: config.search.engine,
        iterations: best.iterations,
        fitness: best.fitness,
        plateaued: best.plateaued,
        aborted: best.aborted,
        attempts,
    };
    Ok(plan::from_candidate(
        problem,
        &best.candidate,
        PlanSource::Search(summary),
    ))
}

/// Service: exact plan for the redundancy-free linear model, reported with
/// FEC-aware times.
pub fn plan_linear(problem: &Problem) -> PfResult<Plan> {
    if problem.path_count() == 0 {
        return Ok(plan::empty(problem));
    }
    let solution = solve_minimax(problem.paths(), problem.budget())?;
    info!("📐 Linear bound: {:.4}", solution.makespan);
    Ok(plan::from_candidate(
        problem,
        &solution.allocations,
        PlanSource::Linear {
            makespan: solution.makespan,
        },
    ))
}

/// Service: score a user-supplied allocation. Each entry must lie in
/// `[0, K]`.
pub fn evaluate_allocation(problem: &Problem, allocation: &[u64]) -> PfResult<Plan> {
    if allocation.len() != problem.path_count() {
        return Err(PathflowError::Config(format!(
            "allocation has {} entries but the problem has {} paths",
            allocation.len(),
            problem.path_count()
        )));
    }
    if let Some((index, m)) = allocation
        .iter()
        .enumerate()
        .find(|&(_, &m)| m > problem.budget())
    {
        return Err(PathflowError::Config(format!(
            "allocation for path #{} is {} but the budget is {}",
            index,
            m,
            problem.budget()
        )));
    }
    if problem.path_count() == 0 {
        return Ok(plan::empty(problem));
    }
    Ok(plan::extract(problem, allocation, PlanSource::Fixed))
}

/// Parses `"60,40"` into per-path packet counts. A blank string is the
/// empty allocation.
pub fn parse_allocation(raw: &str) -> PfResult<Vec<u64>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|_| PathflowError::Config(format!("invalid allocation entry '{}'", s)))
        })
        .collect()
}
