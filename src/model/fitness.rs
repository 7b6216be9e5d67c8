use super::cost::path_time;
use crate::problem::{Path, Problem};

/// Maps a proposed per-path allocation to a usable value. Anything that is
/// not finite, negative, or above the whole budget counts as zero.
#[inline(always)]
pub fn sanitize(value: f64, budget: u64) -> f64 {
    if is_feasible(value, budget) {
        value
    } else {
        0.0
    }
}

#[inline(always)]
pub fn is_feasible(value: f64, budget: u64) -> bool {
    value.is_finite() && value >= 0.0 && value <= budget as f64
}

/// Minimax objective: budget violation times `penalty`, plus the completion
/// time of the slowest path.
pub fn transfer_time(
    budget: u64,
    penalty: f64,
    candidate: &[f64],
    paths: &[Path],
    percentile: u32,
) -> f64 {
    debug_assert_eq!(candidate.len(), paths.len());

    let mut sum = 0.0;
    let mut slowest = 0.0f64;

    for (&raw, path) in candidate.iter().zip(paths) {
        if !is_feasible(raw, budget) {
            continue;
        }
        sum += raw;
        slowest = slowest.max(path_time(raw, path, percentile));
    }

    (budget as f64 - sum).abs() * penalty + slowest
}

/// A problem snapshot paired with its penalty weight.
#[derive(Debug, Clone)]
pub struct Evaluator {
    paths: Vec<Path>,
    budget: u64,
    percentile: u32,
    penalty: f64,
}

impl Evaluator {
    pub fn new(problem: &Problem, penalty: f64) -> Self {
        Self {
            paths: problem.paths().to_vec(),
            budget: problem.budget(),
            percentile: problem.percentile(),
            penalty,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.paths.len()
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn evaluate(&self, candidate: &[f64]) -> f64 {
        transfer_time(
            self.budget,
            self.penalty,
            candidate,
            &self.paths,
            self.percentile,
        )
    }
}
