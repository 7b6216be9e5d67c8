// Problem clamp ranges
pub const MAX_PATHS: usize = 16;
pub const MIN_BUDGET: u64 = 10;
pub const MAX_BUDGET: u64 = 1000;
pub const MIN_SUCCESS: f64 = 0.01;
pub const MAX_SUCCESS: f64 = 0.99;

// Search defaults
pub const POPULATION_PER_DIMENSION: usize = 20;
pub const MAX_ITERATIONS: usize = 1_000_000;
pub const STALL_TOLERANCE: f64 = 1e-6;
pub const PLATEAU_FRACTION: f64 = 0.1;
pub const BUDGET_PENALTY: f64 = 1000.0;

/// Differential evolution needs three donors distinct from the target.
pub const MIN_POPULATION: usize = 4;

pub const DEFAULT_PROBLEM_FILE: &str = "problem.txt";
