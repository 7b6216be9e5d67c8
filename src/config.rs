use crate::consts::{
    BUDGET_PENALTY, MAX_ITERATIONS, MAX_PATHS, PLATEAU_FRACTION, POPULATION_PER_DIMENSION,
    STALL_TOLERANCE,
};
use crate::error::{PathflowError, PfResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::{Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineKind {
    /// DE/rand/1/bin over a population scaled by dimension.
    #[default]
    Differential,
    /// Single-chain simulated annealing.
    Anneal,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub limits: ProblemLimits,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, value_enum, default_value_t = EngineKind::Differential)]
    pub engine: EngineKind,

    // === STOPPING ===
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    pub max_iterations: usize,
    #[arg(long, default_value_t = STALL_TOLERANCE)]
    pub tolerance: f64,
    #[arg(long, default_value_t = PLATEAU_FRACTION)]
    pub plateau_fraction: f64,

    // === OBJECTIVE ===
    #[arg(long, default_value_t = BUDGET_PENALTY)]
    pub penalty: f64,

    // === DIFFERENTIAL EVOLUTION ===
    #[arg(long, default_value_t = POPULATION_PER_DIMENSION)]
    pub population_per_dim: usize,
    #[arg(long, default_value_t = 0.5)]
    pub mutation_factor: f64,
    #[arg(long, default_value_t = 0.9)]
    pub crossover_rate: f64,

    // === ANNEALING ===
    #[arg(long, default_value_t = 1.0)]
    pub temp_max: f64,
    #[arg(long, default_value_t = 1e-6)]
    pub temp_min: f64,
    #[arg(long, default_value_t = 0.9995)]
    pub cooling: f64,
    #[arg(long, default_value_t = 0.1)]
    pub step_fraction: f64,

    // === RUNTIME ===
    #[arg(long, default_value_t = 50_000)]
    pub report_every: usize,
    /// Evaluate each generation on the calling thread only.
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            engine: EngineKind::Differential,
            max_iterations: MAX_ITERATIONS,
            tolerance: STALL_TOLERANCE,
            plateau_fraction: PLATEAU_FRACTION,
            penalty: BUDGET_PENALTY,
            population_per_dim: POPULATION_PER_DIMENSION,
            mutation_factor: 0.5,
            crossover_rate: 0.9,
            temp_max: 1.0,
            temp_min: 1e-6,
            cooling: 0.9995,
            step_fraction: 0.1,
            report_every: 50_000,
            sequential: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProblemLimits {
    #[arg(long, default_value_t = MAX_PATHS)]
    pub max_paths: usize,
}

impl Default for ProblemLimits {
    fn default() -> Self {
        Self {
            max_paths: MAX_PATHS,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Copies over only the values the user typed on the command line, so a
    /// config file keeps precedence over clap defaults.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search, engine);
        update_if_present!(search, max_iterations);
        update_if_present!(search, tolerance);
        update_if_present!(search, plateau_fraction);
        update_if_present!(search, penalty);
        update_if_present!(search, population_per_dim);
        update_if_present!(search, mutation_factor);
        update_if_present!(search, crossover_rate);
        update_if_present!(search, temp_max);
        update_if_present!(search, temp_min);
        update_if_present!(search, cooling);
        update_if_present!(search, step_fraction);
        update_if_present!(search, report_every);
        update_if_present!(search, sequential);

        update_if_present!(limits, max_paths);
    }

    pub fn validate(&self) -> PfResult<()> {
        let s = &self.search;
        let fail = |msg: String| Err(PathflowError::Config(msg));

        if s.max_iterations == 0 {
            return fail("max_iterations must be at least 1".into());
        }
        if !(s.tolerance >= 0.0) {
            return fail(format!("tolerance must be >= 0, got {}", s.tolerance));
        }
        if !(s.plateau_fraction > 0.0 && s.plateau_fraction <= 1.0) {
            return fail(format!(
                "plateau_fraction must lie in (0, 1], got {}",
                s.plateau_fraction
            ));
        }
        if !(s.penalty > 0.0) || !s.penalty.is_finite() {
            return fail(format!("penalty must be positive, got {}", s.penalty));
        }
        if s.population_per_dim == 0 {
            return fail("population_per_dim must be at least 1".into());
        }
        if !(s.mutation_factor > 0.0 && s.mutation_factor <= 2.0) {
            return fail(format!(
                "mutation_factor must lie in (0, 2], got {}",
                s.mutation_factor
            ));
        }
        if !(0.0..=1.0).contains(&s.crossover_rate) {
            return fail(format!(
                "crossover_rate must lie in [0, 1], got {}",
                s.crossover_rate
            ));
        }
        if !(s.temp_min > 0.0 && s.temp_min <= s.temp_max) {
            return fail(format!(
                "temperatures must satisfy 0 < temp_min <= temp_max, got {} / {}",
                s.temp_min, s.temp_max
            ));
        }
        if !(s.cooling > 0.0 && s.cooling < 1.0) {
            return fail(format!("cooling must lie in (0, 1), got {}", s.cooling));
        }
        if !(s.step_fraction > 0.0 && s.step_fraction <= 1.0) {
            return fail(format!(
                "step_fraction must lie in (0, 1], got {}",
                s.step_fraction
            ));
        }
        if s.report_every == 0 {
            return fail("report_every must be at least 1".into());
        }
        if self.limits.max_paths == 0 {
            return fail("max_paths must be at least 1".into());
        }
        Ok(())
    }

    /// Stall count that triggers the plateau stop.
    pub fn patience(&self) -> usize {
        ((self.search.max_iterations as f64 * self.search.plateau_fraction).ceil() as usize).max(1)
    }
}
