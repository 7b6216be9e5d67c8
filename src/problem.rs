pub mod loader;

use crate::consts::{MAX_BUDGET, MAX_SUCCESS, MIN_BUDGET, MIN_SUCCESS};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// One network route. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct Path {
    /// Packets per time unit.
    pub throughput: f64,
    #[builder(default = 0.0)]
    #[serde(default)]
    pub latency: f64,
    /// Per-packet loss probability.
    #[builder(default = 0.0)]
    #[serde(default)]
    pub loss: f64,
    /// Packets already pending on the path.
    #[builder(default = 0)]
    #[serde(default)]
    pub queue_depth: u64,
}

impl Path {
    /// Checks the physical constraints a record must satisfy to be usable.
    pub fn validate(&self) -> Result<(), String> {
        if !self.throughput.is_finite() || self.throughput <= 0.0 {
            return Err(format!(
                "throughput must be positive, got {}",
                self.throughput
            ));
        }
        if !self.latency.is_finite() || self.latency < 0.0 {
            return Err(format!(
                "latency must be non-negative, got {}",
                self.latency
            ));
        }
        if !(0.0..1.0).contains(&self.loss) {
            return Err(format!("loss must lie in [0, 1), got {}", self.loss));
        }
        Ok(())
    }

    /// Time a zero-allocation transfer would still take: latency plus backlog.
    pub fn idle_offset(&self) -> f64 {
        self.latency + self.queue_depth as f64 / self.throughput
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    paths: Vec<Path>,
    budget: u64,
    success_probability: f64,
}

impl Problem {
    /// Builds a problem, silently clamping every scalar into range.
    /// Paths beyond `max_paths` are dropped.
    pub fn clamped(mut paths: Vec<Path>, budget: i64, success: f64, max_paths: usize) -> Self {
        paths.truncate(max_paths);
        Self {
            paths,
            budget: clamp_budget(budget),
            success_probability: clamp_success(success),
        }
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    /// Success target as an integer percentile, the form `qnorm` works on.
    pub fn percentile(&self) -> u32 {
        (self.success_probability * 100.0).round() as u32
    }
}

pub fn clamp_path_count(n: i64, max_paths: usize) -> usize {
    n.clamp(0, max_paths as i64) as usize
}

pub fn clamp_budget(k: i64) -> u64 {
    k.clamp(MIN_BUDGET as i64, MAX_BUDGET as i64) as u64
}

pub fn clamp_success(ps: f64) -> f64 {
    if ps.is_nan() {
        return MIN_SUCCESS;
    }
    ps.clamp(MIN_SUCCESS, MAX_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_scalars_into_range() {
        let p = Problem::clamped(vec![], 5, 1.5, 16);
        assert_eq!(p.budget(), 10);
        assert_eq!(p.success_probability(), 0.99);

        let p = Problem::clamped(vec![], 5000, f64::NAN, 16);
        assert_eq!(p.budget(), 1000);
        assert_eq!(p.success_probability(), 0.01);
    }

    #[test]
    fn truncates_excess_paths() {
        let path = Path::builder().throughput(10.0).build();
        let p = Problem::clamped(vec![path; 20], 100, 0.9, 16);
        assert_eq!(p.path_count(), 16);
    }

    #[test]
    fn percentile_rounds_instead_of_truncating() {
        let p = Problem::clamped(vec![], 100, 0.95, 16);
        assert_eq!(p.percentile(), 95);
        let p = Problem::clamped(vec![], 100, 0.29, 16);
        assert_eq!(p.percentile(), 29);
    }

    #[test]
    fn rejects_unphysical_paths() {
        assert!(Path::builder().throughput(0.0).build().validate().is_err());
        assert!(Path::builder()
            .throughput(1.0)
            .loss(1.0)
            .build()
            .validate()
            .is_err());
        assert!(Path::builder()
            .throughput(1.0)
            .latency(-0.1)
            .build()
            .validate()
            .is_err());
        assert!(Path::builder()
            .throughput(1.0)
            .loss(0.5)
            .build()
            .validate()
            .is_ok());
    }
}
