use crate::config::EngineKind;
use crate::model::{path_time, psi_packets, sanitize};
use crate::problem::Problem;
use serde::Serialize;

/// Final figures for one path, recomputed from its integral allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPlan {
    pub index: usize,
    pub throughput: f64,
    pub latency: f64,
    pub loss: f64,
    pub queue_depth: u64,
    /// Payload packets assigned.
    pub allocation: u64,
    /// Packets actually sent, payload plus FEC redundancy.
    pub packets: u64,
    pub overhead: u64,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    pub engine: EngineKind,
    pub iterations: usize,
    pub fitness: f64,
    pub plateaued: bool,
    pub aborted: bool,
    pub attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlanSource {
    Search(SearchSummary),
    /// Redundancy-free linear program; `makespan` is its optimal Z.
    Linear { makespan: f64 },
    /// Allocation supplied by the user.
    Fixed,
    /// The problem has no paths; nothing was planned.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub path_count: usize,
    pub budget: u64,
    pub success_probability: f64,
    pub paths: Vec<PathPlan>,
    pub total_allocation: u64,
    pub total_packets: u64,
    pub total_overhead: u64,
    /// Completion time of the slowest path. Idle paths still count their
    /// latency and backlog.
    pub makespan: f64,
    pub source: PlanSource,
}

/// Rounds a continuous allocation to packets. Invalid entries count as zero;
/// the rest are rounded by largest remainder towards `round(sum)`, which
/// matches plain nearest rounding whenever that keeps the total.
pub fn round_allocations(continuous: &[f64], budget: u64) -> Vec<u64> {
    let values: Vec<f64> = continuous.iter().map(|&v| sanitize(v, budget)).collect();
    let target = values.iter().sum::<f64>().round() as u64;

    let mut rounded: Vec<u64> = values.iter().map(|v| v.floor() as u64).collect();
    let floor_sum: u64 = rounded.iter().sum();

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = values[a] - values[a].floor();
        let fb = values[b] - values[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });

    let missing = target.saturating_sub(floor_sum) as usize;
    for &i in order.iter().take(missing) {
        rounded[i] += 1;
    }
    rounded
}

/// Recomputes exact redundancy and timing for an integral allocation.
/// `allocation` must have one entry per path, each at most the budget.
pub fn extract(problem: &Problem, allocation: &[u64], source: PlanSource) -> Plan {
    let percentile = problem.percentile();

    let paths: Vec<PathPlan> = problem
        .paths()
        .iter()
        .zip(allocation)
        .enumerate()
        .map(|(index, (path, &m))| {
            let packets = psi_packets(percentile, m, path.loss);
            PathPlan {
                index,
                throughput: path.throughput,
                latency: path.latency,
                loss: path.loss,
                queue_depth: path.queue_depth,
                allocation: m,
                packets,
                overhead: packets.saturating_sub(m),
                time: path_time(m as f64, path, percentile),
            }
        })
        .collect();

    let makespan = paths.iter().map(|p| p.time).fold(0.0, f64::max);

    Plan {
        path_count: problem.path_count(),
        budget: problem.budget(),
        success_probability: problem.success_probability(),
        total_allocation: paths.iter().map(|p| p.allocation).sum(),
        total_packets: paths.iter().map(|p| p.packets).sum(),
        total_overhead: paths.iter().map(|p| p.overhead).sum(),
        makespan,
        paths,
        source,
    }
}

/// Plan for a problem without paths: zero totals, zero makespan.
pub fn empty(problem: &Problem) -> Plan {
    extract(problem, &[], PlanSource::Empty)
}

/// Rounds a search (or linear) result and extracts the final plan.
pub fn from_candidate(problem: &Problem, candidate: &[f64], source: PlanSource) -> Plan {
    let allocation = round_allocations(candidate, problem.budget());
    extract(problem, &allocation, source)
}
