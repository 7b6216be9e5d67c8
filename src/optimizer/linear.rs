use crate::error::{PathflowError, PfResult};
use crate::problem::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearSolution {
    /// Continuous per-path allocation, in input order.
    pub allocations: Vec<f64>,
    /// Optimal Z: the common finishing time of the paths that received
    /// packets, or the largest idle offset if an unused path is slower.
    pub makespan: f64,
}

/// Solves the redundancy-free minimax program exactly:
///
/// minimize Z  s.t.  Z >= m_i / b_i + l_i + q_i / b_i,  sum(m_i) = K,  m_i >= 0
///
/// by water-filling: paths are opened in order of their idle offset until
/// the common level leaves no further path below it.
pub fn solve_minimax(paths: &[Path], budget: u64) -> PfResult<LinearSolution> {
    if paths.is_empty() {
        return Err(PathflowError::Engine(
            "cannot plan a transfer with zero paths".into(),
        ));
    }

    let mut order: Vec<usize> = (0..paths.len()).collect();
    order.sort_by(|&a, &b| paths[a].idle_offset().total_cmp(&paths[b].idle_offset()));

    let mut rate = 0.0;
    let mut weighted_offset = 0.0;
    let mut active = 0;

    let level = loop {
        let path = &paths[order[active]];
        rate += path.throughput;
        weighted_offset += path.throughput * path.idle_offset();
        active += 1;

        let level = (budget as f64 + weighted_offset) / rate;
        match order.get(active) {
            Some(&next) if paths[next].idle_offset() < level => {}
            _ => break level,
        }
    };

    let mut allocations = vec![0.0; paths.len()];
    for &i in &order[..active] {
        let path = &paths[i];
        allocations[i] = ((level - path.idle_offset()) * path.throughput).max(0.0);
    }

    // Every path is bound by Z, including the ones left idle.
    let makespan = paths
        .iter()
        .map(Path::idle_offset)
        .fold(level, f64::max);

    Ok(LinearSolution {
        allocations,
        makespan,
    })
}
