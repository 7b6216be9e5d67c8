use super::probability::psi;
use crate::problem::Path;

/// Estimated completion time of `m` packets on one path: payload plus
/// redundancy at the path's rate, fixed latency, and draining the backlog.
#[inline(always)]
pub fn path_time(m: f64, path: &Path, percentile: u32) -> f64 {
    psi(percentile, m, path.loss) / path.throughput
        + path.latency
        + path.queue_depth as f64 / path.throughput
}
