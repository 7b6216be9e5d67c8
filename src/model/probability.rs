/// Standard-normal quantiles for percentiles 51..=99, coarse and tabulated.
const Z_TABLE: [f64; 49] = [
    0.025, 0.050, 0.075, 0.100, 0.126, 0.151, 0.176, 0.202, 0.228, 0.253, //
    0.279, 0.305, 0.332, 0.358, 0.385, 0.412, 0.440, 0.468, 0.496, 0.524, //
    0.553, 0.583, 0.613, 0.643, 0.674, 0.706, 0.739, 0.772, 0.806, 0.842, //
    0.878, 0.915, 0.954, 0.994, 1.036, 1.080, 1.126, 1.175, 1.227, 1.282, //
    1.341, 1.405, 1.476, 1.555, 1.645, 1.751, 1.881, 2.054, 2.326,
];

const Z_EXTREME: f64 = 3.090;

/// z-score for a success percentile in [0, 100]. No interpolation.
pub fn qnorm(percentile: u32) -> f64 {
    match percentile {
        50 => 0.0,
        0 => -Z_EXTREME,
        p if p >= 100 => Z_EXTREME,
        p if p > 50 => Z_TABLE[(p - 51) as usize],
        p => -Z_TABLE[(49 - p) as usize],
    }
}

/// Total packets (payload plus FEC redundancy) needed so that at least `m`
/// arrive with the target probability, using the Gaussian approximation of
/// the binomial loss tail. Known to be loose when `m * p` is small.
pub fn psi(percentile: u32, m: f64, p: f64) -> f64 {
    let mp = m * p;
    let extra = ((qnorm(percentile) * mp.sqrt() + mp) / (1.0 - p)).ceil();
    m + extra.max(0.0)
}

/// `psi` for an integral allocation.
pub fn psi_packets(percentile: u32, m: u64, p: f64) -> u64 {
    psi(percentile, m as f64, p).round() as u64
}
