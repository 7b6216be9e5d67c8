use fastrand::Rng;

/// Uniform random point inside the box.
pub fn random_point(rng: &mut Rng, bounds: &[(f64, f64)]) -> Vec<f64> {
    bounds
        .iter()
        .map(|&(lo, hi)| lo + rng.f64() * (hi - lo))
        .collect()
}

/// Picks three distinct population indices, all different from `target`.
/// Caller guarantees `size >= 4`.
pub fn pick_donors(rng: &mut Rng, size: usize, target: usize) -> [usize; 3] {
    let mut picked = [usize::MAX; 3];
    let mut count = 0;
    while count < 3 {
        let idx = rng.usize(0..size);
        if idx == target || picked[..count].contains(&idx) {
            continue;
        }
        picked[count] = idx;
        count += 1;
    }
    picked
}

/// DE/rand/1 mutation followed by binomial crossover against `target`.
/// One coordinate always comes from the mutant.
pub fn rand1_bin(
    rng: &mut Rng,
    population: &[Vec<f64>],
    target: usize,
    mutation_factor: f64,
    crossover_rate: f64,
    bounds: &[(f64, f64)],
) -> Vec<f64> {
    let [r1, r2, r3] = pick_donors(rng, population.len(), target);
    let base = &population[target];
    let dims = base.len();
    let forced = rng.usize(0..dims);

    (0..dims)
        .map(|d| {
            if d != forced && rng.f64() >= crossover_rate {
                return base[d];
            }
            let mutant =
                population[r1][d] + mutation_factor * (population[r2][d] - population[r3][d]);
            let (lo, hi) = bounds[d];
            bounce_back(rng, mutant, base[d], lo, hi)
        })
        .collect()
}

/// Pulls an out-of-bounds coordinate back between the violated bound and the
/// parent's coordinate, keeping the parent's side of the box.
#[inline(always)]
pub fn bounce_back(rng: &mut Rng, value: f64, parent: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo + rng.f64() * (parent - lo)
    } else if value > hi {
        hi - rng.f64() * (hi - parent)
    } else {
        value
    }
}
