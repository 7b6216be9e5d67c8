use super::mutation;
use super::{Proposal, ProposalId, SearchEngine};
use crate::error::{PathflowError, PfResult};
use fastrand::Rng;

pub struct AnnealParams {
    pub temp_max: f64,
    pub temp_min: f64,
    pub cooling: f64,
    pub step_fraction: f64,
}

/// Single-chain simulated annealing behind the ask/tell contract.
///
/// Moves either nudge one coordinate or shift mass between two coordinates
/// (keeping their sum), with a step that shrinks as the chain cools.
pub struct Annealer {
    bounds: Vec<(f64, f64)>,
    current: Vec<f64>,
    current_fitness: Option<f64>,
    temperature: f64,
    params: AnnealParams,
    next_id: usize,
    best_fitness: f64,
    best_candidate: Option<Vec<f64>>,
    rng: Rng,
}

impl Annealer {
    pub fn new(
        params: AnnealParams,
        bounds: Vec<(f64, f64)>,
        seed: Option<u64>,
    ) -> PfResult<Self> {
        if bounds.is_empty() {
            return Err(PathflowError::Engine(
                "cannot search a zero-dimensional space".into(),
            ));
        }
        if bounds
            .iter()
            .any(|&(lo, hi)| !(lo.is_finite() && hi.is_finite() && lo <= hi))
        {
            return Err(PathflowError::Engine("invalid search bounds".into()));
        }

        let mut rng = match seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };
        let current = mutation::random_point(&mut rng, &bounds);

        Ok(Self {
            bounds,
            current,
            current_fitness: None,
            temperature: params.temp_max,
            params,
            next_id: 0,
            best_fitness: f64::INFINITY,
            best_candidate: None,
            rng,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn step_size(&self, dim: usize) -> f64 {
        let (lo, hi) = self.bounds[dim];
        let heat = (self.temperature / self.params.temp_max).max(1e-6);
        (hi - lo) * self.params.step_fraction * heat
    }

    fn propose(&mut self) -> Vec<f64> {
        let mut next = self.current.clone();
        let dims = next.len();
        let a = self.rng.usize(0..dims);
        let delta = (self.rng.f64() * 2.0 - 1.0) * self.step_size(a);

        if dims > 1 && self.rng.bool() {
            // Exchange move
            let mut b = self.rng.usize(0..dims - 1);
            if b >= a {
                b += 1;
            }
            let (lo_a, hi_a) = self.bounds[a];
            let (lo_b, hi_b) = self.bounds[b];
            // Largest shift that keeps both coordinates inside their bounds.
            let up = (hi_a - next[a]).min(next[b] - lo_b);
            let down = (next[a] - lo_a).min(hi_b - next[b]);
            let shift = delta.clamp(-down.max(0.0), up.max(0.0));
            next[a] = (next[a] + shift).clamp(lo_a, hi_a);
            next[b] = (next[b] - shift).clamp(lo_b, hi_b);
        } else {
            let (lo, hi) = self.bounds[a];
            next[a] = (next[a] + delta).clamp(lo, hi);
        }
        next
    }
}

impl SearchEngine for Annealer {
    fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    fn ask(&mut self) -> Proposal {
        let candidate = if self.current_fitness.is_none() {
            self.current.clone()
        } else {
            self.propose()
        };
        let id = ProposalId(self.next_id);
        self.next_id += 1;
        Proposal { id, candidate }
    }

    fn tell(&mut self, id: ProposalId, candidate: Vec<f64>, fitness: f64) {
        if candidate.len() != self.bounds.len() {
            return;
        }
        let fitness = if fitness.is_nan() {
            f64::INFINITY
        } else {
            fitness
        };

        if fitness < self.best_fitness {
            self.best_fitness = fitness;
            self.best_candidate = Some(candidate.clone());
        }

        // Stale proposals only feed the best-so-far.
        if id.0 + 1 != self.next_id {
            return;
        }

        let accept = match self.current_fitness {
            None => true,
            Some(current) => {
                let delta = fitness - current;
                delta <= 0.0 || self.rng.f64() < (-delta / self.temperature).exp()
            }
        };
        if accept {
            self.current = candidate;
            self.current_fitness = Some(fitness);
        }

        self.temperature = (self.temperature * self.params.cooling).max(self.params.temp_min);
    }

    fn best(&self) -> f64 {
        self.best_fitness
    }

    fn best_candidate(&self) -> Option<&[f64]> {
        self.best_candidate.as_deref()
    }
}
