use super::mutation;
use super::{Proposal, ProposalId, SearchEngine};
use crate::consts::MIN_POPULATION;
use crate::error::{PathflowError, PfResult};
use fastrand::Rng;
use tracing::debug;

pub struct DifferentialParams {
    pub population_size: usize,
    pub mutation_factor: f64,
    pub crossover_rate: f64,
}

/// DE/rand/1/bin driven through ask/tell.
///
/// The first `population_size` asks hand out the random initial members so
/// the caller can score them; every later ask builds a trial vector for the
/// next target in round-robin order, and `tell` keeps it if it is no worse.
pub struct DifferentialEvolution {
    bounds: Vec<(f64, f64)>,
    population: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    seeded: usize,
    cursor: usize,
    mutation_factor: f64,
    crossover_rate: f64,
    best_fitness: f64,
    best_candidate: Option<Vec<f64>>,
    rng: Rng,
}

impl DifferentialEvolution {
    pub fn new(
        params: DifferentialParams,
        bounds: Vec<(f64, f64)>,
        seed: Option<u64>,
    ) -> PfResult<Self> {
        if bounds.is_empty() {
            return Err(PathflowError::Engine(
                "cannot search a zero-dimensional space".into(),
            ));
        }
        if params.population_size < MIN_POPULATION {
            return Err(PathflowError::Engine(format!(
                "population of {} is below the minimum of {}",
                params.population_size, MIN_POPULATION
            )));
        }
        if let Some(d) = bounds
            .iter()
            .position(|&(lo, hi)| !(lo.is_finite() && hi.is_finite() && lo <= hi))
        {
            return Err(PathflowError::Engine(format!(
                "invalid bounds for dimension {}: {:?}",
                d, bounds[d]
            )));
        }

        let mut rng = match seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };

        let population: Vec<Vec<f64>> = (0..params.population_size)
            .map(|_| mutation::random_point(&mut rng, &bounds))
            .collect();

        debug!(
            "DE: {} members x {} dimensions (F={}, CR={})",
            params.population_size,
            bounds.len(),
            params.mutation_factor,
            params.crossover_rate
        );

        Ok(Self {
            fitness: vec![f64::INFINITY; population.len()],
            population,
            bounds,
            seeded: 0,
            cursor: 0,
            mutation_factor: params.mutation_factor,
            crossover_rate: params.crossover_rate,
            best_fitness: f64::INFINITY,
            best_candidate: None,
            rng,
        })
    }

    pub fn population_size(&self) -> usize {
        self.population.len()
    }
}

impl SearchEngine for DifferentialEvolution {
    fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    fn batch_size(&self) -> usize {
        self.population.len()
    }

    fn ask(&mut self) -> Proposal {
        if self.seeded < self.population.len() {
            let idx = self.seeded;
            self.seeded += 1;
            return Proposal {
                id: ProposalId(idx),
                candidate: self.population[idx].clone(),
            };
        }

        let target = self.cursor;
        self.cursor = (self.cursor + 1) % self.population.len();

        let trial = mutation::rand1_bin(
            &mut self.rng,
            &self.population,
            target,
            self.mutation_factor,
            self.crossover_rate,
            &self.bounds,
        );

        Proposal {
            id: ProposalId(target),
            candidate: trial,
        }
    }

    fn tell(&mut self, id: ProposalId, candidate: Vec<f64>, fitness: f64) {
        let idx = id.0;
        if idx >= self.population.len() || candidate.len() != self.bounds.len() {
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
        if fitness <= self.fitness[idx] {
            self.population[idx] = candidate;
            self.fitness[idx] = fitness;
        }
    }

    fn best(&self) -> f64 {
        self.best_fitness
    }

    fn best_candidate(&self) -> Option<&[f64]> {
        self.best_candidate.as_deref()
    }
}
