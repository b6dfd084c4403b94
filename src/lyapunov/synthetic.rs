//! Seeded synthetic engine
//!
//! Draws Gaussian samples around prescribed values instead of running the
//! renormalization. Useful to exercise the orchestration end to end, in
//! demos and tests, without a numeric integrator.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::{CoverError, CoverResult};

use super::engine::{EngineInput, LyapunovEngine};

/// Engine returning `value + N(0, noise²)` samples for every slot.
#[derive(Debug, Clone)]
pub struct SyntheticEngine {
    /// Mean of slot 0.
    pub speed: f64,
    /// Means of the following slots; missing ones are 0.
    pub exponents: Vec<f64>,
    pub noise: f64,
    pub seed: u64,
}

impl SyntheticEngine {
    pub fn new(speed: f64, exponents: Vec<f64>) -> Self {
        Self {
            speed,
            exponents,
            noise: 0.01,
            seed: 0,
        }
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl LyapunovEngine for SyntheticEngine {
    fn lyapunov_exponents_h_plus_cover(&self, input: &EngineInput) -> CoverResult<Vec<Vec<f64>>> {
        input.check()?;
        let normal = Normal::new(0.0, self.noise)
            .map_err(|e| CoverError::Engine(format!("invalid noise {}: {e}", self.noise)))?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let slots = input.n_slots();
        tracing::debug!(
            slots,
            experiments = input.nb_experiments,
            iterations = input.nb_iterations,
            "synthetic Lyapunov run"
        );
        let samples = (0..slots)
            .map(|slot| {
                let center = if slot == 0 {
                    self.speed
                } else {
                    self.exponents.get(slot - 1).copied().unwrap_or(0.0)
                };
                (0..input.nb_experiments)
                    .map(|_| center + normal.sample(&mut rng))
                    .collect()
            })
            .collect();
        Ok(samples)
    }
}
