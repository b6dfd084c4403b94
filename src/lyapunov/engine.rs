//! Seam to the numeric Rauzy–Zorich integrator.
//!
//! The orchestrator flattens the cover into plain integer tables so that
//! any engine, native or foreign, can run the experiments.

use crate::error::{CoverError, CoverResult};

/// Flat description of a cover and of the experiments to run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInput {
    /// Label rank of each occurrence, occurrence `(side, pos)` at index
    /// `pos + side · n_intervals`.
    pub labels: Vec<usize>,
    /// Length of the top row, which fixes the flat indexing.
    pub n_intervals: usize,
    /// Flat index of the other occurrence of the same label.
    pub twins: Vec<usize>,
    /// Sheet permutations concatenated in alphabet order, zero-indexed.
    pub sigma: Vec<usize>,
    /// Number of sheets.
    pub degree: usize,
    pub nb_experiments: usize,
    pub nb_iterations: u64,
    /// Number of exponents wanted per block: a single block without
    /// isotypic decomposition, one block per real character otherwise.
    pub dimensions: Vec<usize>,
    /// Projector coefficients, block `i` at `i·s² .. (i+1)·s²` with
    /// `s = degree · #labels`, row major over the transposed projector.
    pub projections: Option<Vec<f64>>,
    /// Starting lengths, random when absent.
    pub lengths: Option<Vec<f64>>,
    pub verbose: bool,
}

impl EngineInput {
    /// Expected number of sample vectors: the speed plus one per exponent.
    pub fn n_slots(&self) -> usize {
        1 + self.dimensions.iter().sum::<usize>()
    }

    /// Size of one projector block.
    pub fn projector_size(&self) -> usize {
        self.sigma.len()
    }

    /// Structural consistency of the tables.
    pub fn check(&self) -> CoverResult<()> {
        let n = self.labels.len();
        if self.twins.len() != n || n % 2 != 0 {
            return Err(CoverError::Engine(format!(
                "{} labels and {} twins do not describe two rows",
                n,
                self.twins.len()
            )));
        }
        for (i, &j) in self.twins.iter().enumerate() {
            if j >= n || self.twins[j] != i || j == i || self.labels[j] != self.labels[i] {
                return Err(CoverError::Engine(format!(
                    "occurrence {i} has an inconsistent twin {j}"
                )));
            }
        }
        if self.degree == 0 || self.sigma.len() != self.degree * (n / 2) {
            return Err(CoverError::Engine(format!(
                "{} sheet images for degree {} and {} intervals",
                self.sigma.len(),
                self.degree,
                n / 2
            )));
        }
        if let Some(proj) = &self.projections {
            let s = self.projector_size();
            if proj.len() != s * s * self.dimensions.len() {
                return Err(CoverError::Engine(format!(
                    "{} projector coefficients for {} blocks of size {s}",
                    proj.len(),
                    self.dimensions.len()
                )));
            }
        }
        if let Some(lengths) = &self.lengths {
            if lengths.len() != n / 2 {
                return Err(CoverError::Engine(format!(
                    "{} lengths for {} intervals",
                    lengths.len(),
                    n / 2
                )));
            }
        }
        Ok(())
    }
}

/// A Monte-Carlo estimator of the H⁺ Lyapunov exponents of a cover.
pub trait LyapunovEngine: Send + Sync {
    /// Run `nb_experiments` experiments. The result has one vector of
    /// samples per slot: slot 0 is the speed of the renormalization, the
    /// following ones the exponents of each block in order.
    fn lyapunov_exponents_h_plus_cover(&self, input: &EngineInput) -> CoverResult<Vec<Vec<f64>>>;
}
