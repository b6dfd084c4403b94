//! Lyapunov exponents of the H⁺ part of the homology of a cover
//!
//! The cover is flattened into integer tables, optionally together with
//! the isotypic projectors of its deck group, and handed to an engine in a
//! single call. The engine answers with samples per slot; the orchestrator
//! averages them and regroups the exponents per isotypic component.

use std::time::Instant;

use crate::algebra::Field;
use crate::cover::{PermutationCover, RealCharacter};
use crate::error::{CoverError, CoverResult};
use crate::permutation::{BasePermutation, Occurrence};

use super::config::LyapunovConfig;
use super::engine::{EngineInput, LyapunovEngine};
use super::stats::Estimate;

/// Exponents of one isotypic component.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotypicExponents {
    pub exponents: Vec<f64>,
    pub estimates: Vec<Estimate>,
    /// Present when requested in the configuration.
    pub character: Option<RealCharacter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Exponents {
    /// The top exponents of H⁺, largest first as returned by the engine.
    Flat(Vec<f64>),
    /// One block per real character of the deck group.
    Isotypic(Vec<IsotypicExponents>),
}

impl Exponents {
    /// All exponents, blocks concatenated.
    pub fn flattened(&self) -> Vec<f64> {
        match self {
            Exponents::Flat(v) => v.clone(),
            Exponents::Isotypic(blocks) => blocks
                .iter()
                .flat_map(|b| b.exponents.iter().copied())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LyapunovReport {
    /// Mean speed of the renormalization, when requested.
    pub speed: Option<f64>,
    pub exponents: Exponents,
}

impl LyapunovReport {
    fn empty() -> Self {
        Self {
            speed: None,
            exponents: Exponents::Flat(Vec::new()),
        }
    }
}

/// Flat tables describing the cover to the engine: label of each
/// occurrence, twin of each occurrence and concatenated sheet images.
fn encode<P: BasePermutation>(cover: &PermutationCover<P>) -> (usize, Vec<usize>, Vec<usize>) {
    let base = cover.base();
    let k = base.row(0).len();
    let flat = |occ: Occurrence| occ.pos + occ.side * k;
    let size = base.row(0).len() + base.row(1).len();
    let mut labels = vec![0; size];
    let mut twins = vec![0; size];
    for side in 0..2 {
        for (pos, &label) in base.row(side).iter().enumerate() {
            let occ = Occurrence::new(side, pos);
            labels[flat(occ)] = label;
            twins[flat(occ)] = flat(base.twin(occ));
        }
    }
    (k, labels, twins)
}

/// Estimate the H⁺ Lyapunov exponents of `cover` with `engine`.
///
/// Arguments are checked in this order: the number of vectors (negative is
/// an error, zero returns an empty report right away), the number of
/// experiments and iterations, then the cover encoding and the starting
/// lengths.
pub fn lyapunov_exponents_h_plus<P, E>(
    cover: &PermutationCover<P>,
    engine: &E,
    config: &LyapunovConfig,
) -> CoverResult<LyapunovReport>
where
    P: BasePermutation,
    E: LyapunovEngine + ?Sized,
{
    let n = cover.len();
    let nb_vectors = config.nb_vectors.unwrap_or_else(|| cover.genus());

    if config.verbose {
        tracing::info!(stratum = %cover.stratum(), "Lyapunov exponents of cover");
    }

    if nb_vectors < 0 {
        return Err(CoverError::InvalidArgument(format!(
            "the number of vectors must be positive, got {nb_vectors}"
        )));
    }
    if nb_vectors == 0 {
        return Ok(LyapunovReport::empty());
    }
    if config.nb_experiments <= 0 {
        return Err(CoverError::InvalidArgument(format!(
            "the number of experiments must be positive, got {}",
            config.nb_experiments
        )));
    }
    if config.nb_iterations <= 0 {
        return Err(CoverError::InvalidArgument(format!(
            "the number of iterations must be positive, got {}",
            config.nb_iterations
        )));
    }
    let sigma: Vec<usize> = cover
        .monodromy()
        .iter()
        .flat_map(|p| p.images().iter().copied())
        .collect();
    if n == 0 || sigma.len() % n != 0 {
        return Err(CoverError::InvalidArgument(
            "a sheet permutation is needed for each interval".to_string(),
        ));
    }
    if let Some(lengths) = &config.lengths {
        if lengths.len() != n {
            return Err(CoverError::InvalidArgument(format!(
                "{} starting lengths given for {n} intervals",
                lengths.len()
            )));
        }
        if let Some(x) = lengths.iter().find(|x| !x.is_finite() || **x <= 0.0) {
            return Err(CoverError::InvalidArgument(format!(
                "starting lengths must be positive, got {x}"
            )));
        }
    }

    let (k, labels, twins) = encode(cover);

    let (dimensions, projections) = if config.isotypic_decomposition {
        if config.verbose {
            tracing::info!("looking for isotypic decomposition");
        }
        let s = cover.degree() * n;
        let n_chars = cover.n_characters()?;
        let mut dimensions = Vec::with_capacity(n_chars);
        let mut projections = vec![0.0; s * s * n_chars];
        for i in 0..n_chars {
            dimensions.push(cover.isotypic_dimension(i)?);
            let m = cover.isotypic_projection_matrix(i)?;
            let block = &mut projections[i * s * s..(i + 1) * s * s];
            for r in 0..s {
                for c in 0..s {
                    let entry = m.get(c, r);
                    if !entry.is_zero() {
                        block[r * s + c] = entry.real_part();
                    }
                }
            }
        }
        tracing::debug!(?dimensions, "isotypic dimensions");
        (dimensions, Some(projections))
    } else {
        (vec![nb_vectors as usize], None)
    };

    let input = EngineInput {
        labels,
        n_intervals: k,
        twins,
        sigma,
        degree: cover.degree(),
        nb_experiments: config.nb_experiments as usize,
        nb_iterations: config.nb_iterations as u64,
        dimensions,
        projections,
        lengths: config.lengths.clone(),
        verbose: config.verbose,
    };

    if config.verbose {
        tracing::info!("computing Lyapunov exponents");
    }
    let t0 = Instant::now();
    let samples = engine.lyapunov_exponents_h_plus_cover(&input)?;
    let elapsed = t0.elapsed();

    if samples.len() < input.n_slots() || samples.iter().any(Vec::is_empty) {
        return Err(CoverError::Engine(format!(
            "engine returned {} sample vectors, expected {} non-empty ones",
            samples.len(),
            input.n_slots()
        )));
    }

    let speed = Estimate::from_samples(&samples[0]);
    if config.verbose {
        tracing::info!(
            experiments = config.nb_experiments,
            iterations = config.nb_iterations,
            log2_iterations = (config.nb_iterations as f64).log2().floor() as i64,
            elapsed = ?elapsed,
            "sample of experiments"
        );
        log_estimate("Lexp Rauzy-Zorich", &speed);
    }

    let exponents = if config.isotypic_decomposition {
        let table = cover.real_characters()?;
        let mut slot = 1;
        let mut blocks = Vec::with_capacity(input.dimensions.len());
        for (i, &dim) in input.dimensions.iter().enumerate() {
            if config.verbose {
                tracing::info!(character = i, dimension = dim, "isotypic component");
            }
            let estimates: Vec<Estimate> = samples[slot..slot + dim]
                .iter()
                .map(|s| Estimate::from_samples(s))
                .collect();
            if config.verbose {
                for (j, e) in estimates.iter().enumerate() {
                    log_estimate(&format!("theta{}", slot + j), e);
                }
            }
            blocks.push(IsotypicExponents {
                exponents: estimates.iter().map(|e| e.mean).collect(),
                estimates,
                character: config
                    .return_char
                    .then(|| table.characters()[i].clone()),
            });
            slot += dim;
        }
        Exponents::Isotypic(blocks)
    } else {
        let exps = (1..=nb_vectors as usize)
            .map(|i| {
                let e = Estimate::from_samples(&samples[i]);
                if config.verbose {
                    log_estimate(&format!("theta{i}"), &e);
                }
                e.mean
            })
            .collect();
        Exponents::Flat(exps)
    };

    Ok(LyapunovReport {
        speed: config.return_speed.then_some(speed.mean),
        exponents,
    })
}

fn log_estimate(name: &str, e: &Estimate) {
    tracing::info!(
        "{name}: {:.6} (std. dev. = {:.6}, conf. rad. 0.01 = {:.6})",
        e.mean,
        e.std_dev,
        e.confidence_radius()
    );
}

impl<P: BasePermutation> PermutationCover<P> {
    /// See [`lyapunov_exponents_h_plus`].
    pub fn lyapunov_exponents_h_plus<E: LyapunovEngine + ?Sized>(
        &self,
        engine: &E,
        config: &LyapunovConfig,
    ) -> CoverResult<LyapunovReport> {
        lyapunov_exponents_h_plus(self, engine, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyapunov::SyntheticEngine;
    use crate::permutation::{LabelledPermutation, Permutation};
    use approx::assert_abs_diff_eq;
    use parking_lot::Mutex;

    /// Engine recording what it was given.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Option<EngineInput>>,
    }

    impl LyapunovEngine for Recorder {
        fn lyapunov_exponents_h_plus_cover(&self, input: &EngineInput) -> CoverResult<Vec<Vec<f64>>> {
            *self.seen.lock() = Some(input.clone());
            Ok(vec![vec![1.0; input.nb_experiments]; input.n_slots()])
        }
    }

    struct Failing;

    impl LyapunovEngine for Failing {
        fn lyapunov_exponents_h_plus_cover(&self, _: &EngineInput) -> CoverResult<Vec<Vec<f64>>> {
            Err(CoverError::Engine("diverged".to_string()))
        }
    }

    fn cyclic_cover(n: usize) -> PermutationCover {
        let base = LabelledPermutation::generalized("c a a", "b b c").unwrap();
        PermutationCover::new(
            base,
            n,
            vec![
                Permutation::rotation(n, 2),
                Permutation::rotation(n, 1),
                Permutation::rotation(n, 1),
            ],
        )
        .unwrap()
    }

    fn genus_one_cover() -> PermutationCover {
        LabelledPermutation::generalized("e a a", "b b c c d d e")
            .unwrap()
            .cover(&["()", "(1,2)", "()", "(1,2)", "(1,2)"])
            .unwrap()
    }

    #[test]
    fn test_validation_order() {
        let c = genus_one_cover();
        let engine = Recorder::default();

        let config = LyapunovConfig {
            nb_vectors: Some(-1),
            nb_experiments: 0,
            ..Default::default()
        };
        assert!(matches!(
            c.lyapunov_exponents_h_plus(&engine, &config),
            Err(CoverError::InvalidArgument(_))
        ));

        // zero vectors wins over a bad experiment count
        let config = LyapunovConfig {
            nb_vectors: Some(0),
            nb_experiments: 0,
            ..Default::default()
        };
        let report = c.lyapunov_exponents_h_plus(&engine, &config).unwrap();
        assert_eq!(report.exponents, Exponents::Flat(vec![]));
        assert!(engine.seen.lock().is_none());

        for config in [
            LyapunovConfig {
                nb_experiments: 0,
                ..Default::default()
            },
            LyapunovConfig {
                nb_iterations: -5,
                ..Default::default()
            },
            LyapunovConfig {
                lengths: Some(vec![1.0; 4]),
                ..Default::default()
            },
            LyapunovConfig {
                lengths: Some(vec![1.0, 1.0, f64::NAN, 1.0, 1.0]),
                ..Default::default()
            },
        ] {
            assert!(matches!(
                c.lyapunov_exponents_h_plus(&engine, &config),
                Err(CoverError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_encoding_handed_to_engine() {
        let c = LyapunovConfig::default();
        let cover = cyclic_cover(3);
        let engine = Recorder::default();
        cover.lyapunov_exponents_h_plus(&engine, &c).unwrap();
        let input = engine.seen.lock().clone().unwrap();

        // c a a / b b c with alphabet c, a, b
        assert_eq!(input.n_intervals, 3);
        assert_eq!(input.labels, vec![0, 1, 1, 2, 2, 0]);
        assert_eq!(input.twins, vec![5, 2, 1, 4, 3, 0]);
        assert_eq!(input.sigma, vec![2, 0, 1, 1, 2, 0, 1, 2, 0]);
        assert_eq!(input.degree, 3);
        assert_eq!(input.dimensions, vec![2]);
        assert!(input.projections.is_none());
        assert_eq!(input.nb_iterations, 32768);
        assert!(input.check().is_ok());
    }

    #[test]
    fn test_flat_exponents_default_to_genus() {
        let cover = genus_one_cover();
        let engine = SyntheticEngine::new(1.5, vec![0.66, 0.1]).with_noise(0.0);
        let config = LyapunovConfig {
            return_speed: true,
            ..Default::default()
        };
        let report = cover.lyapunov_exponents_h_plus(&engine, &config).unwrap();
        assert_eq!(report.speed, Some(1.5));
        let Exponents::Flat(exps) = &report.exponents else {
            panic!("expected flat exponents");
        };
        assert_eq!(exps.len(), 1);
        assert_abs_diff_eq!(exps[0], 0.66, epsilon = 1e-12);
    }

    #[test]
    fn test_isotypic_blocks() {
        let cover = cyclic_cover(5);
        let engine = SyntheticEngine::new(1.0, vec![0.4, 0.4, 0.0, 0.0])
            .with_noise(0.001)
            .with_seed(7);
        let config = LyapunovConfig {
            isotypic_decomposition: true,
            return_char: true,
            nb_experiments: 50,
            ..Default::default()
        };
        let report = cover.lyapunov_exponents_h_plus(&engine, &config).unwrap();
        assert!(report.speed.is_none());
        let Exponents::Isotypic(blocks) = &report.exponents else {
            panic!("expected isotypic exponents");
        };
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].exponents.is_empty());
        assert_eq!(blocks[1].exponents.len(), 2);
        assert_eq!(blocks[2].exponents.len(), 2);
        for (x, expected) in report.exponents.flattened().iter().zip([0.4, 0.4, 0.0, 0.0]) {
            assert_abs_diff_eq!(*x, expected, epsilon = 0.01);
        }
        let trivial = blocks[0].character.as_ref().unwrap();
        assert_eq!(trivial.dimension(), 1);
        assert!(blocks[1].character.as_ref().unwrap().is_paired());
    }

    #[test]
    fn test_projections_handed_to_engine() {
        let cover = cyclic_cover(3);
        let engine = Recorder::default();
        let config = LyapunovConfig {
            isotypic_decomposition: true,
            ..Default::default()
        };
        cover.lyapunov_exponents_h_plus(&engine, &config).unwrap();
        let input = engine.seen.lock().clone().unwrap();
        assert_eq!(input.dimensions, vec![0, 2]);
        let proj = input.projections.unwrap();
        let s = 9;
        assert_eq!(proj.len(), 2 * s * s);
        // trivial block: 1/3 on every (d, a) -> (d', a)
        assert_abs_diff_eq!(proj[0], 1.0 / 3.0, epsilon = 1e-12);
        // the two blocks add up to the identity
        for r in 0..s {
            for c in 0..s {
                let sum = proj[r * s + c] + proj[s * s + r * s + c];
                assert_abs_diff_eq!(sum, if r == c { 1.0 } else { 0.0 }, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_engine_errors_propagate() {
        let cover = genus_one_cover();
        assert!(matches!(
            cover.lyapunov_exponents_h_plus(&Failing, &LyapunovConfig::default()),
            Err(CoverError::Engine(_))
        ));
    }

    #[test]
    fn test_short_engine_answer_is_an_error() {
        struct Short;
        impl LyapunovEngine for Short {
            fn lyapunov_exponents_h_plus_cover(&self, _: &EngineInput) -> CoverResult<Vec<Vec<f64>>> {
                Ok(vec![vec![1.0]])
            }
        }
        let cover = genus_one_cover();
        assert!(matches!(
            cover.lyapunov_exponents_h_plus(&Short, &LyapunovConfig::default()),
            Err(CoverError::Engine(_))
        ));
    }
}
