//! Lyapunov exponents of covers
//!
//! The renormalization itself is delegated to a [`LyapunovEngine`]; this
//! module prepares its input, including the isotypic projectors of the
//! deck group, and turns the raw samples into estimates.
//!
//! - `config.rs`: run parameters, loadable from JSON
//! - `engine.rs`: the engine seam and its flat input tables
//! - `orchestrator.rs`: validation, encoding, aggregation
//! - `stats.rs`: means, deviations and confidence radii
//! - `synthetic.rs`: a seeded Gaussian engine for demos and tests

mod config;
mod engine;
mod orchestrator;
mod stats;
mod synthetic;

pub use config::LyapunovConfig;
pub use engine::{EngineInput, LyapunovEngine};
pub use orchestrator::{lyapunov_exponents_h_plus, Exponents, IsotypicExponents, LyapunovReport};
pub use stats::{mean_and_std_dev, Estimate, Z_99};
pub use synthetic::SyntheticEngine;
