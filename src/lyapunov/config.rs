//! Run parameters for the Lyapunov exponent estimation.

use serde::{Deserialize, Serialize};

use crate::error::{CoverError, CoverResult};

/// Parameters of a Lyapunov exponent run.
///
/// Counts are signed so that nonsense values coming from a configuration
/// file are reported instead of wrapping around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LyapunovConfig {
    /// Number of exponents to compute. Default: the genus of the cover.
    pub nb_vectors: Option<i64>,

    /// Number of independent experiments. Default: 100.
    pub nb_experiments: i64,

    /// Rauzy–Zorich steps per experiment. Default: 2^15 = 32768.
    pub nb_iterations: i64,

    /// Starting lengths, one per interval. Default: random.
    pub lengths: Option<Vec<f64>>,

    /// Also return the mean speed of the renormalization.
    pub return_speed: bool,

    /// Split the exponents along the isotypic components of the deck
    /// group action.
    pub isotypic_decomposition: bool,

    /// Attach the real character to each isotypic block. Ignored without
    /// isotypic decomposition.
    pub return_char: bool,

    /// Log stratum, timings and confidence intervals at info level.
    pub verbose: bool,
}

impl Default for LyapunovConfig {
    fn default() -> Self {
        Self {
            nb_vectors: None,
            nb_experiments: 100,
            nb_iterations: 32768,
            lengths: None,
            return_speed: false,
            isotypic_decomposition: false,
            return_char: false,
            verbose: false,
        }
    }
}

impl LyapunovConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> CoverResult<()> {
        if let Some(k) = self.nb_vectors {
            if k < 0 {
                return Err(CoverError::Config(format!(
                    "nb_vectors must be >= 0, got {k}"
                )));
            }
        }
        if self.nb_experiments <= 0 {
            return Err(CoverError::Config(format!(
                "nb_experiments must be > 0, got {}",
                self.nb_experiments
            )));
        }
        if self.nb_iterations <= 0 {
            return Err(CoverError::Config(format!(
                "nb_iterations must be > 0, got {}",
                self.nb_iterations
            )));
        }
        if let Some(lengths) = &self.lengths {
            if let Some(x) = lengths.iter().find(|x| !x.is_finite() || **x <= 0.0) {
                return Err(CoverError::Config(format!(
                    "lengths must be positive and finite, got {x}"
                )));
            }
        }
        Ok(())
    }

    /// Load from a JSON string; missing fields take their default.
    pub fn from_json(json: &str) -> CoverResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CoverError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
