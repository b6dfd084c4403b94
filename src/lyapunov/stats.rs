//! Sample statistics for Monte-Carlo exponents

/// Two-sided 99% quantile of the standard normal distribution.
pub const Z_99: f64 = 2.576;

/// Mean and sample standard deviation (`n − 1` normalisation).
pub fn mean_and_std_dev(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0).max(1.0);
    (mean, variance.sqrt())
}

/// Estimate of one exponent over a batch of experiments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub mean: f64,
    pub std_dev: f64,
    pub n_samples: usize,
}

impl Estimate {
    pub fn from_samples(samples: &[f64]) -> Self {
        let (mean, std_dev) = mean_and_std_dev(samples);
        Self {
            mean,
            std_dev,
            n_samples: samples.len(),
        }
    }

    /// Radius of the 99% confidence interval around the mean.
    pub fn confidence_radius(&self) -> f64 {
        if self.n_samples == 0 {
            return f64::INFINITY;
        }
        Z_99 * self.std_dev / (self.n_samples as f64).sqrt()
    }
}
