//! Maximum-likelihood estimation of an unknown Gaussian mean
//!
//! Data are drawn once from N(mean, std) with a fixed seed. The objective for
//! a candidate mean `m` is the log-likelihood of the data, which is maximised
//! at the sample mean. Sufficient statistics are computed at construction so
//! evaluating a whole population costs O(population), not O(population * data).

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

/// Number of samples drawn by [`GaussianLikelihood::new`]
pub const NUM_DATA_POINTS: usize = 1000;

#[derive(Debug, Clone)]
pub struct GaussianLikelihood {
    std: f64,
    data: Vec<f64>,
    sum: f64,
    sum_sq: f64,
}

impl GaussianLikelihood {
    /// Draw [`NUM_DATA_POINTS`] samples from N(mean, std)
    pub fn new(mean: f64, std: f64, seed: u64) -> Self {
        Self::with_samples(mean, std, NUM_DATA_POINTS, seed)
    }

    pub fn with_samples(mean: f64, std: f64, n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let data: Vec<f64> = (0..n)
            .map(|_| {
                let z: f64 = StandardNormal.sample(&mut rng);
                mean + std * z
            })
            .collect();
        let sum = data.iter().sum();
        let sum_sq = data.iter().map(|d| d * d).sum();
        Self { std, data, sum, sum_sq }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn sample_mean(&self) -> f64 {
        self.sum / self.data.len() as f64
    }

    /// Sum over the data of log N(d_i; mean, std)
    pub fn log_likelihood(&self, mean: f64) -> f64 {
        let n = self.data.len() as f64;
        let var = self.std * self.std;
        // sum (d_i - m)^2 from the cached sums
        let sq_dev = self.sum_sq - 2.0 * mean * self.sum + n * mean * mean;
        -0.5 * n * (2.0 * PI * var).ln() - sq_dev / (2.0 * var)
    }

    /// Log-likelihood of the first coordinate of `x`
    pub fn evaluate_point(&self, x: &Array1<f64>) -> f64 {
        self.log_likelihood(x[0])
    }

    /// Log-likelihood of the first column of every row
    pub fn evaluate_batch(&self, positions: &Array2<f64>) -> Array1<f64> {
        positions.column(0).mapv(|m| self.log_likelihood(m))
    }
}
