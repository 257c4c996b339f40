//! Seedable random source driving initialisation and velocity updates
//!
//! The stream is fully determined by the seed: two sources built from the same
//! seed produce the same sequence of draws. The source is not `Clone`; use
//! [`RandomSource::derive`] to obtain an independent child stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, StandardNormal};

use crate::PsoError;

#[derive(Debug)]
pub struct RandomSource {
	seed: u64,
	rng: StdRng,
}

impl RandomSource {
	pub fn new(seed: u64) -> Self {
		Self { seed, rng: StdRng::seed_from_u64(seed) }
	}

	/// Seed from the thread rng; the chosen seed is kept so the run can be replayed
	pub fn from_entropy() -> Self {
		let mut thread_rng = rand::rng();
		Self::new(thread_rng.random::<u64>())
	}

	pub fn seed(&self) -> u64 {
		self.seed
	}

	/// Uniform draw in [0, 1)
	pub fn uniform(&mut self) -> f64 {
		self.rng.random::<f64>()
	}

	/// Uniform draw in [lo, hi)
	pub fn uniform_range(&mut self, lo: f64, hi: f64) -> f64 {
		let u = self.uniform();
		lo + u * (hi - lo)
	}

	/// Normal draw with mean 0 and standard deviation `sigma`
	pub fn gaussian(&mut self, sigma: f64) -> f64 {
		let z: f64 = StandardNormal.sample(&mut self.rng);
		z * sigma
	}

	/// Beta(alpha, beta) draw in (0, 1)
	pub fn beta(&mut self, alpha: f64, beta: f64) -> Result<f64, PsoError> {
		let dist = Beta::new(alpha, beta).map_err(|e| {
			PsoError::InvalidConfiguration(format!("beta({}, {}): {}", alpha, beta, e))
		})?;
		Ok(dist.sample(&mut self.rng))
	}

	/// Independent source whose seed is drawn from this one
	pub fn derive(&mut self) -> RandomSource {
		let seed = self.rng.random::<u64>();
		RandomSource::new(seed)
	}
}
