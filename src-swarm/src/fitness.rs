//! Fitness function contract: one batch call per iteration
//!
//! The swarm hands over every particle position at once (row `i` is particle
//! `i`) and expects one value per row, in the same order. Higher is fitter.

use ndarray::{Array1, Array2};

use crate::parallel_eval::{ParallelConfig, evaluate_population_parallel};

pub trait FitnessFunction {
	/// Fitness of each row of `positions`
	fn evaluate(&mut self, positions: &Array2<f64>) -> Array1<f64>;
}

impl<F> FitnessFunction for F
where
	F: FnMut(&Array2<f64>) -> Array1<f64>,
{
	fn evaluate(&mut self, positions: &Array2<f64>) -> Array1<f64> {
		self(positions)
	}
}

/// Lifts a single-point objective into a batch [`FitnessFunction`]
pub struct PointwiseFitness<F> {
	func: F,
	sign: f64,
	parallel: ParallelConfig,
}

impl<F> PointwiseFitness<F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	/// Use `func` as is: larger values are better
	pub fn maximize(func: F) -> Self {
		Self { func, sign: 1.0, parallel: ParallelConfig::default() }
	}

	/// Use a minimisation objective by negating it
	pub fn minimize(func: F) -> Self {
		Self { func, sign: -1.0, parallel: ParallelConfig::default() }
	}

	pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
		parallel.install();
		self.parallel = parallel;
		self
	}
}

impl<F> FitnessFunction for PointwiseFitness<F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	fn evaluate(&mut self, positions: &Array2<f64>) -> Array1<f64> {
		let sign = self.sign;
		let func = &self.func;
		let signed = move |x: &Array1<f64>| sign * func(x);
		evaluate_population_parallel(positions, &signed, &self.parallel)
	}
}
