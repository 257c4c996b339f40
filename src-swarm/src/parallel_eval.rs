//! Batch evaluation of a single-point objective over the whole population

use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// Parallel evaluation settings
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
	/// Evaluate rows on the rayon pool
	pub enabled: bool,
	/// Size of the global rayon pool; `None` uses all cores
	pub num_threads: Option<usize>,
}

impl ParallelConfig {
	/// Configure the global rayon pool once; later calls keep the first pool
	pub(crate) fn install(&self) {
		if let Some(n) = self.num_threads {
			let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
		}
	}
}

/// Evaluate `func` on every row of `population`, returning values in row order
pub fn evaluate_population_parallel<F>(
	population: &Array2<f64>,
	func: &F,
	config: &ParallelConfig,
) -> Array1<f64>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let npop = population.nrows();
	if config.enabled {
		let values: Vec<f64> =
			(0..npop).into_par_iter().map(|i| func(&population.row(i).to_owned())).collect();
		Array1::from(values)
	} else {
		population.rows().into_iter().map(|row| func(&row.to_owned())).collect()
	}
}
