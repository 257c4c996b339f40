use std::path::Path;

use crate::{FitnessFunction, OptimizationRecorder, PsoConfig, PsoError, PsoReport, particle_swarm};

/// Helper function for running the swarm with recording.
///
/// Any callback already present in `config` is replaced by the recorder's.
/// The per-iteration global best is saved to `<output_dir>/<function_name>.csv`.
pub fn run_recorded_particle_swarm<F, P>(
	function_name: &str,
	fitness: &mut F,
	bounds: &[(f64, f64)],
	mut config: PsoConfig,
	max_iterations: usize,
	output_dir: P,
) -> Result<(PsoReport, String), PsoError>
where
	F: FitnessFunction + ?Sized,
	P: AsRef<Path>,
{
	// Create the recorder
	let recorder = OptimizationRecorder::new(function_name.to_string());

	// Set up the callback to record progress
	config.callback = Some(recorder.create_callback());

	// Run the optimization
	let result = particle_swarm(fitness, bounds, config, max_iterations)?;

	// Save the recording to CSV
	let csv_path = recorder.save_to_csv(output_dir)?;

	Ok((result, csv_path))
}
