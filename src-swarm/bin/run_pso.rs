use clap::{Parser, ValueEnum};
use ndarray::{Array1, Array2};
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use pso_env::get_records_dir;
use pso_swarm::{
	FitnessFunction, OptimizationRecorder, ParallelConfig, ParticleSwarm, PointwiseFitness,
	PsoConfigBuilder, PsoError, PsoReport, TsvTrajectoryWriter, bounds_from_pairs,
};
use pso_testfunctions::{GaussianLikelihood, get_function_bounds_vec, shifted_ackley_2d, sphere};

const ACKLEY_CENTER: [f64; 2] = [4.0, 6.8];
const GAUSSIAN_TRUE_MEAN: f64 = 0.0;
const GAUSSIAN_TRUE_STD: f64 = 1.0;
const GAUSSIAN_DATA_SEED: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Benchmark {
	/// Two-dimensional shifted Ackley, optimum at (4.0, 6.8)
	Ackley,
	/// One-dimensional Gaussian with unknown mean
	Gaussian,
	/// Two-dimensional sphere, optimum at the origin
	Sphere,
}

impl Benchmark {
	fn label(self) -> &'static str {
		match self {
			Benchmark::Ackley => "ackley",
			Benchmark::Gaussian => "gaussian_1d",
			Benchmark::Sphere => "sphere",
		}
	}
}

/// Run the particle swarm on a benchmark and write its trajectory
#[derive(Parser, Debug)]
#[command(name = "run_pso")]
#[command(about = "Run particle swarm optimisation on a benchmark and record the trajectory")]
struct Args {
	/// Number of particles
	num_particles: usize,

	/// Number of iterations
	max_iterations: usize,

	/// Prefix for the trajectory and summary files
	output_prefix: String,

	/// Benchmark to optimise
	#[arg(short, long, value_enum, default_value_t = Benchmark::Ackley)]
	function: Benchmark,

	/// Swarm seed
	#[arg(short, long, default_value_t = 0)]
	seed: u64,

	/// Cognitive weight
	#[arg(long, default_value_t = 1.5)]
	c1: f64,

	/// Social weight
	#[arg(long, default_value_t = 1.5)]
	c2: f64,

	/// Inertia numerator weight
	#[arg(long, default_value_t = 0.9)]
	omega1: f64,

	/// Final inertia weight
	#[arg(long, default_value_t = 0.4)]
	omega2: f64,

	/// Evaluate particles on the rayon thread pool
	#[arg(long)]
	parallel: bool,

	/// Directory for the per-iteration CSV (defaults to $PSO_DIR/data_generated/records)
	#[arg(long)]
	records_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
	function: String,
	num_particles: usize,
	max_iterations: usize,
	seed: u64,
	c1: f64,
	c2: f64,
	omega1: f64,
	omega2: f64,
	true_optimum: Vec<f64>,
	best_position: Vec<f64>,
	best_fitness: Option<f64>,
	nit: usize,
	nfev: usize,
	message: String,
	trajectory_file: String,
	records_file: String,
}

struct RunOutput {
	report: PsoReport,
	records_file: String,
}

/// Output files are created only once the swarm has accepted the arguments
fn run_benchmark<F>(
	args: &Args,
	fitness: &mut F,
	bounds: &[(f64, f64)],
	trajectory_file: &str,
	records_dir: &Path,
) -> Result<RunOutput, Box<dyn Error>>
where
	F: FitnessFunction + ?Sized,
{
	let recorder = OptimizationRecorder::new(args.function.label().to_string());
	let config = PsoConfigBuilder::new()
		.num_particles(args.num_particles)
		.cognitive_weight(args.c1)
		.social_weight(args.c2)
		.inertia(args.omega1, args.omega2)
		.seed(args.seed)
		.callback(recorder.create_callback())
		.build();

	let mut swarm = ParticleSwarm::new(bounds_from_pairs(bounds)?, config)?;
	if args.max_iterations == 0 {
		return Err(PsoError::InvalidConfiguration("max_iterations must be > 0".into()).into());
	}

	let mut trajectory = TsvTrajectoryWriter::create(trajectory_file)?;
	let report = swarm.solve_with_trajectory(fitness, args.max_iterations, &mut trajectory)?;
	trajectory.finish()?;
	let records_file = recorder.save_to_csv(records_dir)?;
	Ok(RunOutput { report, records_file })
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();
	let args = Args::parse();

	let parallel = ParallelConfig { enabled: args.parallel, num_threads: None };
	let records_dir = match &args.records_dir {
		Some(dir) => dir.clone(),
		None => get_records_dir()?,
	};

	let label = args.function.label();
	let trajectory_file = format!("{}_{}.part", args.output_prefix, label);

	println!("\nEvaluating: {}", label);

	let (output, true_optimum) = match args.function {
		Benchmark::Ackley => {
			let bounds = vec![(-10.0, 10.0); 2];
			let mut fitness = PointwiseFitness::minimize(|x: &Array1<f64>| {
				shifted_ackley_2d(x, ACKLEY_CENTER)
			})
			.parallel(parallel);
			let output = run_benchmark(&args, &mut fitness, &bounds, &trajectory_file, &records_dir)?;
			(output, ACKLEY_CENTER.to_vec())
		}
		Benchmark::Gaussian => {
			let likelihood =
				GaussianLikelihood::new(GAUSSIAN_TRUE_MEAN, GAUSSIAN_TRUE_STD, GAUSSIAN_DATA_SEED);
			let mut fitness = |positions: &Array2<f64>| likelihood.evaluate_batch(positions);
			let output = run_benchmark(
				&args,
				&mut fitness,
				&[(-100.0, 100.0)],
				&trajectory_file,
				&records_dir,
			)?;
			println!("Standard sample mean = {}", likelihood.sample_mean());
			(output, vec![GAUSSIAN_TRUE_MEAN])
		}
		Benchmark::Sphere => {
			let bounds = get_function_bounds_vec("sphere", (-5.12, 5.12), 2);
			let mut fitness = PointwiseFitness::minimize(sphere).parallel(parallel);
			let output = run_benchmark(&args, &mut fitness, &bounds, &trajectory_file, &records_dir)?;
			(output, vec![0.0; 2])
		}
	};

	let report = output.report;
	let best_position = report.best.position().to_vec();
	println!("True optimum:  {:?}", true_optimum);
	println!("PSO best:      {:?}", best_position);
	println!("Best fitness:  {:?}", report.best.best_fitness());
	println!("{}", report.message);
	println!("Trajectory written to {}", trajectory_file);
	println!("Records written to {}", output.records_file);

	let summary = RunSummary {
		function: label.to_string(),
		num_particles: args.num_particles,
		max_iterations: args.max_iterations,
		seed: args.seed,
		c1: args.c1,
		c2: args.c2,
		omega1: args.omega1,
		omega2: args.omega2,
		true_optimum,
		best_position,
		best_fitness: report.best.best_fitness(),
		nit: report.nit,
		nfev: report.nfev,
		message: report.message,
		trajectory_file,
		records_file: output.records_file,
	};
	let summary_file = format!("{}_{}.json", args.output_prefix, label);
	serde_json::to_writer_pretty(BufWriter::new(File::create(&summary_file)?), &summary)?;
	println!("Summary written to {}", summary_file);

	Ok(())
}
