//! The swarm controller: evaluate, pick the global best, anneal inertia, move.

use std::fmt;
use std::time::{Duration, Instant};

use ndarray::Array2;

use crate::error::check_dimension;
use crate::particle::best_by_personal_best;
use crate::recorder::TrajectorySink;
use crate::{
	Bound, CallbackAction, FitnessFunction, Particle, PsoConfig, PsoError, PsoIntermediate,
	RandomSource, bounds_from_pairs,
};

/// Inertia weight for zero-based `iteration` of a `max_iterations` run.
///
/// `(omega1 - omega2) * (max_iterations - (iteration + 1)) / (iteration + 1) + omega2`
///
/// This is a hyperbolic decay, not a linear ramp: the first iteration gets
/// roughly `omega1 * (max_iterations - 1)`, and the weight falls towards
/// `omega2`, reaching it exactly on the last iteration.
pub fn inertia_weight(omega1: f64, omega2: f64, iteration: usize, max_iterations: usize) -> f64 {
	let k = (iteration + 1) as f64;
	(omega1 - omega2) * ((max_iterations as f64 - k) / k) + omega2
}

/// Result of a swarm run
#[derive(Clone)]
pub struct PsoReport {
	/// Global best after the last iteration
	pub best: Particle,
	/// Iterations performed
	pub nit: usize,
	/// Fitness evaluations performed
	pub nfev: usize,
	/// Global-best fitness at each iteration
	pub history: Vec<Option<f64>>,
	/// True when the callback ended the run early
	pub stopped_by_callback: bool,
	pub message: String,
}

impl fmt::Debug for PsoReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PsoReport")
			.field("x", &self.best.position().to_vec())
			.field("fitness", &self.best.best_fitness())
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field("history", &format!("len={}", self.history.len()))
			.field("stopped_by_callback", &self.stopped_by_callback)
			.field("message", &self.message)
			.finish()
	}
}

/// Lifecycle of a [`ParticleSwarm`]: a population exists only while running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmState {
	Uninitialized,
	Running,
}

/// Particle swarm optimiser.
///
/// Owns the bounds, the random source and, while running, the population.
/// It is not `Clone`. Every call to [`run`](Self::run) or
/// [`solve`](Self::solve) restarts from a fresh population and reseeds the
/// random source, so repeated runs on one swarm give identical results.
#[derive(Debug)]
pub struct ParticleSwarm {
	bounds: Vec<Bound>,
	config: PsoConfig,
	seed: u64,
	rng: RandomSource,
	particles: Vec<Particle>,
	state: SwarmState,
}

impl ParticleSwarm {
	pub fn new(bounds: Vec<Bound>, config: PsoConfig) -> Result<Self, PsoError> {
		if config.num_particles == 0 {
			return Err(PsoError::InvalidConfiguration("num_particles must be > 0".into()));
		}
		if bounds.is_empty() {
			return Err(PsoError::InvalidConfiguration("bounds must not be empty".into()));
		}
		let rng = match config.seed {
			Some(s) => RandomSource::new(s),
			None => RandomSource::from_entropy(),
		};
		let seed = rng.seed();
		Ok(Self {
			bounds,
			config,
			seed,
			rng,
			particles: Vec::new(),
			state: SwarmState::Uninitialized,
		})
	}

	pub fn dimension(&self) -> usize {
		self.bounds.len()
	}

	pub fn bounds(&self) -> &[Bound] {
		&self.bounds
	}

	pub fn config(&self) -> &PsoConfig {
		&self.config
	}

	/// Mutable access to configuration
	pub fn config_mut(&mut self) -> &mut PsoConfig {
		&mut self.config
	}

	/// Seed actually used, including one drawn from entropy
	pub fn seed(&self) -> u64 {
		self.seed
	}

	pub fn state(&self) -> SwarmState {
		self.state
	}

	/// Run the optimisation and return the final global best
	pub fn run<F>(&mut self, fitness: &mut F, max_iterations: usize) -> Result<Particle, PsoError>
	where
		F: FitnessFunction + ?Sized,
	{
		Ok(self.solve(fitness, max_iterations)?.best)
	}

	/// Run the optimisation and return a report
	pub fn solve<F>(&mut self, fitness: &mut F, max_iterations: usize) -> Result<PsoReport, PsoError>
	where
		F: FitnessFunction + ?Sized,
	{
		self.solve_inner(fitness, max_iterations, None)
	}

	/// Like [`solve`](Self::solve), also streaming every particle position to `sink`
	/// once per iteration, before evaluation
	pub fn solve_with_trajectory<F>(
		&mut self,
		fitness: &mut F,
		max_iterations: usize,
		sink: &mut dyn TrajectorySink,
	) -> Result<PsoReport, PsoError>
	where
		F: FitnessFunction + ?Sized,
	{
		self.solve_inner(fitness, max_iterations, Some(sink))
	}

	fn solve_inner<F>(
		&mut self,
		fitness: &mut F,
		max_iterations: usize,
		sink: Option<&mut dyn TrajectorySink>,
	) -> Result<PsoReport, PsoError>
	where
		F: FitnessFunction + ?Sized,
	{
		if max_iterations == 0 {
			return Err(PsoError::InvalidConfiguration("max_iterations must be > 0".into()));
		}

		self.state = SwarmState::Running;
		let result = self.iterate(fitness, max_iterations, sink);

		// no population survives between runs, including failed ones
		self.particles.clear();
		self.state = SwarmState::Uninitialized;
		result
	}

	fn iterate<F>(
		&mut self,
		fitness: &mut F,
		max_iterations: usize,
		mut sink: Option<&mut dyn TrajectorySink>,
	) -> Result<PsoReport, PsoError>
	where
		F: FitnessFunction + ?Sized,
	{
		let n = self.bounds.len();
		let npop = self.config.num_particles;
		let c1 = self.config.cognitive_weight;
		let c2 = self.config.social_weight;
		let (omega1, omega2) = (self.config.omega1, self.config.omega2);

		// Timing toggle via env var
		let timing_enabled = std::env::var("PSO_TIMING").map(|v| v != "0").unwrap_or(false);

		log::info!(
			"PSO init: {} dimensions, {} particles, maxiter={}, seed={}",
			n,
			npop,
			max_iterations,
			self.seed
		);
		log::info!("  weights: C1={:.3}, C2={:.3}, omega=({:.3}, {:.3})", c1, c2, omega1, omega2);

		self.rng = RandomSource::new(self.seed);
		self.particles = (0..npop).map(|_| Particle::random(&self.bounds, &mut self.rng)).collect();

		if let Some(s) = sink.as_deref_mut() {
			s.begin(n)?;
		}

		let mut population = Array2::<f64>::zeros((npop, n));
		let mut history = Vec::with_capacity(max_iterations);
		let mut global_best = Particle::new(&self.bounds);
		let mut nit = 0;
		let mut nfev = 0;
		let mut stopped_by_callback = false;

		let mut t_eval_tot = Duration::ZERO;
		let mut t_update_tot = Duration::ZERO;

		for iter in 0..max_iterations {
			nit = iter + 1;

			if let Some(s) = sink.as_deref_mut() {
				s.record(iter, &self.particles)?;
			}

			for (mut row, p) in population.rows_mut().into_iter().zip(&self.particles) {
				row.assign(p.position());
			}

			let t_eval0 = Instant::now();
			let fitnesses = fitness.evaluate(&population);
			let t_eval = t_eval0.elapsed();
			check_dimension(npop, fitnesses.len())?;
			nfev += npop;

			for (p, &f) in self.particles.iter_mut().zip(fitnesses.iter()) {
				p.update_fitness(f);
			}

			let best = best_by_personal_best(&self.particles)
				.map(Particle::personal_best)
				.ok_or_else(|| PsoError::InvalidConfiguration("empty population".into()))?;
			history.push(best.best_fitness());

			let inertia = inertia_weight(omega1, omega2, iter, max_iterations);
			log::debug!(
				"PSO iter {:4}  best_f={:?}  inertia={:.4}",
				iter,
				best.best_fitness(),
				inertia
			);

			if let Some(cb) = self.config.callback.as_mut() {
				let intermediate = PsoIntermediate {
					iter,
					best: &best,
					inertia_weight: inertia,
					particles: &self.particles,
				};
				if let CallbackAction::Stop = cb(&intermediate) {
					global_best = best;
					stopped_by_callback = true;
					break;
				}
			}

			let t_update0 = Instant::now();
			for p in self.particles.iter_mut() {
				p.update_position(&best, &self.bounds, c1, c2, &mut self.rng, inertia)?;
			}
			let t_update = t_update0.elapsed();
			global_best = best;

			t_eval_tot += t_eval;
			t_update_tot += t_update;
			if timing_enabled && (iter < 5 || iter % 10 == 0) {
				log::info!(
					"TIMING iter {:4}: eval={:.3} ms, update={:.3} ms",
					iter,
					t_eval.as_secs_f64() * 1e3,
					t_update.as_secs_f64() * 1e3,
				);
			}
		}

		let message = if stopped_by_callback {
			format!("Optimization stopped by callback at iteration {}", nit - 1)
		} else {
			format!("Maximum iterations reached: {}", max_iterations)
		};
		log::info!("PSO finished: {} (best_f={:?})", message, global_best.best_fitness());
		if timing_enabled {
			log::info!(
				"TIMING total: eval={:.3} s, update={:.3} s",
				t_eval_tot.as_secs_f64(),
				t_update_tot.as_secs_f64()
			);
		}

		Ok(PsoReport { best: global_best, nit, nfev, history, stopped_by_callback, message })
	}
}

/// Convenience function mirroring the bounds-as-pairs API:
/// - `fitness`: batch fitness function (maximised)
/// - `bounds`: vector of (lower, upper) pairs
/// - `config`: swarm configuration
pub fn particle_swarm<F>(
	fitness: &mut F,
	bounds: &[(f64, f64)],
	config: PsoConfig,
	max_iterations: usize,
) -> Result<PsoReport, PsoError>
where
	F: FitnessFunction + ?Sized,
{
	let mut swarm = ParticleSwarm::new(bounds_from_pairs(bounds)?, config)?;
	swarm.solve(fitness, max_iterations)
}
