//! A single candidate solution moving through the search space
//!
//! Fitness is maximised. A particle that has never been evaluated carries
//! `None` as its fitness and personal-best fitness; any finite evaluation
//! replaces it.

use std::io::Write;

use ndarray::Array1;

use crate::error::check_dimension;
use crate::{Bound, PsoError, RandomSource};

/// Fraction of a dimension's span a particle may travel in one step
pub const MAX_VELOCITY_FRACTION: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct Particle {
	position: Array1<f64>,
	velocity: Array1<f64>,
	fitness: Option<f64>,
	best_position: Array1<f64>,
	best_fitness: Option<f64>,
}

/// True when `candidate` is strictly better than `incumbent`.
/// `None` (never evaluated) loses against any value, NaN never wins.
fn improves(candidate: Option<f64>, incumbent: Option<f64>) -> bool {
	match (candidate, incumbent) {
		(None, _) => false,
		(Some(c), _) if c.is_nan() => false,
		(Some(_), None) => true,
		(Some(c), Some(i)) => c > i,
	}
}

impl Particle {
	/// Unevaluated particle at the origin with zero velocity, sized to `bounds`
	pub fn new(bounds: &[Bound]) -> Self {
		Self::from_position(Array1::zeros(bounds.len()))
	}

	/// Unevaluated particle at `position` with zero velocity
	pub fn from_position(position: Array1<f64>) -> Self {
		let n = position.len();
		Self {
			best_position: position.clone(),
			position,
			velocity: Array1::zeros(n),
			fitness: None,
			best_fitness: None,
		}
	}

	/// Particle at `position` whose current and personal-best fitness are `fitness`
	pub fn with_fitness(position: Array1<f64>, fitness: f64) -> Self {
		let mut p = Self::from_position(position);
		p.fitness = Some(fitness);
		p.best_fitness = Some(fitness);
		p
	}

	/// Unevaluated particle drawn uniformly inside `bounds`, one draw per dimension
	pub fn random(bounds: &[Bound], rng: &mut RandomSource) -> Self {
		let position = bounds.iter().map(|b| rng.uniform_range(b.min(), b.max())).collect();
		Self::from_position(position)
	}

	pub fn dimension(&self) -> usize {
		self.position.len()
	}

	pub fn position(&self) -> &Array1<f64> {
		&self.position
	}

	pub fn velocity(&self) -> &Array1<f64> {
		&self.velocity
	}

	/// Last evaluated fitness, `None` before the first evaluation
	pub fn fitness(&self) -> Option<f64> {
		self.fitness
	}

	pub fn best_position(&self) -> &Array1<f64> {
		&self.best_position
	}

	pub fn best_fitness(&self) -> Option<f64> {
		self.best_fitness
	}

	/// Detached snapshot of this particle's personal best.
	///
	/// Later moves of `self` do not affect the returned value, which is how the
	/// swarm records its global best.
	pub fn personal_best(&self) -> Particle {
		let mut p = Self::from_position(self.best_position.clone());
		p.fitness = self.best_fitness;
		p.best_fitness = self.best_fitness;
		p
	}

	/// Store a new evaluation; the personal best moves only on strict improvement
	pub fn update_fitness(&mut self, new_fitness: f64) {
		self.fitness = Some(new_fitness);
		if improves(Some(new_fitness), self.best_fitness) {
			self.best_fitness = Some(new_fitness);
			self.best_position.assign(&self.position);
		}
	}

	/// Move one step towards the personal and global bests.
	///
	/// Per dimension: inertia + cognitive + social velocity, a random kick when
	/// the velocity comes out exactly zero, a clamp to
	/// `MAX_VELOCITY_FRACTION * span`, then a hard clamp of the position to the
	/// bound. Velocity is not reflected when the position saturates.
	/// Both vectors are rebuilt before being stored.
	#[allow(clippy::too_many_arguments)]
	pub fn update_position(
		&mut self,
		global_best: &Particle,
		bounds: &[Bound],
		cognitive_weight: f64,
		social_weight: f64,
		rng: &mut RandomSource,
		inertia_weight: f64,
	) -> Result<(), PsoError> {
		let n = self.position.len();
		check_dimension(n, self.velocity.len())?;
		check_dimension(n, self.best_position.len())?;
		check_dimension(n, bounds.len())?;
		check_dimension(n, global_best.dimension())?;

		let mut new_vel = Array1::<f64>::zeros(n);
		let mut new_pos = Array1::<f64>::zeros(n);

		for (i, bound) in bounds.iter().enumerate() {
			let x = self.position[i];
			let mut vel = inertia_weight * self.velocity[i];
			vel += cognitive_weight * rng.uniform() * (self.best_position[i] - x);
			vel += social_weight * rng.uniform() * (global_best.position[i] - x);

			// both attraction terms vanish on the global best
			if vel == 0.0 {
				vel = self.velocity[i] + 2.0 * rng.uniform();
				log::trace!("zero velocity in dimension {}, kicked to {:.6e}", i, vel);
			}

			let max_vel = MAX_VELOCITY_FRACTION * bound.span();
			vel = vel.clamp(-max_vel, max_vel);

			new_vel[i] = vel;
			new_pos[i] = bound.clamp(x + vel);
		}

		self.position = new_pos;
		self.velocity = new_vel;
		Ok(())
	}

	/// Write the coordinates, each followed by a tab
	pub fn record_position<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
		for x in self.position.iter() {
			write!(out, "{}\t", x)?;
		}
		Ok(())
	}
}

/// Particle with the highest personal-best fitness, the first one on ties.
///
/// Particles are not `Ord`; this is the only ordering the swarm uses.
pub fn best_by_personal_best(particles: &[Particle]) -> Option<&Particle> {
	let mut iter = particles.iter();
	let mut best = iter.next()?;
	for p in iter {
		if improves(p.best_fitness, best.best_fitness) {
			best = p;
		}
	}
	Some(best)
}
