use std::fmt;

use crate::Particle;

/// Information passed to the callback once per iteration, after the global
/// best and inertia weight are known and before particles move
pub struct PsoIntermediate<'a> {
	/// Zero-based iteration index
	pub iter: usize,
	/// Global best at this iteration
	pub best: &'a Particle,
	pub inertia_weight: f64,
	/// Population as evaluated in this iteration
	pub particles: &'a [Particle],
}

/// Action returned by callback
pub enum CallbackAction {
	Continue,
	Stop,
}

pub type PsoCallback = Box<dyn FnMut(&PsoIntermediate<'_>) -> CallbackAction>;

/// Configuration for the particle swarm
pub struct PsoConfig {
	pub num_particles: usize,
	/// C1, pull towards the particle's own best
	pub cognitive_weight: f64,
	/// C2, pull towards the swarm's best
	pub social_weight: f64,
	/// Inertia schedule start (dominates early iterations)
	pub omega1: f64,
	/// Inertia schedule limit for late iterations
	pub omega2: f64,
	/// RNG seed; `None` draws one from entropy and logs it
	pub seed: Option<u64>,
	/// Optional per-iteration callback (may stop early)
	pub callback: Option<PsoCallback>,
}

impl Default for PsoConfig {
	fn default() -> Self {
		Self {
			num_particles: 30,
			cognitive_weight: 1.5,
			social_weight: 1.5,
			omega1: 0.9,
			omega2: 0.4,
			seed: None,
			callback: None,
		}
	}
}

impl fmt::Debug for PsoConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PsoConfig")
			.field("num_particles", &self.num_particles)
			.field("cognitive_weight", &self.cognitive_weight)
			.field("social_weight", &self.social_weight)
			.field("omega1", &self.omega1)
			.field("omega2", &self.omega2)
			.field("seed", &self.seed)
			.field("callback", &self.callback.is_some())
			.finish()
	}
}

/// Fluent builder for `PsoConfig`
pub struct PsoConfigBuilder {
	cfg: PsoConfig,
}

impl Default for PsoConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl PsoConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: PsoConfig::default() }
	}
	pub fn num_particles(mut self, v: usize) -> Self {
		self.cfg.num_particles = v;
		self
	}
	pub fn cognitive_weight(mut self, v: f64) -> Self {
		self.cfg.cognitive_weight = v;
		self
	}
	pub fn social_weight(mut self, v: f64) -> Self {
		self.cfg.social_weight = v;
		self
	}
	/// Inertia schedule endpoints
	pub fn inertia(mut self, omega1: f64, omega2: f64) -> Self {
		self.cfg.omega1 = omega1;
		self.cfg.omega2 = omega2;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn callback(mut self, cb: PsoCallback) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn build(self) -> PsoConfig {
		self.cfg
	}
}
