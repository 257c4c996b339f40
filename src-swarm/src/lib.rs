//! Particle Swarm Optimization (PSO) over box-bounded continuous spaces
//!
//! A population of particles is moved through the search space to **maximise**
//! a fitness function supplied by the caller. Each iteration:
//!
//! 1. the whole population is evaluated in one batch call,
//! 2. every particle updates its personal best (strict improvement only),
//! 3. the global best is taken as the best personal best, first on ties,
//! 4. the inertia weight is annealed on a hyperbolic schedule,
//! 5. every particle updates its velocity and position.
//!
//! Supported features:
//! - Box constraints, hard-clamped, with velocity limited to 1% of each span
//! - Seeded, reproducible runs; entropy seeding with the seed reported back
//! - Per-iteration callback that may stop the run early
//! - Optional rayon evaluation of single-point objectives
//! - Trajectory (`.part`) and global-best (CSV) recording
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use pso_swarm::{PointwiseFitness, PsoConfigBuilder, particle_swarm};
//!
//! let mut fitness = PointwiseFitness::minimize(|x: &Array1<f64>| x.dot(x));
//! let config = PsoConfigBuilder::new().num_particles(20).seed(0).build();
//! let report = particle_swarm(&mut fitness, &[(-5.0, 5.0), (-5.0, 5.0)], config, 200).unwrap();
//! assert!(report.best.best_fitness().unwrap() > -1e-2);
//! ```

pub mod bound;
pub mod config;
pub mod error;
pub mod fitness;
pub mod parallel_eval;
pub mod particle;
pub mod recorder;
pub mod rng;
pub mod run_recorded;
pub mod swarm;

pub use bound::{Bound, bounds_from_pairs};
pub use config::{CallbackAction, PsoCallback, PsoConfig, PsoConfigBuilder, PsoIntermediate};
pub use error::PsoError;
pub use fitness::{FitnessFunction, PointwiseFitness};
pub use parallel_eval::ParallelConfig;
pub use particle::{MAX_VELOCITY_FRACTION, Particle, best_by_personal_best};
pub use recorder::{
	OptimizationRecord, OptimizationRecorder, TrajectoryBuffer, TrajectorySink, TsvTrajectoryWriter,
};
pub use rng::RandomSource;
pub use run_recorded::run_recorded_particle_swarm;
pub use swarm::{ParticleSwarm, PsoReport, SwarmState, inertia_weight, particle_swarm};
