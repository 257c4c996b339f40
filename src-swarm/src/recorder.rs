use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use ndarray::Array2;

use crate::{CallbackAction, Particle, PsoError, PsoIntermediate};

/// Receives every particle position once per iteration, for diagnostics and plotting
pub trait TrajectorySink {
	/// Called once before the first iteration
	fn begin(&mut self, dimension: usize) -> Result<(), PsoError>;
	/// Called at the start of each iteration with the positions about to be evaluated
	fn record(&mut self, iteration: usize, particles: &[Particle]) -> Result<(), PsoError>;
}

/// Writes trajectories in the `.part` text format: the dimension on the first
/// line, then one line per iteration with all particle coordinates, tab separated
pub struct TsvTrajectoryWriter<W: Write> {
	out: W,
}

impl<W: Write> TsvTrajectoryWriter<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	/// Flush and hand back the underlying writer
	pub fn finish(mut self) -> Result<W, PsoError> {
		self.out.flush()?;
		Ok(self.out)
	}
}

impl TsvTrajectoryWriter<BufWriter<File>> {
	pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, PsoError> {
		Ok(Self::new(BufWriter::new(File::create(path)?)))
	}
}

impl<W: Write> TrajectorySink for TsvTrajectoryWriter<W> {
	fn begin(&mut self, dimension: usize) -> Result<(), PsoError> {
		writeln!(self.out, "{}", dimension)?;
		Ok(())
	}

	fn record(&mut self, _iteration: usize, particles: &[Particle]) -> Result<(), PsoError> {
		for p in particles {
			p.record_position(&mut self.out)?;
		}
		writeln!(self.out)?;
		Ok(())
	}
}

/// Keeps every frame in memory, one `particles x dimension` matrix per iteration
#[derive(Debug, Default)]
pub struct TrajectoryBuffer {
	pub dimension: usize,
	pub frames: Vec<Array2<f64>>,
}

impl TrajectorySink for TrajectoryBuffer {
	fn begin(&mut self, dimension: usize) -> Result<(), PsoError> {
		self.dimension = dimension;
		self.frames.clear();
		Ok(())
	}

	fn record(&mut self, _iteration: usize, particles: &[Particle]) -> Result<(), PsoError> {
		let mut frame = Array2::zeros((particles.len(), self.dimension));
		for (mut row, p) in frame.rows_mut().into_iter().zip(particles) {
			row.assign(p.position());
		}
		self.frames.push(frame);
		Ok(())
	}
}

/// Records optimization progress via swarm callbacks
#[derive(Debug)]
pub struct OptimizationRecorder {
	/// Function name (used for CSV filename)
	function_name: String,
	/// Shared records storage
	records: Arc<Mutex<Vec<OptimizationRecord>>>,
	/// Best fitness seen so far
	best_value: Arc<Mutex<Option<f64>>>,
}

/// A single optimization iteration record
#[derive(Debug, Clone)]
pub struct OptimizationRecord {
	pub iteration: usize,
	/// Global best position at this iteration
	pub x: Vec<f64>,
	/// Global best fitness, `None` while nothing has been evaluated to a number
	pub best_fitness: Option<f64>,
	pub inertia_weight: f64,
	/// Whether this iteration improved the best known result
	pub is_improvement: bool,
}

// a panic elsewhere must not hide the records collected so far
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
	m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OptimizationRecorder {
	pub fn new(function_name: String) -> Self {
		Self {
			function_name,
			records: Arc::new(Mutex::new(Vec::new())),
			best_value: Arc::new(Mutex::new(None)),
		}
	}

	/// Create a callback function that records optimization progress
	pub fn create_callback(&self) -> Box<dyn FnMut(&PsoIntermediate<'_>) -> CallbackAction + Send> {
		let records = self.records.clone();
		let best_value = self.best_value.clone();

		Box::new(move |intermediate: &PsoIntermediate<'_>| -> CallbackAction {
			let fitness = intermediate.best.best_fitness();
			let mut best_guard = lock(&best_value);
			let is_improvement = match (fitness, *best_guard) {
				(Some(f), Some(best)) => f > best,
				(Some(_), None) => true,
				(None, _) => false,
			};
			if is_improvement {
				*best_guard = fitness;
			}
			drop(best_guard);

			lock(&records).push(OptimizationRecord {
				iteration: intermediate.iter,
				x: intermediate.best.position().to_vec(),
				best_fitness: fitness,
				inertia_weight: intermediate.inertia_weight,
				is_improvement,
			});

			CallbackAction::Continue
		})
	}

	/// Save all recorded iterations to `<output_dir>/<function_name>.csv`
	pub fn save_to_csv<P: AsRef<Path>>(&self, output_dir: P) -> Result<String, PsoError> {
		create_dir_all(output_dir.as_ref())?;

		let path = output_dir.as_ref().join(format!("{}.csv", self.function_name));
		let filename = path.to_string_lossy().into_owned();
		let mut wtr = csv::Writer::from_path(&path)?;

		let records_guard = lock(&self.records);
		if records_guard.is_empty() {
			wtr.flush()?;
			return Ok(filename);
		}

		let num_dimensions = records_guard[0].x.len();
		let mut header = vec!["iteration".to_string()];
		header.extend((0..num_dimensions).map(|i| format!("x{}", i)));
		header.extend(["best_fitness", "inertia_weight", "is_improvement"].map(String::from));
		wtr.write_record(&header)?;

		for record in records_guard.iter() {
			let mut row = vec![record.iteration.to_string()];
			row.extend(record.x.iter().map(|xi| format!("{:.16}", xi)));
			row.push(record.best_fitness.map(|f| format!("{:.16}", f)).unwrap_or_default());
			row.push(format!("{:.16}", record.inertia_weight));
			row.push(record.is_improvement.to_string());
			wtr.write_record(&row)?;
		}
		wtr.flush()?;

		Ok(filename)
	}

	/// Get a copy of all recorded iterations
	pub fn records(&self) -> Vec<OptimizationRecord> {
		lock(&self.records).clone()
	}

	pub fn num_iterations(&self) -> usize {
		lock(&self.records).len()
	}

	/// Clear all recorded iterations
	pub fn clear(&self) {
		lock(&self.records).clear();
		*lock(&self.best_value) = None;
	}

	/// Final global best, if any iteration was recorded
	pub fn best_solution(&self) -> Option<(Vec<f64>, Option<f64>)> {
		lock(&self.records).last().map(|r| (r.x.clone(), r.best_fitness))
	}
}
