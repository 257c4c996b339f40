//! Error type shared by the swarm, its particles and the recorders

/// Errors raised by the particle swarm optimiser
#[derive(Debug, thiserror::Error)]
pub enum PsoError {
	#[error("invalid bound: max ({max}) must be >= min ({min})")]
	InvalidBound { min: f64, max: f64 },

	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	#[error("dimension mismatch: expected {expected}, got {actual}")]
	DimensionMismatch { expected: usize, actual: usize },

	#[error("failed to write optimisation output: {0}")]
	Io(#[from] std::io::Error),

	#[error("failed to write CSV records: {0}")]
	Csv(#[from] csv::Error),
}

/// Fail with [`PsoError::DimensionMismatch`] unless both lengths agree
pub(crate) fn check_dimension(expected: usize, actual: usize) -> Result<(), PsoError> {
	if expected != actual {
		return Err(PsoError::DimensionMismatch { expected, actual });
	}
	Ok(())
}
