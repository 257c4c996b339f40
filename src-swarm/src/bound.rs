use crate::PsoError;

/// Closed interval `[min, max]` limiting one dimension of the search space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
	min: f64,
	max: f64,
}

impl Bound {
	/// Create a bound, rejecting `max < min`, non-finite limits and spans
	/// that overflow `f64`
	pub fn new(min: f64, max: f64) -> Result<Self, PsoError> {
		if !min.is_finite() || !max.is_finite() || max < min || (max - min).is_infinite() {
			return Err(PsoError::InvalidBound { min, max });
		}
		Ok(Self { min, max })
	}

	pub fn min(&self) -> f64 {
		self.min
	}

	pub fn max(&self) -> f64 {
		self.max
	}

	/// Width of the interval
	pub fn span(&self) -> f64 {
		self.max - self.min
	}

	pub fn contains(&self, x: f64) -> bool {
		x >= self.min && x <= self.max
	}

	/// Saturate `x` to the interval (hard wall)
	pub fn clamp(&self, x: f64) -> f64 {
		if x < self.min {
			self.min
		} else if x > self.max {
			self.max
		} else {
			x
		}
	}
}

/// Build one [`Bound`] per dimension from `(lower, upper)` pairs
pub fn bounds_from_pairs(pairs: &[(f64, f64)]) -> Result<Vec<Bound>, PsoError> {
	pairs.iter().map(|&(lo, hi)| Bound::new(lo, hi)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bound_accessors() {
		let b = Bound::new(-2.0, 3.0).unwrap();
		assert_eq!(b.min(), -2.0);
		assert_eq!(b.max(), 3.0);
		assert_eq!(b.span(), 5.0);
		assert!(b.contains(0.0));
		assert!(!b.contains(3.5));
	}

	#[test]
	fn test_degenerate_bound_is_valid() {
		let b = Bound::new(1.0, 1.0).unwrap();
		assert_eq!(b.span(), 0.0);
		assert_eq!(b.clamp(7.0), 1.0);
	}

	#[test]
	fn test_inverted_bound_rejected() {
		let err = Bound::new(2.0, 1.0).unwrap_err();
		assert!(matches!(err, PsoError::InvalidBound { min, max } if min == 2.0 && max == 1.0));
	}

	#[test]
	fn test_nan_bound_rejected() {
		assert!(Bound::new(f64::NAN, 1.0).is_err());
		assert!(Bound::new(0.0, f64::NAN).is_err());
	}

	#[test]
	fn test_infinite_bound_rejected() {
		assert!(matches!(Bound::new(f64::NEG_INFINITY, 0.0), Err(PsoError::InvalidBound { .. })));
		assert!(matches!(Bound::new(0.0, f64::INFINITY), Err(PsoError::InvalidBound { .. })));
		assert!(Bound::new(f64::NEG_INFINITY, f64::INFINITY).is_err());
	}

	#[test]
	fn test_overflowing_span_rejected() {
		assert!(matches!(Bound::new(-1.0e308, 1.0e308), Err(PsoError::InvalidBound { .. })));
		assert!(Bound::new(-f64::MAX, f64::MAX).is_err());

		// largest spans that still fit are accepted
		let b = Bound::new(-0.5e308, 1.0e308).unwrap();
		assert!(b.span().is_finite());
		assert!(Bound::new(0.0, f64::MAX).is_ok());
	}

	#[test]
	fn test_clamp_is_hard_wall() {
		let b = Bound::new(-10.0, 10.0).unwrap();
		assert_eq!(b.clamp(-12.5), -10.0);
		assert_eq!(b.clamp(10.01), 10.0);
		assert_eq!(b.clamp(3.25), 3.25);
	}

	#[test]
	fn test_bounds_from_pairs() {
		let bounds = bounds_from_pairs(&[(-1.0, 1.0), (0.0, 5.0)]).unwrap();
		assert_eq!(bounds.len(), 2);
		assert_eq!(bounds[1].max(), 5.0);

		assert!(bounds_from_pairs(&[(0.0, 1.0), (3.0, 2.0)]).is_err());
	}
}
