//! Optimization test functions library
//!
//! Benchmark objectives used to exercise the particle swarm. They follow the
//! usual minimisation convention (`f(x*) <= f(x)`), so wrap them with
//! `PointwiseFitness::minimize` before handing them to the swarm.
//!
//! - **Unimodal**: sphere, quadratic
//! - **Multimodal**: ackley, shifted 2D ackley, rastrigin
//! - **Likelihood**: Gaussian mean estimation from seeded samples
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use pso_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert_eq!(sphere(&x), 0.0);
//!
//! let bounds = get_function_bounds("ackley");
//! assert!(bounds.is_some());
//! ```

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Signature shared by all single-point benchmarks
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a test function including bounds and known minima
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    pub name: String,
    /// Bounds for each dimension (min, max)
    pub bounds: Vec<(f64, f64)>,
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    pub description: String,
    pub multimodal: bool,
    /// Typical dimension(s) for the function
    pub dimensions: Vec<usize>,
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    metadata.insert(
        "sphere".to_string(),
        FunctionMetadata {
            name: "sphere".to_string(),
            bounds: vec![(-5.12, 5.12); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "N-dimensional unimodal bowl".to_string(),
            multimodal: false,
            dimensions: vec![1, 2, 5, 10],
        },
    );

    metadata.insert(
        "quadratic".to_string(),
        FunctionMetadata {
            name: "quadratic".to_string(),
            bounds: vec![(-5.0, 5.0); 2],
            global_minima: vec![(vec![1.0, 1.0], 0.0)],
            description: "N-dimensional bowl centred at (1, ..., 1)".to_string(),
            multimodal: false,
            dimensions: vec![2, 5],
        },
    );

    metadata.insert(
        "ackley".to_string(),
        FunctionMetadata {
            name: "ackley".to_string(),
            bounds: vec![(-32.768, 32.768); 2], // Default 2D, but can be N-dimensional
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "N-dimensional multimodal function".to_string(),
            multimodal: true,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata.insert(
        "rastrigin".to_string(),
        FunctionMetadata {
            name: "rastrigin".to_string(),
            bounds: vec![(-5.12, 5.12); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "Highly multimodal function".to_string(),
            multimodal: true,
            dimensions: vec![2, 5, 10],
        },
    );

    metadata
}

/// Look up a single-point benchmark by name
pub fn get_function(name: &str) -> Option<TestFunction> {
    match name {
        "sphere" => Some(sphere as TestFunction),
        "quadratic" => Some(quadratic),
        "ackley" => Some(ackley),
        "rastrigin" => Some(rastrigin),
        _ => None,
    }
}

/// Helper function to get bounds for a specific function from metadata
/// Returns None if function is not found in metadata
pub fn get_function_bounds(function_name: &str) -> Option<Vec<(f64, f64)>> {
    let metadata = get_function_metadata();
    metadata.get(function_name).map(|meta| meta.bounds.clone())
}

/// Bounds from metadata, or `default_bounds` repeated over `dimensions`
pub fn get_function_bounds_vec(
    function_name: &str,
    default_bounds: (f64, f64),
    dimensions: usize,
) -> Vec<(f64, f64)> {
    match get_function_bounds(function_name) {
        Some(bounds) if bounds.len() == dimensions => bounds,
        Some(bounds) if !bounds.is_empty() => vec![bounds[0]; dimensions],
        _ => vec![default_bounds; dimensions],
    }
}
