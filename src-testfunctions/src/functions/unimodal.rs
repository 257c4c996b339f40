//! Unimodal test functions

use ndarray::Array1;

/// Sphere function - N-dimensional bowl
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi.powi(2)).sum()
}

/// Quadratic function with an offset minimum
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-5, 5]
pub fn quadratic(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| (xi - 1.0).powi(2)).sum()
}
