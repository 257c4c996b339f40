//! Multimodal test functions
//!
//! These functions have multiple local minima and are used to test the global
//! search capabilities and exploration of the swarm.

use ndarray::Array1;
use std::f64::consts::{E, PI};

/// Ackley function - N-dimensional multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-32.768, 32.768]
pub fn ackley(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|&xi| xi.powi(2)).sum();
    let sum_cos: f64 = x.iter().map(|&xi| (2.0 * PI * xi).cos()).sum();

    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
}

/// 2D Ackley variant centred on `center`, with a Gaussian well
///
/// f(x, y) = 20 + e - 20 exp(-0.5 r^2) - exp(0.5 (cos 2π dx + cos 2π dy))
///
/// where (dx, dy) = (x, y) - center and r^2 = dx^2 + dy^2.
/// Global minimum: f = 0 at `center`; ripples at integer offsets.
/// Bounds: x_i in [-10, 10]
pub fn shifted_ackley_2d(x: &Array1<f64>, center: [f64; 2]) -> f64 {
    let dx = x[0] - center[0];
    let dy = x[1] - center[1];

    let term_one = 20.0 + E;
    let term_two = -20.0 * (-0.5 * (dx.powi(2) + dy.powi(2))).exp();
    let term_three = -(0.5 * ((2.0 * PI * dx).cos() + (2.0 * PI * dy).cos())).exp();

    term_one + term_two + term_three
}

/// Rastrigin function - highly multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum: f64 = x.iter()
        .map(|&xi| xi.powi(2) - 10.0 * (2.0 * PI * xi).cos())
        .sum();
    10.0 * n + sum
}
