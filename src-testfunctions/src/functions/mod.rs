//! Test function implementations organized by category
//!
//! - `unimodal`: single-optimum bowls
//! - `multimodal`: many local minima (Ackley family, Rastrigin)
//! - `likelihood`: data-driven objectives with precomputed statistics

pub mod likelihood;
pub mod multimodal;
pub mod unimodal;

// Re-export all functions for easy access
pub use likelihood::*;
pub use multimodal::*;
pub use unimodal::*;
