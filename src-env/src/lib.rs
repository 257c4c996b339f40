//! Environment utilities and constants shared by the swarm binaries

pub mod constants;
pub mod env_utils;

pub use constants::*;
pub use env_utils::*;
