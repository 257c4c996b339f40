//! Environment variable utilities
//!
//! `PSO_DIR` points to the directory that receives generated data. Records
//! from recorded runs land in `$PSO_DIR/data_generated/records`.

use crate::constants::{DATA_GENERATED, PSO_DIR_VAR, RECORDS};
use std::env;
use std::path::{Path, PathBuf};

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "PSO_DIR environment variable is not set. Please set it to the project root directory (e.g., export PSO_DIR=/path/to/project)"
    )]
    PsoDirNotSet,

    #[error("PSO_DIR points to a non-existent directory: {0}")]
    PsoDirNotFound(PathBuf),

    #[error("Failed to create directory {0}: {1}")]
    DirectoryCreationFailed(PathBuf, std::io::Error),
}

/// Get the PSO_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if PSO_DIR is unset or names a missing directory.
///
/// # Example
///
/// ```no_run
/// use pso_env::env_utils::get_pso_dir;
///
/// let pso_dir = get_pso_dir()?;
/// println!("PSO directory: {}", pso_dir.display());
/// # Ok::<(), pso_env::env_utils::EnvError>(())
/// ```
pub fn get_pso_dir() -> Result<PathBuf, EnvError> {
    let pso_dir = env::var(PSO_DIR_VAR).map_err(|_| EnvError::PsoDirNotSet)?;

    let path = PathBuf::from(pso_dir);

    if !path.exists() {
        return Err(EnvError::PsoDirNotFound(path));
    }

    Ok(path)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, EnvError> {
    if !path.exists() {
        std::fs::create_dir_all(&path)
            .map_err(|e| EnvError::DirectoryCreationFailed(path.clone(), e))?;
    }
    Ok(path)
}

/// `root/data_generated/records`, created on demand
pub fn records_dir_under(root: &Path) -> Result<PathBuf, EnvError> {
    ensure_dir(root.join(DATA_GENERATED).join(RECORDS))
}

/// Get the path to the data_generated directory, creating it if necessary
///
/// # Errors
///
/// Returns an error if PSO_DIR is not set or invalid, or if the directory
/// cannot be created.
pub fn get_data_generated_dir() -> Result<PathBuf, EnvError> {
    let pso_dir = get_pso_dir()?;
    ensure_dir(pso_dir.join(DATA_GENERATED))
}

/// Get the path to the records subdirectory within data_generated
///
/// ```no_run
/// use pso_env::env_utils::get_records_dir;
///
/// let records_dir = get_records_dir()?;
/// println!("Records directory: {}", records_dir.display());
/// # Ok::<(), pso_env::env_utils::EnvError>(())
/// ```
pub fn get_records_dir() -> Result<PathBuf, EnvError> {
    let pso_dir = get_pso_dir()?;
    records_dir_under(&pso_dir)
}

/// Check if PSO_DIR is properly configured and print helpful information
///
/// ```no_run
/// use pso_env::env_utils::check_pso_env;
///
/// if let Err(e) = check_pso_env() {
///     eprintln!("Environment setup error: {}", e);
///     std::process::exit(1);
/// }
/// ```
pub fn check_pso_env() -> Result<(), EnvError> {
    let pso_dir = get_pso_dir()?;
    let data_generated = get_data_generated_dir()?;

    println!("✓ PSO_DIR: {}", pso_dir.display());
    println!("✓ Data directory: {}", data_generated.display());

    Ok(())
}
