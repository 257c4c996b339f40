/// Environment variable naming the project root
pub const PSO_DIR_VAR: &str = "PSO_DIR";

/// Output directory below the project root
pub const DATA_GENERATED: &str = "data_generated";

/// Per-run optimisation records below [`DATA_GENERATED`]
pub const RECORDS: &str = "records";
