//! Error types for the bin2nc-schema crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the bin2nc-schema crate.
///
/// This enum covers descriptor file access and parse failures, structural
/// problems found at load time, dimension lookups, and the dimension-tuple
/// shapes the layout classifier cannot handle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Returned when the descriptor file cannot be read from disk.
    #[error("cannot read descriptor {}: {reason}", path.display())]
    Io {
        /// Path to the descriptor that could not be read.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when the descriptor is not valid YAML or is missing
    /// required fields.
    #[error("cannot parse descriptor: {reason}")]
    Parse {
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when a dimension name is referenced but not declared in
    /// the descriptor's `dimensions` section.
    #[error("unknown dimension: '{name}'")]
    UnknownDimension {
        /// The dimension name that was looked up.
        name: String,
    },

    /// Returned when a declared dimension has size zero.
    #[error("dimension '{name}' has size 0 (must be positive)")]
    InvalidSize {
        /// Name of the offending dimension.
        name: String,
    },

    /// Returned when two variables in the descriptor share a short name.
    #[error("duplicate variable short_name: '{name}'")]
    DuplicateVariable {
        /// The short name that appears more than once.
        name: String,
    },

    /// Returned when a variable declares an unsupported number of
    /// dimensions.
    #[error("variable '{variable}' has {rank} dimensions (supported: 1..=3)")]
    UnsupportedRank {
        /// Short name of the offending variable.
        variable: String,
        /// Number of dimensions the variable declared.
        rank: usize,
    },

    /// Returned when a variable's dimension tuple matches no known
    /// record layout.
    #[error("variable '{variable}' has unrecognized dimension tuple {dims:?}")]
    UnrecognizedShape {
        /// Short name of the offending variable.
        variable: String,
        /// The dimension tuple as declared.
        dims: Vec<String>,
    },
}
