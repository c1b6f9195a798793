//! Error types for the bin2nc-convert crate.

use std::path::PathBuf;

use bin2nc_fortran::StreamError;
use bin2nc_schema::SchemaError;

use crate::sink::Slot;

/// Error type for all fallible operations in the bin2nc-convert crate.
///
/// Schema and stream failures pass through unchanged; the variants
/// defined here cover destination-side problems: slices that do not fit,
/// arrays that were never created, and output-file handling.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A descriptor or classification failure.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A record-stream failure.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Returned when a write would not fit the addressed slice.
    #[error("shape mismatch writing '{variable}': slice holds {expected} values, got {got}")]
    ShapeMismatch {
        /// Name of the destination array.
        variable: String,
        /// Length of the addressed slice.
        expected: usize,
        /// Length of the values offered.
        got: usize,
    },

    /// Returned when a slot does not address a valid sub-region of the
    /// destination array.
    #[error("slot {slot:?} out of range for '{variable}' with shape {shape:?}")]
    SlotOutOfRange {
        /// Name of the destination array.
        variable: String,
        /// The slot that was addressed.
        slot: Slot,
        /// Shape of the array.
        shape: Vec<usize>,
    },

    /// Returned when a write names an array that was never created.
    #[error("no array named '{name}' in destination")]
    UnknownArray {
        /// The missing array name.
        name: String,
    },

    /// Returned when the output path already exists. The converter never
    /// overwrites.
    #[error("output file already exists: {}", path.display())]
    OutputExists {
        /// The offending path.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },
}

impl From<netcdf::Error> for ConvertError {
    fn from(e: netcdf::Error) -> Self {
        ConvertError::Netcdf {
            reason: e.to_string(),
        }
    }
}
