//! # bin2nc-fortran
//!
//! Forward-only reader for Fortran-style unformatted binary files: each
//! record is a payload framed by matching `i32` byte-length markers. The
//! reader exposes exactly what the conversion engine needs — read one
//! record of a known value count, or skip the optional two-record header
//! — and nothing else: no seeking, no re-reading.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `record` | The record stream and its framing logic |
//! | `precision` | Per-run floating-point width |
//! | `error` | Error types |

mod error;
mod precision;
mod record;

pub use error::StreamError;
pub use precision::{Precision, PrecisionError};
pub use record::RecordStream;
