//! # bin2nc-convert
//!
//! The conversion core: classify each variable's dimension tuple into a
//! record layout, then consume the binary stream and populate the
//! NetCDF output in lockstep. A subtle ordering or slicing mistake here
//! corrupts fields without any size check failing, so the layout
//! classifier is a closed set of variants and the read/write procedure
//! for each lives next to it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `layout` | Dimension-tuple classification and record counts |
//! | `engine` | The lockstep fill loop |
//! | `dataset` | Up-front dimension/variable creation |
//! | `coords` | Coordinate synthesis from dimension sizes |
//! | `sink` | The `Destination` binding and its NetCDF implementation |
//! | `error` | Error types |

mod coords;
mod dataset;
mod engine;
mod error;
mod layout;
mod sink;

pub use coords::synthesize_coordinates;
pub use dataset::define_dataset;
pub use engine::fill_variables;
pub use error::ConvertError;
pub use layout::{classify, Layout};
pub use sink::{CoordinateAttrs, CoordinateKind, Destination, NetcdfSink, Slot};
