//! # bin2nc-schema
//!
//! Parse the YAML descriptor that drives a binary-to-NetCDF conversion:
//! a `dimensions` mapping from axis name to size, and an ordered
//! `variables` list of `{short_name, long_name, units, dimension}`
//! entries. Both are read once, validated structurally, and never
//! mutated afterwards.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `descriptor` | Descriptor document and variable entries |
//! | `dimensions` | Read-only dimension-size table |
//! | `error` | Error types |

mod descriptor;
mod dimensions;
mod error;

pub use descriptor::{Schema, VariableDescriptor};
pub use dimensions::DimensionTable;
pub use error::SchemaError;
