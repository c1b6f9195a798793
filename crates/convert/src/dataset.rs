//! Output dataset definition: dimensions, coordinate variables, data
//! variables. Everything is created up front, before any record is read.

use bin2nc_schema::{DimensionTable, Schema, SchemaError};
use tracing::debug;

use crate::error::ConvertError;
use crate::sink::{CoordinateKind, Destination};

/// Creates every dimension, coordinate variable, and data variable the
/// descriptor declares, in that order.
///
/// Coordinate variables exist only for the recognized axis names; other
/// dimensions (tile, subtile, the unknown axes) are plain dimensions
/// with no coordinate payload.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownDimension`] (through
/// [`ConvertError::Schema`]) if a variable references an undeclared
/// dimension, or any destination error.
pub fn define_dataset<D: Destination>(schema: &Schema, dest: &mut D) -> Result<(), ConvertError> {
    for (name, size) in schema.dimensions.iter() {
        dest.create_dimension(name, size)?;
    }

    for (name, _) in schema.dimensions.iter() {
        if let Some(kind) = CoordinateKind::from_dimension(name) {
            dest.create_coordinate(kind)?;
        }
    }

    for var in &schema.variables {
        let shape = resolve_shape(&var.dimension, &schema.dimensions)?;
        debug!(variable = %var.short_name, ?shape, "creating data variable");
        dest.create_array(var, &shape)?;
    }

    Ok(())
}

fn resolve_shape(names: &[String], dims: &DimensionTable) -> Result<Vec<usize>, SchemaError> {
    names.iter().map(|n| dims.size_of(n)).collect()
}
