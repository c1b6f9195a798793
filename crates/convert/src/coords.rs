//! Coordinate synthesis.
//!
//! Coordinate arrays are derived from the dimension table alone — the
//! spatial axes get the index sequence `1..=N`, time gets zeros — and
//! are written before the binary stream is touched.

use bin2nc_schema::DimensionTable;
use tracing::debug;

use crate::error::ConvertError;
use crate::sink::{CoordinateKind, Destination};

/// Fills every coordinate variable whose dimension is declared.
///
/// Independent of the record stream by construction: the only inputs
/// are dimension sizes.
pub fn synthesize_coordinates<D: Destination>(
    dims: &DimensionTable,
    dest: &mut D,
) -> Result<(), ConvertError> {
    for (name, size) in dims.iter() {
        let Some(kind) = CoordinateKind::from_dimension(name) else {
            continue;
        };
        let values = kind.values(size);
        debug!(coordinate = name, len = values.len(), "writing coordinate");
        dest.write_coordinate(kind, &values)?;
    }
    Ok(())
}
