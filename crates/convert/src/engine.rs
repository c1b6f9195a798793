//! The fill engine: drives the record stream and the destination in
//! lockstep.
//!
//! Record order in the file is the only thing synchronizing producer
//! and consumer, so every read is immediately followed by the write it
//! feeds, and variables are processed strictly in descriptor order. The
//! stream is taken by value: once the engine owns it, nothing else can
//! advance the cursor.

use std::io::Read;

use bin2nc_fortran::RecordStream;
use bin2nc_schema::{Schema, VariableDescriptor};
use tracing::{debug, warn};

use crate::error::ConvertError;
use crate::layout::{classify, Layout};
use crate::sink::{Destination, Slot};

/// Fills every data variable from the stream, in descriptor order.
///
/// All variables are classified up front, so a descriptor problem
/// surfaces before a single record is consumed, and the total expected
/// record count can be logged as a debug-time cross-check against the
/// file's actual layout.
///
/// # Errors
///
/// Any classification, stream, or destination error aborts the whole
/// run; there is no per-variable recovery.
pub fn fill_variables<R: Read, D: Destination>(
    mut stream: RecordStream<R>,
    schema: &Schema,
    dest: &mut D,
) -> Result<(), ConvertError> {
    let mut plan = Vec::with_capacity(schema.variables.len());
    let mut expected_records = 0u64;
    for var in &schema.variables {
        let layout = classify(var, &schema.dimensions)?;
        expected_records += layout.record_count();
        plan.push(layout);
    }
    debug!(records = expected_records, "record consumption plan");

    for (var, layout) in schema.variables.iter().zip(plan) {
        debug!(variable = %var.short_name, ?layout, "filling variable");
        fill_one(&mut stream, var, layout, dest)?;
    }

    debug!(records = stream.records_read(), "stream consumed");
    Ok(())
}

/// Executes one variable's layout: the read pattern and the slicing
/// pattern are two halves of the same variant.
fn fill_one<R: Read, D: Destination>(
    stream: &mut RecordStream<R>,
    var: &VariableDescriptor,
    layout: Layout,
    dest: &mut D,
) -> Result<(), ConvertError> {
    let name = var.short_name.as_str();
    match layout {
        Layout::TileSubtile { rows, row_len } => {
            // One record covering the whole array, split into rows.
            let rec = stream.read_record(rows * row_len)?;
            for i in 0..rows {
                dest.write_slice(name, Slot::Row(i), &rec[i * row_len..(i + 1) * row_len])?;
            }
        }
        Layout::TileUnknown { rows, row_len } => {
            for i in 0..rows {
                let rec = stream.read_record(row_len)?;
                dest.write_slice(name, Slot::Row(i), &rec)?;
            }
        }
        Layout::TileNestedUnknown {
            outer,
            inner,
            row_len,
        } => {
            for j in 0..outer {
                for i in 0..inner {
                    let rec = stream.read_record(row_len)?;
                    dest.write_slice(name, Slot::Cell(j, i), &rec)?;
                }
            }
        }
        Layout::Tile1D { len } | Layout::Gridded2D { len } | Layout::Edges1D { len } => {
            let rec = stream.read_record(len)?;
            dest.write_slice(name, Slot::Whole, &rec)?;
        }
        Layout::GriddedLev { planes, plane_len } | Layout::GriddedEdges { planes, plane_len } => {
            for i in 0..planes {
                let rec = stream.read_record(plane_len)?;
                dest.write_slice(name, Slot::Row(i), &rec)?;
            }
        }
        Layout::Unrecognized => {
            // Historic behaviour: no record, no error. Loud enough that
            // a silent gap in the output can be traced back here.
            warn!(
                variable = name,
                dims = ?var.dimension,
                "no record layout for dimension tuple; variable left unfilled"
            );
        }
    }
    Ok(())
}
