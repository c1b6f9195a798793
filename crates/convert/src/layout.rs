//! Classification of dimension tuples into record layouts.
//!
//! The binary file carries no structure of its own: the only thing that
//! ties a record to a destination slice is the variable's declared
//! dimension order. Classification is therefore a pure function of the
//! dimension tuple and the dimension table, evaluated with a fixed
//! precedence (tile family first, then gridded, then the edges
//! fallback), and each variant fixes both the number of records to
//! consume and where every record lands.

use bin2nc_schema::{DimensionTable, SchemaError, VariableDescriptor};

/// Axis names with a defined meaning in restart descriptors. A tuple
/// built only from these but matching no layout is skipped (the historic
/// behaviour); a tuple naming anything else is rejected outright.
const KNOWN_AXES: &[&str] = &[
    "lon",
    "lat",
    "lev",
    "edges",
    "time",
    "tile",
    "subtile",
    "unknown_dim1",
    "unknown_dim2",
];

/// Record-consumption and slicing pattern for one variable.
///
/// Every variant carries the sizes its read/write procedure needs, so
/// the fill engine never consults the dimension table again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `[subtile, tile]`: one record covering the whole array, split
    /// into `rows` consecutive `row_len`-value rows. Never one record
    /// per row.
    TileSubtile {
        /// Row count (the subtile size).
        rows: usize,
        /// Values per row (the tile size).
        row_len: usize,
    },
    /// `[unknown_dim, tile]`: one record per row.
    TileUnknown {
        /// Row count (the unknown dimension's size).
        rows: usize,
        /// Values per record (the tile size).
        row_len: usize,
    },
    /// `[unknown_dim2, unknown_dim1, tile]`: one record per `(j, i)`
    /// pair, outer loop over `unknown_dim2`, inner over `unknown_dim1`.
    TileNestedUnknown {
        /// Outer loop count (unknown_dim2).
        outer: usize,
        /// Inner loop count (unknown_dim1).
        inner: usize,
        /// Values per record (the tile size).
        row_len: usize,
    },
    /// `[tile]`: one record, whole array.
    Tile1D {
        /// Values in the record.
        len: usize,
    },
    /// Gridded with `lev`: one full horizontal plane per layer.
    GriddedLev {
        /// Number of layers.
        planes: usize,
        /// Values per plane.
        plane_len: usize,
    },
    /// Gridded with `edges`: one full horizontal plane per interface.
    GriddedEdges {
        /// Number of interfaces.
        planes: usize,
        /// Values per plane.
        plane_len: usize,
    },
    /// Gridded, single level: one record, whole array.
    Gridded2D {
        /// Values in the record.
        len: usize,
    },
    /// `edges` without `lat`/`tile`: one record, whole 1-D array.
    Edges1D {
        /// Values in the record.
        len: usize,
    },
    /// Known axes, no payload. The variable is left at its fill value
    /// and zero records are consumed.
    Unrecognized,
}

impl Layout {
    /// Number of records this layout consumes from the stream.
    pub fn record_count(&self) -> u64 {
        match *self {
            Layout::TileSubtile { .. }
            | Layout::Tile1D { .. }
            | Layout::Gridded2D { .. }
            | Layout::Edges1D { .. } => 1,
            Layout::TileUnknown { rows, .. } => rows as u64,
            Layout::TileNestedUnknown { outer, inner, .. } => (outer * inner) as u64,
            Layout::GriddedLev { planes, .. } | Layout::GriddedEdges { planes, .. } => {
                planes as u64
            }
            Layout::Unrecognized => 0,
        }
    }
}

/// Classifies a variable's dimension tuple.
///
/// Runs before any record is consumed for the variable: every referenced
/// dimension is resolved here, so an undeclared name fails at
/// classification time, never mid-stream.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownDimension`] for an undeclared name,
/// [`SchemaError::UnsupportedRank`] for an empty tuple or more than
/// three dimensions, and [`SchemaError::UnrecognizedShape`] when the
/// tuple names an axis outside the known vocabulary and matches no
/// layout.
pub fn classify(var: &VariableDescriptor, dims: &DimensionTable) -> Result<Layout, SchemaError> {
    let names = &var.dimension;
    if names.is_empty() || names.len() > 3 {
        return Err(SchemaError::UnsupportedRank {
            variable: var.short_name.clone(),
            rank: names.len(),
        });
    }
    for name in names {
        dims.size_of(name)?;
    }

    let has = |axis: &str| names.iter().any(|n| n == axis);

    if has("tile") {
        let tile = dims.size_of("tile")?;
        if names.len() == 2 && has("subtile") {
            return Ok(Layout::TileSubtile {
                rows: dims.size_of("subtile")?,
                row_len: tile,
            });
        }
        if names.len() == 2 && (has("unknown_dim1") || has("unknown_dim2")) {
            let rows = if has("unknown_dim1") {
                dims.size_of("unknown_dim1")?
            } else {
                dims.size_of("unknown_dim2")?
            };
            return Ok(Layout::TileUnknown { rows, row_len: tile });
        }
        if names.len() == 3 && has("unknown_dim1") && has("unknown_dim2") {
            return Ok(Layout::TileNestedUnknown {
                outer: dims.size_of("unknown_dim2")?,
                inner: dims.size_of("unknown_dim1")?,
                row_len: tile,
            });
        }
        if names.len() == 1 {
            return Ok(Layout::Tile1D { len: tile });
        }
        return unmatched(var);
    }

    if has("lat") {
        if has("lev") || has("edges") {
            let layered = if has("lev") { "lev" } else { "edges" };
            let planes = dims.size_of(layered)?;
            let plane_len = product_excluding(names, layered, dims)?;
            return Ok(if layered == "lev" {
                Layout::GriddedLev { planes, plane_len }
            } else {
                Layout::GriddedEdges { planes, plane_len }
            });
        }
        let len = product_excluding(names, "", dims)?;
        return Ok(Layout::Gridded2D { len });
    }

    if has("edges") {
        let len = product_excluding(names, "", dims)?;
        return Ok(Layout::Edges1D { len });
    }

    unmatched(var)
}

/// Product of the tuple's sizes, leaving out `excluded` (the layered
/// axis, which counts records rather than values per record).
fn product_excluding(
    names: &[String],
    excluded: &str,
    dims: &DimensionTable,
) -> Result<usize, SchemaError> {
    let mut len = 1usize;
    for name in names {
        if name != excluded {
            len *= dims.size_of(name)?;
        }
    }
    Ok(len)
}

/// A tuple that matched no pattern: skipped if every axis name is part
/// of the known vocabulary, rejected otherwise.
fn unmatched(var: &VariableDescriptor) -> Result<Layout, SchemaError> {
    if var.dimension.iter().all(|n| KNOWN_AXES.contains(&n.as_str())) {
        Ok(Layout::Unrecognized)
    } else {
        Err(SchemaError::UnrecognizedShape {
            variable: var.short_name.clone(),
            dims: var.dimension.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use bin2nc_schema::Schema;

    use super::*;

    fn schema() -> Schema {
        Schema::from_yaml(
            "\
dimensions:
  lat: 4
  lon: 3
  lev: 5
  edges: 6
  time: 1
  tile: 12
  subtile: 3
  unknown_dim1: 2
  unknown_dim2: 7
  foo: 9
variables: []
",
        )
        .expect("valid descriptor")
    }

    fn var(name: &str, dims: &[&str]) -> VariableDescriptor {
        VariableDescriptor {
            short_name: name.to_string(),
            long_name: name.to_string(),
            units: "1".to_string(),
            dimension: dims.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn tile_subtile_is_one_record_split_into_rows() {
        let s = schema();
        let layout = classify(&var("fr", &["subtile", "tile"]), &s.dimensions).unwrap();
        assert_eq!(
            layout,
            Layout::TileSubtile {
                rows: 3,
                row_len: 12
            }
        );
        assert_eq!(layout.record_count(), 1);
    }

    #[test]
    fn tile_with_unknown_dim_reads_one_record_per_row() {
        let s = schema();
        let layout = classify(&var("gt", &["unknown_dim1", "tile"]), &s.dimensions).unwrap();
        assert_eq!(
            layout,
            Layout::TileUnknown {
                rows: 2,
                row_len: 12
            }
        );
        assert_eq!(layout.record_count(), 2);

        let layout = classify(&var("gt", &["unknown_dim2", "tile"]), &s.dimensions).unwrap();
        assert_eq!(
            layout,
            Layout::TileUnknown {
                rows: 7,
                row_len: 12
            }
        );
    }

    #[test]
    fn nested_unknown_consumes_product_not_sum() {
        let s = schema();
        let layout = classify(
            &var("ghtsnow", &["unknown_dim2", "unknown_dim1", "tile"]),
            &s.dimensions,
        )
        .unwrap();
        assert_eq!(
            layout,
            Layout::TileNestedUnknown {
                outer: 7,
                inner: 2,
                row_len: 12
            }
        );
        assert_eq!(layout.record_count(), 14);
    }

    #[test]
    fn bare_tile_is_one_record() {
        let s = schema();
        let layout = classify(&var("ti", &["tile"]), &s.dimensions).unwrap();
        assert_eq!(layout, Layout::Tile1D { len: 12 });
    }

    #[test]
    fn tile_takes_precedence_over_lat() {
        let s = schema();
        let layout = classify(&var("mixed", &["lat", "tile"]), &s.dimensions).unwrap();
        // tile family wins, but [lat, tile] matches none of its patterns
        assert_eq!(layout, Layout::Unrecognized);
        assert_eq!(layout.record_count(), 0);
    }

    #[test]
    fn gridded_with_lev_reads_one_plane_per_layer() {
        let s = schema();
        let layout = classify(&var("t", &["lev", "lat", "lon"]), &s.dimensions).unwrap();
        assert_eq!(
            layout,
            Layout::GriddedLev {
                planes: 5,
                plane_len: 12
            }
        );
        assert_eq!(layout.record_count(), 5);
    }

    #[test]
    fn gridded_with_edges_keys_on_edges_size() {
        let s = schema();
        let layout = classify(&var("pe", &["edges", "lat", "lon"]), &s.dimensions).unwrap();
        assert_eq!(
            layout,
            Layout::GriddedEdges {
                planes: 6,
                plane_len: 12
            }
        );
    }

    #[test]
    fn flat_gridded_is_one_record() {
        let s = schema();
        let layout = classify(&var("ps", &["lat", "lon"]), &s.dimensions).unwrap();
        assert_eq!(layout, Layout::Gridded2D { len: 12 });
        assert_eq!(layout.record_count(), 1);
    }

    #[test]
    fn edges_without_lat_is_one_record() {
        let s = schema();
        let layout = classify(&var("ak", &["edges"]), &s.dimensions).unwrap();
        assert_eq!(layout, Layout::Edges1D { len: 6 });
    }

    #[test]
    fn known_axes_without_payload_are_skipped() {
        let s = schema();
        for dims in [&["time"][..], &["lev"], &["lon"]] {
            let layout = classify(&var("aux", dims), &s.dimensions).unwrap();
            assert_eq!(layout, Layout::Unrecognized);
        }
    }

    #[test]
    fn foreign_axis_name_is_rejected() {
        let s = schema();
        let err = classify(&var("q", &["foo"]), &s.dimensions).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnrecognizedShape {
                variable: "q".to_string(),
                dims: vec!["foo".to_string()],
            }
        );
    }

    #[test]
    fn undeclared_dimension_fails_before_classification() {
        let s = schema();
        let err = classify(&var("q", &["lat", "missing"]), &s.dimensions).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownDimension {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn rank_limits_enforced() {
        let s = schema();
        let err = classify(&var("q", &[]), &s.dimensions).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedRank { rank: 0, .. }));

        let err = classify(&var("q", &["time", "lev", "lat", "lon"]), &s.dimensions).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedRank { rank: 4, .. }));
    }

    #[test]
    fn classification_is_idempotent() {
        let s = schema();
        let v = var("t", &["lev", "lat", "lon"]);
        let first = classify(&v, &s.dimensions).unwrap();
        let second = classify(&v, &s.dimensions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unused_map_entries_never_affect_classification() {
        let s = schema();
        // "foo" exists in the table; only the tuple contents matter.
        let layout = classify(&var("ps", &["lat", "lon"]), &s.dimensions).unwrap();
        assert_eq!(layout, Layout::Gridded2D { len: 12 });
    }
}
