//! Destination binding: what the fill engine writes into.
//!
//! The engine only ever needs three things from the output container:
//! create a named dimension, create an array over declared dimensions,
//! and write one record's worth of values into a contiguous sub-region.
//! [`Destination`] captures exactly that, and [`NetcdfSink`] implements
//! it over a NetCDF-4 file.

use std::collections::BTreeMap;
use std::path::Path;

use bin2nc_schema::VariableDescriptor;

use crate::error::ConvertError;

/// A contiguous sub-region of a destination array.
///
/// Slices always cover a whole trailing block: the full array, one row
/// of the first axis, or one row of the first two axes. Nothing finer is
/// ever addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The entire array.
    Whole,
    /// `[i, ..]` — everything under index `i` of the first axis.
    Row(usize),
    /// `[j, i, ..]` — everything under `(j, i)` of the first two axes.
    Cell(usize, usize),
}

/// The recognized coordinate axes. Each carries a fixed attribute set
/// assigned once at creation; nothing is mutated later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    /// Longitude index axis.
    Lon,
    /// Latitude index axis.
    Lat,
    /// Hybrid-sigma layer midpoints.
    Lev,
    /// Hybrid-sigma layer interfaces.
    Edges,
    /// Time axis, always zero-filled.
    Time,
}

/// Attribute set attached to a coordinate variable at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateAttrs {
    /// `units` attribute.
    pub units: &'static str,
    /// `long_name` attribute.
    pub long_name: &'static str,
    /// CF `standard_name`, where one applies.
    pub standard_name: Option<&'static str>,
    /// `coordinate` attribute for hybrid-sigma axes.
    pub coordinate: Option<&'static str>,
    /// `positive` attribute for hybrid-sigma axes.
    pub positive: Option<&'static str>,
    /// `formulaTerms` attribute for hybrid-sigma axes.
    pub formula_terms: Option<&'static str>,
}

const HYBRID_SIGMA: (&str, &str, &str, &str) = (
    "atmosphere_hybrid_sigma_pressure_coordinate",
    "eta",
    "down",
    "ap: ak b: bk ps: ps p0: p00",
);

impl CoordinateKind {
    /// Maps a dimension name to its coordinate kind, if it has one.
    pub fn from_dimension(name: &str) -> Option<Self> {
        match name {
            "lon" => Some(Self::Lon),
            "lat" => Some(Self::Lat),
            "lev" => Some(Self::Lev),
            "edges" => Some(Self::Edges),
            "time" => Some(Self::Time),
            _ => None,
        }
    }

    /// The dimension (and variable) name of this axis.
    pub fn dimension(self) -> &'static str {
        match self {
            Self::Lon => "lon",
            Self::Lat => "lat",
            Self::Lev => "lev",
            Self::Edges => "edges",
            Self::Time => "time",
        }
    }

    /// The fixed attribute set for this axis.
    pub fn attrs(self) -> CoordinateAttrs {
        let (standard_name, coordinate, positive, formula_terms) = HYBRID_SIGMA;
        match self {
            Self::Lon => CoordinateAttrs {
                units: "degrees_east",
                long_name: "Longitude",
                standard_name: None,
                coordinate: None,
                positive: None,
                formula_terms: None,
            },
            Self::Lat => CoordinateAttrs {
                units: "degrees_north",
                long_name: "Latitude",
                standard_name: None,
                coordinate: None,
                positive: None,
                formula_terms: None,
            },
            Self::Lev => CoordinateAttrs {
                units: "layer",
                long_name: "sigma_at_layer_midpoints",
                standard_name: Some(standard_name),
                coordinate: Some(coordinate),
                positive: Some(positive),
                formula_terms: Some(formula_terms),
            },
            Self::Edges => CoordinateAttrs {
                units: "level",
                long_name: "sigma_at_layer edges",
                standard_name: Some(standard_name),
                coordinate: Some(coordinate),
                positive: Some(positive),
                formula_terms: Some(formula_terms),
            },
            Self::Time => CoordinateAttrs {
                units: "minutes since ",
                long_name: "time",
                standard_name: None,
                coordinate: None,
                positive: None,
                formula_terms: None,
            },
        }
    }

    /// Coordinate payload for an axis of `size` entries: the index
    /// sequence `1..=size`, or zeros for the time axis.
    pub fn values(self, size: usize) -> Vec<f64> {
        match self {
            Self::Time => vec![0.0; size],
            _ => (1..=size).map(|i| i as f64).collect(),
        }
    }
}

/// The capability the fill engine writes into.
///
/// Arrays are created once and filled exactly once, slice by slice;
/// implementations never see a reshape or a re-write.
pub trait Destination {
    /// Declares a named dimension.
    fn create_dimension(&mut self, name: &str, size: usize) -> Result<(), ConvertError>;

    /// Creates the 1-D coordinate variable for `kind`, with its fixed
    /// attribute set.
    fn create_coordinate(&mut self, kind: CoordinateKind) -> Result<(), ConvertError>;

    /// Creates a data array over the descriptor's dimensions, tagged
    /// with its `long_name` and `units`.
    fn create_array(
        &mut self,
        var: &VariableDescriptor,
        shape: &[usize],
    ) -> Result<(), ConvertError>;

    /// Fills the coordinate variable for `kind`.
    fn write_coordinate(&mut self, kind: CoordinateKind, values: &[f64])
        -> Result<(), ConvertError>;

    /// Writes one record's worth of values into the slice addressed by
    /// `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::ShapeMismatch`] if `values` does not fill
    /// the addressed slice exactly.
    fn write_slice(&mut self, name: &str, slot: Slot, values: &[f64])
        -> Result<(), ConvertError>;
}

/// Length of the slice `slot` addresses in an array of `shape`, or
/// `None` if the slot is out of range for that shape.
pub(crate) fn slot_len(shape: &[usize], slot: Slot) -> Option<usize> {
    match slot {
        Slot::Whole => Some(shape.iter().product()),
        Slot::Row(i) if shape.len() >= 2 && i < shape[0] => Some(shape[1..].iter().product()),
        Slot::Cell(j, i) if shape.len() == 3 && j < shape[0] && i < shape[1] => {
            Some(shape[2..].iter().product())
        }
        _ => None,
    }
}

/// [`Destination`] over a NetCDF-4 file.
///
/// Data variables are stored as `f32` (matching the historic restart
/// format), coordinate variables as `f64`. Shapes are tracked on the
/// side so slice-length checks never have to re-query the file.
#[derive(Debug)]
pub struct NetcdfSink {
    file: netcdf::FileMut,
    shapes: BTreeMap<String, Vec<usize>>,
}

impl NetcdfSink {
    /// Creates a fresh NetCDF file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::OutputExists`] if the path already
    /// exists, or [`ConvertError::Netcdf`] if creation fails.
    pub fn create(path: &Path) -> Result<Self, ConvertError> {
        if path.exists() {
            return Err(ConvertError::OutputExists {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::create(path)?;
        Ok(Self {
            file,
            shapes: BTreeMap::new(),
        })
    }

    fn shape_of(&self, name: &str) -> Result<&[usize], ConvertError> {
        self.shapes
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ConvertError::UnknownArray {
                name: name.to_string(),
            })
    }
}

impl Destination for NetcdfSink {
    fn create_dimension(&mut self, name: &str, size: usize) -> Result<(), ConvertError> {
        self.file.add_dimension(name, size)?;
        Ok(())
    }

    fn create_coordinate(&mut self, kind: CoordinateKind) -> Result<(), ConvertError> {
        let name = kind.dimension();
        let attrs = kind.attrs();
        let mut var = self.file.add_variable::<f64>(name, &[name])?;
        var.put_attribute("units", attrs.units)?;
        var.put_attribute("long_name", attrs.long_name)?;
        if let Some(v) = attrs.standard_name {
            var.put_attribute("standard_name", v)?;
        }
        if let Some(v) = attrs.coordinate {
            var.put_attribute("coordinate", v)?;
        }
        if let Some(v) = attrs.positive {
            var.put_attribute("positive", v)?;
        }
        if let Some(v) = attrs.formula_terms {
            var.put_attribute("formulaTerms", v)?;
        }
        Ok(())
    }

    fn create_array(
        &mut self,
        var: &VariableDescriptor,
        shape: &[usize],
    ) -> Result<(), ConvertError> {
        let dims: Vec<&str> = var.dimension.iter().map(String::as_str).collect();
        let mut nc_var = self.file.add_variable::<f32>(&var.short_name, &dims)?;
        nc_var.put_attribute("long_name", var.long_name.as_str())?;
        nc_var.put_attribute("units", var.units.as_str())?;
        self.shapes.insert(var.short_name.clone(), shape.to_vec());
        Ok(())
    }

    fn write_coordinate(
        &mut self,
        kind: CoordinateKind,
        values: &[f64],
    ) -> Result<(), ConvertError> {
        let name = kind.dimension();
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| ConvertError::UnknownArray {
                name: name.to_string(),
            })?;
        var.put_values(values, ..)?;
        Ok(())
    }

    fn write_slice(
        &mut self,
        name: &str,
        slot: Slot,
        values: &[f64],
    ) -> Result<(), ConvertError> {
        let shape = self.shape_of(name)?.to_vec();
        let expected = slot_len(&shape, slot).ok_or_else(|| ConvertError::SlotOutOfRange {
            variable: name.to_string(),
            slot,
            shape: shape.clone(),
        })?;
        if expected != values.len() {
            return Err(ConvertError::ShapeMismatch {
                variable: name.to_string(),
                expected,
                got: values.len(),
            });
        }

        let data: Vec<f32> = values.iter().map(|&v| v as f32).collect();
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| ConvertError::UnknownArray {
                name: name.to_string(),
            })?;
        match (slot, shape.len()) {
            (Slot::Whole, _) => var.put_values(&data, ..)?,
            (Slot::Row(i), 2) => var.put_values(&data, (i, ..))?,
            (Slot::Row(i), _) => var.put_values(&data, (i, .., ..))?,
            (Slot::Cell(j, i), _) => var.put_values(&data, (j, i, ..))?,
        }
        Ok(())
    }
}
