//! Descriptor document: dimension sizes plus the ordered variable list.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::dimensions::DimensionTable;
use crate::error::SchemaError;

/// One variable entry from the descriptor.
///
/// The order of `dimension` names is semantically meaningful: it declares
/// the destination array's axis order, outermost first, and thereby the
/// iteration order of records in the binary file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableDescriptor {
    /// NetCDF variable name, unique across the descriptor.
    pub short_name: String,
    /// Human-readable name, copied verbatim to the `long_name` attribute.
    pub long_name: String,
    /// Unit string, copied verbatim to the `units` attribute.
    pub units: String,
    /// Ordered dimension names, outermost first.
    pub dimension: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    dimensions: BTreeMap<String, usize>,
    variables: Vec<VariableDescriptor>,
}

/// Parsed descriptor: the dimension table and the variable list in
/// declaration order.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Dimension-size table.
    pub dimensions: DimensionTable,
    /// Variables in descriptor order; records are consumed in this order.
    pub variables: Vec<VariableDescriptor>,
}

impl Schema {
    /// Reads and parses a descriptor file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the file cannot be read, or any
    /// error [`Schema::from_yaml`] produces.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let text = fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&text)
    }

    /// Parses a descriptor from YAML text.
    ///
    /// Load-time validation is structural only: sizes must be positive
    /// and short names unique. Whether each variable's dimension names
    /// resolve is checked later, at layout classification time.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] for malformed YAML,
    /// [`SchemaError::InvalidSize`] for a zero-size dimension, or
    /// [`SchemaError::DuplicateVariable`] for a repeated short name.
    pub fn from_yaml(text: &str) -> Result<Self, SchemaError> {
        let raw: RawSchema = serde_yaml::from_str(text).map_err(|e| SchemaError::Parse {
            reason: e.to_string(),
        })?;

        let mut seen = BTreeSet::new();
        for var in &raw.variables {
            if !seen.insert(var.short_name.as_str()) {
                return Err(SchemaError::DuplicateVariable {
                    name: var.short_name.clone(),
                });
            }
        }

        Ok(Self {
            dimensions: DimensionTable::new(raw.dimensions)?,
            variables: raw.variables,
        })
    }
}
