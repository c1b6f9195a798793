//! Read-only dimension-size table.

use std::collections::BTreeMap;

use crate::error::SchemaError;

/// Immutable mapping from dimension name to positive size.
///
/// Built once from the descriptor's `dimensions` section. Every dimension
/// name referenced by a variable must resolve through [`size_of`]; a miss
/// is a fatal [`SchemaError::UnknownDimension`], never a silent default.
///
/// [`size_of`]: DimensionTable::size_of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionTable {
    sizes: BTreeMap<String, usize>,
}

impl DimensionTable {
    /// Builds the table, rejecting zero-size dimensions.
    pub(crate) fn new(sizes: BTreeMap<String, usize>) -> Result<Self, SchemaError> {
        for (name, &size) in &sizes {
            if size == 0 {
                return Err(SchemaError::InvalidSize { name: name.clone() });
            }
        }
        Ok(Self { sizes })
    }

    /// Looks up the size of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownDimension`] if `name` was never
    /// declared.
    pub fn size_of(&self, name: &str) -> Result<usize, SchemaError> {
        self.sizes
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::UnknownDimension {
                name: name.to_string(),
            })
    }

    /// Returns true if `name` was declared.
    pub fn contains(&self, name: &str) -> bool {
        self.sizes.contains_key(name)
    }

    /// Iterates over `(name, size)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.sizes.iter().map(|(name, &size)| (name.as_str(), size))
    }

    /// Number of declared dimensions.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns true if no dimensions were declared.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
