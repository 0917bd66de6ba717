//! In-memory multi-dimensional dataset.

use std::collections::BTreeMap;

use crate::error::DatasetError;
use crate::variable::{Values, Variable};

/// Opaque chunking hint: dimension name to chunk length.
///
/// Carried through open and assembly untouched; downstream consumers decide
/// how to use it.
pub type ChunkHint = BTreeMap<String, usize>;

/// Named dimensions plus coordinate and data variables defined on them.
///
/// Every variable's array has one axis per dimension name, each as long as
/// that dimension; checked when the variable is added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    dims: Vec<(String, usize)>,
    coords: Vec<Variable>,
    data_vars: Vec<Variable>,
    chunks: Option<ChunkHint>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a dimension, or confirms an existing one has the same size.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DimensionMismatch`] if `name` already exists
    /// with a different size.
    pub fn add_dim(&mut self, name: impl Into<String>, len: usize) -> Result<(), DatasetError> {
        let name = name.into();
        match self.dim_len(&name) {
            Some(existing) if existing != len => Err(DatasetError::DimensionMismatch {
                name,
                expected: existing,
                got: len,
            }),
            Some(_) => Ok(()),
            None => {
                self.dims.push((name, len));
                Ok(())
            }
        }
    }

    /// Adds a coordinate variable, replacing any coordinate of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnknownDimension`] or
    /// [`DatasetError::DimensionMismatch`] if the variable does not fit the
    /// declared dimensions.
    pub fn add_coord(&mut self, var: Variable) -> Result<(), DatasetError> {
        self.check_shape(&var)?;
        upsert(&mut self.coords, var);
        Ok(())
    }

    /// Adds a data variable, replacing any data variable of the same name.
    ///
    /// # Errors
    ///
    /// Same as [`add_coord`](Self::add_coord).
    pub fn add_data_var(&mut self, var: Variable) -> Result<(), DatasetError> {
        self.check_shape(&var)?;
        upsert(&mut self.data_vars, var);
        Ok(())
    }

    /// Dimensions in declaration order.
    pub fn dims(&self) -> &[(String, usize)] {
        &self.dims
    }

    /// Size of dimension `name`.
    pub fn dim_len(&self, name: &str) -> Option<usize> {
        self.dims.iter().find(|(n, _)| n == name).map(|&(_, len)| len)
    }

    /// Coordinate variables in insertion order.
    pub fn coords(&self) -> &[Variable] {
        &self.coords
    }

    /// Data variables in insertion order.
    pub fn data_vars(&self) -> &[Variable] {
        &self.data_vars
    }

    /// Looks up a coordinate by name.
    pub fn coord(&self, name: &str) -> Option<&Variable> {
        self.coords.iter().find(|v| v.name() == name)
    }

    /// Looks up a data variable by name.
    pub fn data_var(&self, name: &str) -> Option<&Variable> {
        self.data_vars.iter().find(|v| v.name() == name)
    }

    /// Overwrites a coordinate's values in place.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingCoordinate`] if there is no such
    /// coordinate, or [`DatasetError::DimensionMismatch`] if the shape
    /// changes.
    pub fn set_coord_values(&mut self, name: &str, values: Values) -> Result<(), DatasetError> {
        let coord = self
            .coords
            .iter_mut()
            .find(|v| v.name() == name)
            .ok_or_else(|| DatasetError::MissingCoordinate {
                name: name.to_string(),
            })?;
        if coord.values().shape() != values.shape() {
            return Err(DatasetError::DimensionMismatch {
                name: name.to_string(),
                expected: coord.values().len(),
                got: values.len(),
            });
        }
        coord.set_values(values);
        Ok(())
    }

    /// Attaches a chunking hint.
    pub fn chunk(mut self, hint: ChunkHint) -> Self {
        self.chunks = Some(hint);
        self
    }

    /// The attached chunking hint, if any.
    pub fn chunks(&self) -> Option<&ChunkHint> {
        self.chunks.as_ref()
    }

    /// Sizes of `var`'s dimensions in this dataset.
    pub(crate) fn shape_of(&self, var: &Variable) -> Result<Vec<usize>, DatasetError> {
        var.dims()
            .iter()
            .map(|d| {
                self.dim_len(d).ok_or_else(|| DatasetError::UnknownDimension {
                    variable: var.name().to_string(),
                    dim: d.clone(),
                })
            })
            .collect()
    }

    fn check_shape(&self, var: &Variable) -> Result<(), DatasetError> {
        let expected = self.shape_of(var)?;
        let got = var.values().shape();
        if expected.len() != got.len() {
            return Err(DatasetError::DimensionMismatch {
                name: var.name().to_string(),
                expected: expected.len(),
                got: got.len(),
            });
        }
        for ((dim, &want), &have) in var.dims().iter().zip(&expected).zip(got) {
            if want != have {
                return Err(DatasetError::DimensionMismatch {
                    name: dim.clone(),
                    expected: want,
                    got: have,
                });
            }
        }
        Ok(())
    }
}

fn upsert(vars: &mut Vec<Variable>, var: Variable) {
    match vars.iter_mut().find(|v| v.name() == var.name()) {
        Some(slot) => *slot = var,
        None => vars.push(var),
    }
}
