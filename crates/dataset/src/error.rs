//! Error types for hermes-dataset.

use std::path::PathBuf;

/// Error type for all fallible operations in the hermes-dataset crate.
///
/// Covers opening files, building in-memory datasets, concatenating them,
/// decoding CF time coordinates, and running the external `nccmp` tool.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned by the assembler when a member file cannot be opened or
    /// lacks a usable `reference_time` coordinate.
    #[error("failed to open {}: {reason}", path.display())]
    OpenFailure {
        /// Path of the member file.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when datasets cannot be concatenated along `dim`.
    #[error("cannot concatenate along '{dim}': {reason}")]
    ConcatenationMismatch {
        /// Concatenation dimension.
        dim: String,
        /// Which member, variable or dimension disagreed.
        reason: String,
    },

    /// Returned when a variable's value count does not match its dimensions.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the variable or dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when values do not fill the requested array shape.
    #[error("shape error: {reason}")]
    Shape {
        /// Description of the shape failure.
        reason: String,
    },

    /// Returned when a variable refers to a dimension the dataset lacks.
    #[error("variable '{variable}' uses unknown dimension '{dim}'")]
    UnknownDimension {
        /// Variable name.
        variable: String,
        /// Missing dimension name.
        dim: String,
    },

    /// Returned when a coordinate is looked up but not present.
    #[error("coordinate '{name}' not found")]
    MissingCoordinate {
        /// Coordinate name.
        name: String,
    },

    /// Returned when a time value cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time decoding issue.
        reason: String,
    },

    /// Returned when an operation needs at least one input.
    #[error("no input datasets")]
    EmptyInput,

    /// Returned when the external comparator cannot be run.
    #[error("nccmp error: {reason}")]
    Nccmp {
        /// Description of the failure.
        reason: String,
    },
}

impl From<netcdf::Error> for DatasetError {
    fn from(e: netcdf::Error) -> Self {
        DatasetError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<ndarray::ShapeError> for DatasetError {
    fn from(e: ndarray::ShapeError) -> Self {
        DatasetError::Shape {
            reason: e.to_string(),
        }
    }
}
