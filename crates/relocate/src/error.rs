//! Error types for hermes-relocate.

use std::path::PathBuf;

use hermes_cycle::CycleError;

/// Error type for all fallible operations in the hermes-relocate crate.
#[derive(Debug, thiserror::Error)]
pub enum RelocateError {
    /// Returned when explicitly listed day directories do not exist.
    #[error("{} source director{} not found: {}", missing.len(), if missing.len() == 1 { "y" } else { "ies" }, display_paths(missing))]
    SourceNotFound {
        /// Every listed directory that is missing.
        missing: Vec<PathBuf>,
    },

    /// Wraps a naming or time-arithmetic error from hermes-cycle.
    #[error("cycle error: {source}")]
    Cycle {
        /// The underlying error.
        #[from]
        source: CycleError,
    },

    /// Returned when a destination entry cannot be created.
    #[error("cannot place {} at {}: {reason}", source_path.display(), dest.display())]
    LinkOrCopyFailure {
        /// Forcing file being placed.
        source_path: PathBuf,
        /// Intended destination.
        dest: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when a glob pattern cannot be built or evaluated.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    Pattern {
        /// The pattern.
        pattern: String,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps a filesystem error on `path`.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

impl RelocateError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        RelocateError::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
