//! Error types for hermes-audit.

use std::path::PathBuf;

/// Error type for all fallible operations in the hermes-audit crate.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// Returned when namelist-listed files are missing from the simulation
    /// directory.
    #[error("{count} missing input file(s): {details}")]
    MissingFiles {
        /// Number of missing, non-exempt files.
        count: usize,
        /// One message per file, joined with `"; "`.
        details: String,
    },

    /// Returned when a namelist file cannot be parsed.
    #[error("cannot parse namelist {}: {reason}", path.display())]
    Parse {
        /// Namelist file.
        path: PathBuf,
        /// Parser message.
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
