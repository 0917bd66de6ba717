//! Error types for the hermes-cycle crate.

/// Error type for all fallible operations in the hermes-cycle crate.
///
/// Covers unknown range categories, malformed day-directory and forcing
/// filenames, unsupported output formats, and time overflow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CycleError {
    /// Returned when a range category name is not one of the known products.
    #[error("unknown range category: '{name}'")]
    UnknownRange {
        /// The name that could not be recognised.
        name: String,
    },

    /// Returned when a day directory name does not follow `nwm.YYYYMMDD`.
    #[error("invalid day directory name: '{name}' (expected nwm.YYYYMMDD)")]
    InvalidDayDir {
        /// The offending directory name.
        name: String,
    },

    /// Returned when a forcing filename field does not contain digits.
    #[error("malformed forcing filename '{name}': no digits in field {field}")]
    MalformedName {
        /// The offending filename.
        name: String,
        /// Zero-based dot-delimited field index that was inspected.
        field: usize,
    },

    /// Returned when a forcing output type other than 1 or 2 is requested.
    #[error("unsupported forc_type {forc_type}: only 1 (hour) and 2 (minute) are supported")]
    UnsupportedFormat {
        /// The rejected forcing type code.
        forc_type: u8,
    },

    /// Returned when time arithmetic leaves the representable range.
    #[error("time overflow: {reason}")]
    TimeOverflow {
        /// Description of the failing computation.
        reason: String,
    },
}
