//! LDASIN destination directory and file names.

use chrono::NaiveDateTime;

use crate::error::CycleError;

/// Suffix WRF-Hydro expects on forcing input files.
pub const LDASIN_SUFFIX: &str = "LDASIN_DOMAIN1";

/// WRF-Hydro forcing filename convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForcType {
    /// `YYYYMMDDHH.LDASIN_DOMAIN1`
    #[default]
    Hourly,
    /// `YYYYMMDDHH00.LDASIN_DOMAIN1`
    Minute,
}

impl ForcType {
    /// Numeric code used on the command line and in namelists.
    pub fn code(self) -> u8 {
        match self {
            ForcType::Hourly => 1,
            ForcType::Minute => 2,
        }
    }

    /// Destination filename for a file valid at `valid`.
    pub fn file_name(self, valid: NaiveDateTime) -> String {
        match self {
            ForcType::Hourly => format!("{}.{LDASIN_SUFFIX}", valid.format("%Y%m%d%H")),
            ForcType::Minute => format!("{}00.{LDASIN_SUFFIX}", valid.format("%Y%m%d%H")),
        }
    }
}

impl TryFrom<u8> for ForcType {
    type Error = CycleError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ForcType::Hourly),
            2 => Ok(ForcType::Minute),
            other => Err(CycleError::UnsupportedFormat { forc_type: other }),
        }
    }
}

/// Destination directory name for a cycle initialised at `init`.
pub fn init_dir_name(init: NaiveDateTime) -> String {
    init.format("%Y%m%d%H").to_string()
}
