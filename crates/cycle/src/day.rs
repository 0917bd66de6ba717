//! `nwm.YYYYMMDD` day-directory names.

use chrono::NaiveDate;

use crate::error::CycleError;

const DAY_DIR_PREFIX: &str = "nwm.";

/// Glob selecting day directories under a NOMADS download root.
pub const DAY_DIR_GLOB: &str = "nwm.*[0-9]";

/// Parses the calendar day out of a `nwm.YYYYMMDD` directory name.
///
/// # Errors
///
/// Returns [`CycleError::InvalidDayDir`] if the prefix is missing, the date
/// part is not exactly eight ASCII digits, or the date does not exist.
pub fn parse_day_dir(name: &str) -> Result<NaiveDate, CycleError> {
    let invalid = || CycleError::InvalidDayDir {
        name: name.to_string(),
    };

    let digits = name.strip_prefix(DAY_DIR_PREFIX).ok_or_else(invalid)?;
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // All-digit slices of fixed width cannot fail to parse.
    let year: i32 = digits[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = digits[4..6].parse().map_err(|_| invalid())?;
    let day: u32 = digits[6..8].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Formats a calendar day as a `nwm.YYYYMMDD` directory name.
pub fn day_dir_name(day: NaiveDate) -> String {
    format!("{DAY_DIR_PREFIX}{}", day.format("%Y%m%d"))
}
