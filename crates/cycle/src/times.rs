//! Init and valid time computation.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::CycleError;
use crate::filename::ForcingFileName;
use crate::range::RangeCategory;

/// Wall-clock instants derived for one forcing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleTimes {
    /// Start of the forcing cycle: day + init hour.
    pub init: NaiveDateTime,
    /// Instant the file's contents apply to.
    pub valid: NaiveDateTime,
}

/// Computes init and valid times for a forcing file found under `day`.
///
/// `init = day + init_hour`; `valid = day + (init_hour - cast_value)` for
/// `analysis_assim*` categories and `day + (init_hour + cast_value)`
/// otherwise.
///
/// # Errors
///
/// Returns [`CycleError::TimeOverflow`] if either instant is out of range.
pub fn cycle_times(
    day: NaiveDate,
    name: &ForcingFileName,
    range: RangeCategory,
) -> Result<CycleTimes, CycleError> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    let init_hours = i64::from(name.init_hour());
    let valid_hours = init_hours + range.lead_sign() * i64::from(name.cast_value());

    let init = add_hours(midnight, init_hours)?;
    let valid = add_hours(midnight, valid_hours)?;
    Ok(CycleTimes { init, valid })
}

fn add_hours(base: NaiveDateTime, hours: i64) -> Result<NaiveDateTime, CycleError> {
    TimeDelta::try_hours(hours)
        .and_then(|delta| base.checked_add_signed(delta))
        .ok_or_else(|| CycleError::TimeOverflow {
            reason: format!("adding {hours} hours to {base}"),
        })
}
