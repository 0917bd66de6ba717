//! Encoded init hour and cast value in NWM forcing filenames.
//!
//! A forcing filename is a dot-delimited list of fields, e.g.
//! `nwm.t06z.analysis_assim.forcing.tm02.conus.nc`. Field 1 carries the
//! cycle init hour and field 4 the cast (lead) value; in both the first run
//! of digits is the number.

use crate::error::CycleError;

/// Dot-delimited field holding the cycle init hour (`t06z`).
pub const INIT_HOUR_FIELD: usize = 1;

/// Dot-delimited field holding the cast value (`f003`, `tm02`).
pub const CAST_VALUE_FIELD: usize = 4;

/// The two integers encoded in a forcing filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForcingFileName {
    init_hour: u32,
    cast_value: u32,
}

impl ForcingFileName {
    /// Creates a decoded name from its parts.
    pub fn new(init_hour: u32, cast_value: u32) -> Self {
        Self {
            init_hour,
            cast_value,
        }
    }

    /// Decodes `init_hour` and `cast_value` from a filename.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::MalformedName`] if either field is absent or
    /// holds no digits.
    pub fn parse(name: &str) -> Result<Self, CycleError> {
        let fields: Vec<&str> = name.split('.').collect();
        let init_hour = field_number(name, &fields, INIT_HOUR_FIELD)?;
        let cast_value = field_number(name, &fields, CAST_VALUE_FIELD)?;
        Ok(Self {
            init_hour,
            cast_value,
        })
    }

    /// Hour of day at which the cycle was initialised.
    pub fn init_hour(self) -> u32 {
        self.init_hour
    }

    /// Lead amount, in hours.
    pub fn cast_value(self) -> u32 {
        self.cast_value
    }
}

fn field_number(name: &str, fields: &[&str], field: usize) -> Result<u32, CycleError> {
    fields
        .get(field)
        .and_then(|f| first_digit_run(f))
        .ok_or_else(|| CycleError::MalformedName {
            name: name.to_string(),
            field,
        })
}

/// Returns the first run of ASCII digits in `s` as a number.
fn first_digit_run(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}
