//! NetCDF implementation of [`DatasetOpener`].

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use netcdf::AttributeValue;
use tracing::debug;

use crate::dataset::{ChunkHint, Dataset};
use crate::error::DatasetError;
use crate::opener::DatasetOpener;
use crate::variable::{Values, Variable};

/// Opens NetCDF files with the `netcdf` crate.
///
/// Numeric variables are read as `f64`; variables that cannot be read that
/// way (strings, characters) are skipped. Packed values are decoded the CF
/// way: entries equal to `_FillValue` or `missing_value` become NaN, the
/// rest are multiplied by `scale_factor` and shifted by `add_offset`.
/// A variable becomes a coordinate
/// when it is named like a dimension or listed in some variable's
/// `coordinates` attribute. Variables carrying CF time units
/// (`"<unit> since <datetime>"`) are decoded to instants.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetcdfOpener;

impl DatasetOpener for NetcdfOpener {
    fn open(&self, path: &Path, chunks: Option<&ChunkHint>) -> Result<Dataset, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::open(path)?;

        let mut ds = Dataset::new();
        let mut coord_names = BTreeSet::new();
        for dim in file.dimensions() {
            coord_names.insert(dim.name());
            ds.add_dim(dim.name(), dim.len())?;
        }
        for var in file.variables() {
            if let Some(AttributeValue::Str(listed)) = attribute(&var, "coordinates") {
                coord_names.extend(listed.split_whitespace().map(str::to_string));
            }
        }

        for var in file.variables() {
            let name = var.name();
            let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
            let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
            let mut raw = match var.get_values::<f64, _>(..) {
                Ok(raw) => raw,
                Err(e) => {
                    debug!(variable = %name, error = %e, "skipping non-numeric variable");
                    continue;
                }
            };

            unpack(&var, &mut raw);

            let values = match attribute(&var, "units") {
                Some(AttributeValue::Str(units)) => match parse_cf_time_units(&units) {
                    Some(units) => Values::time(&shape, decode_times(&raw, units, &name)?)?,
                    None => Values::float(&shape, raw)?,
                },
                _ => Values::float(&shape, raw)?,
            };

            let variable = Variable::new(name.as_str(), dims, values);
            if coord_names.contains(&name) {
                ds.add_coord(variable)?;
            } else {
                ds.add_data_var(variable)?;
            }
        }

        debug!(
            path = %path.display(),
            n_dims = ds.dims().len(),
            n_coords = ds.coords().len(),
            n_data_vars = ds.data_vars().len(),
            "opened dataset"
        );

        Ok(match chunks {
            Some(hint) => ds.chunk(hint.clone()),
            None => ds,
        })
    }
}

fn attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<AttributeValue> {
    var.attribute_value(name).and_then(|res| res.ok())
}

/// Masks fill values to NaN, then applies `scale_factor` and `add_offset`.
fn unpack(var: &netcdf::Variable<'_>, raw: &mut [f64]) {
    let mut missing = Vec::new();
    for name in ["_FillValue", "missing_value"] {
        if let Some(value) = attribute(var, name) {
            missing.extend(numeric(&value));
        }
    }
    let scale = attribute(var, "scale_factor")
        .and_then(|v| numeric(&v).first().copied())
        .unwrap_or(1.0);
    let offset = attribute(var, "add_offset")
        .and_then(|v| numeric(&v).first().copied())
        .unwrap_or(0.0);

    for x in raw.iter_mut() {
        if missing.contains(x) {
            *x = f64::NAN;
        } else {
            *x = *x * scale + offset;
        }
    }
}

/// Numeric attribute contents as `f64`; empty for text.
pub(crate) fn numeric(value: &AttributeValue) -> Vec<f64> {
    match value {
        AttributeValue::Uchar(x) => vec![f64::from(*x)],
        AttributeValue::Schar(x) => vec![f64::from(*x)],
        AttributeValue::Ushort(x) => vec![f64::from(*x)],
        AttributeValue::Short(x) => vec![f64::from(*x)],
        AttributeValue::Uint(x) => vec![f64::from(*x)],
        AttributeValue::Int(x) => vec![f64::from(*x)],
        AttributeValue::Ulonglong(x) => vec![*x as f64],
        AttributeValue::Longlong(x) => vec![*x as f64],
        AttributeValue::Float(x) => vec![f64::from(*x)],
        AttributeValue::Double(x) => vec![*x],
        AttributeValue::Uchars(xs) => xs.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Schars(xs) => xs.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Ushorts(xs) => xs.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Shorts(xs) => xs.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Uints(xs) => xs.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Ints(xs) => xs.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Ulonglongs(xs) => xs.iter().map(|&x| x as f64).collect(),
        AttributeValue::Longlongs(xs) => xs.iter().map(|&x| x as f64).collect(),
        AttributeValue::Floats(xs) => xs.iter().map(|&x| f64::from(x)).collect(),
        AttributeValue::Doubles(xs) => xs.clone(),
        _ => Vec::new(),
    }
}

/// A parsed CF time `units` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeUnits {
    /// Seconds per encoded unit.
    pub(crate) seconds: i64,
    /// Instant the encoded offsets count from.
    pub(crate) epoch: NaiveDateTime,
}

/// Parses `"<unit> since <date>[ <time>][ UTC]"`.
///
/// Returns `None` for anything that is not a recognisable time unit, so
/// that plain physical units fall through to numeric values.
pub(crate) fn parse_cf_time_units(units: &str) -> Option<TimeUnits> {
    let mut parts = units.trim().splitn(3, ' ');
    let unit = parts.next()?;
    if parts.next()? != "since" {
        return None;
    }
    let reference = parts.next()?.trim();

    let seconds = match unit.trim_end_matches('s') {
        "second" | "sec" => 1,
        "minute" | "min" => 60,
        "hour" | "hr" => 3_600,
        "day" => 86_400,
        _ => return None,
    };

    let reference = reference
        .trim_end_matches("UTC")
        .trim_end_matches('Z')
        .trim();
    let epoch = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(reference, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(reference, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })?;

    Some(TimeUnits { seconds, epoch })
}

/// Converts encoded offsets into instants, at millisecond resolution.
pub(crate) fn decode_times(
    raw: &[f64],
    units: TimeUnits,
    variable: &str,
) -> Result<Vec<NaiveDateTime>, DatasetError> {
    raw.iter()
        .map(|&offset| {
            let millis = offset * units.seconds as f64 * 1_000.0;
            if !millis.is_finite() {
                return Err(DatasetError::InvalidTime {
                    reason: format!("non-finite offset {offset} in '{variable}'"),
                });
            }
            TimeDelta::try_milliseconds(millis.round() as i64)
                .and_then(|delta| units.epoch.checked_add_signed(delta))
                .ok_or_else(|| DatasetError::InvalidTime {
                    reason: format!("offset {offset} in '{variable}' is out of range"),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn parse_nwm_minutes() {
        let u = parse_cf_time_units("minutes since 1970-01-01 00:00:00 UTC").unwrap();
        assert_eq!(u.seconds, 60);
        assert_eq!(u.epoch, epoch());
    }

    #[test]
    fn parse_date_only() {
        let u = parse_cf_time_units("days since 2000-01-01").unwrap();
        assert_eq!(u.seconds, 86_400);
        assert_eq!(
            u.epoch,
            NaiveDate::from_ymd_opt(2000, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn parse_iso_t_separator() {
        let u = parse_cf_time_units("hours since 2020-06-01T06:00:00Z").unwrap();
        assert_eq!(u.seconds, 3_600);
        assert_eq!(
            u.epoch,
            NaiveDate::from_ymd_opt(2020, 6, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn physical_units_are_not_time() {
        assert_eq!(parse_cf_time_units("m3 s-1"), None);
        assert_eq!(parse_cf_time_units("meters"), None);
        assert_eq!(parse_cf_time_units("weeks since 2000-01-01"), None);
        assert_eq!(parse_cf_time_units("days since yesterday"), None);
    }

    #[test]
    fn decode_minutes() {
        let u = parse_cf_time_units("minutes since 1970-01-01 00:00:00 UTC").unwrap();
        let times = decode_times(&[0.0, 60.0, 26_481_600.0], u, "time").unwrap();
        assert_eq!(times[0], epoch());
        assert_eq!(times[1], epoch() + TimeDelta::hours(1));
        assert_eq!(
            times[2],
            NaiveDate::from_ymd_opt(2020, 5, 8)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn numeric_attributes_widen() {
        assert_eq!(numeric(&AttributeValue::Int(-9999)), vec![-9999.0]);
        assert_eq!(numeric(&AttributeValue::Float(0.5)), vec![0.5]);
        assert_eq!(numeric(&AttributeValue::Shorts(vec![1, -2])), vec![1.0, -2.0]);
        assert!(numeric(&AttributeValue::Str("m3 s-1".into())).is_empty());
    }

    #[test]
    fn decode_rejects_nan() {
        let u = parse_cf_time_units("hours since 2000-01-01").unwrap();
        let err = decode_times(&[f64::NAN], u, "time").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidTime { .. }));
    }
}
