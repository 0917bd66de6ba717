//! Forecast assembly: group per-file datasets by forecast cycle, then
//! concatenate along lead time and reference time.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use ndarray::{ArrayD, IxDyn};
use tracing::{debug, info};

use crate::concat::concat;
use crate::dataset::{ChunkHint, Dataset};
use crate::error::DatasetError;
use crate::opener::DatasetOpener;
use crate::variable::Values;

/// Forecast-cycle coordinate and dimension.
pub const REFERENCE_TIME: &str = "reference_time";

/// Lead-time dimension.
pub const LEAD_TIME: &str = "time";

/// Reference time given to every file of a non-forecast assembly, so that
/// all of them land in one cycle group.
pub fn sentinel_reference_time() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Options for [`assemble_forecast`].
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    chunks: Option<ChunkHint>,
    forecast: bool,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            chunks: None,
            forecast: true,
        }
    }
}

impl AssembleConfig {
    /// Attach a chunking hint, passed to the opener and the final result.
    pub fn with_chunks(mut self, chunks: Option<ChunkHint>) -> Self {
        self.chunks = chunks;
        self
    }

    /// Keep per-file reference times (`true`) or collapse them onto the
    /// sentinel (`false`).
    pub fn with_forecast(mut self, forecast: bool) -> Self {
        self.forecast = forecast;
        self
    }

    /// The chunking hint, if any.
    pub fn chunks(&self) -> Option<&ChunkHint> {
        self.chunks.as_ref()
    }

    /// Whether reference times are kept.
    pub fn forecast(&self) -> bool {
        self.forecast
    }
}

/// Datasets grouped by reference time, keys in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ForecastGroups {
    groups: IndexMap<NaiveDateTime, Vec<Dataset>>,
}

impl ForecastGroups {
    /// Creates an empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `ds` to the group for `key`, opening a new group if the key
    /// has not been seen.
    pub fn insert(&mut self, key: NaiveDateTime, ds: Dataset) {
        self.groups.entry(key).or_default().push(ds);
    }

    /// Reference times in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &NaiveDateTime> {
        self.groups.keys()
    }

    /// Members of the group for `key`, in insertion order.
    pub fn get(&self, key: &NaiveDateTime) -> Option<&[Dataset]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` when no dataset has been inserted.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates `(reference_time, members)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &[Dataset])> {
        self.groups.iter().map(|(key, members)| (key, members.as_slice()))
    }
}

/// Opens every path and groups the datasets by reference time.
///
/// When `config.forecast()` is false each dataset's `reference_time` is
/// overwritten with [`sentinel_reference_time`] first.
///
/// # Errors
///
/// Returns [`DatasetError::OpenFailure`] if a file cannot be opened or
/// lacks a time-valued `reference_time` coordinate.
pub fn group_by_reference_time<P, O>(
    paths: impl IntoIterator<Item = P>,
    opener: &O,
    config: &AssembleConfig,
) -> Result<ForecastGroups, DatasetError>
where
    P: AsRef<Path>,
    O: DatasetOpener + ?Sized,
{
    let mut groups = ForecastGroups::new();

    for path in paths {
        let path = path.as_ref();
        let open_failure = |reason: String| DatasetError::OpenFailure {
            path: path.to_path_buf(),
            reason,
        };

        let mut ds = opener
            .open(path, config.chunks())
            .map_err(|e| open_failure(e.to_string()))?;

        let ref_shape = match ds.coord(REFERENCE_TIME) {
            Some(coord) => coord.values().shape().to_vec(),
            None => return Err(open_failure(format!("no '{REFERENCE_TIME}' coordinate"))),
        };
        if !config.forecast() {
            ds.set_coord_values(
                REFERENCE_TIME,
                Values::Time(ArrayD::from_elem(IxDyn(&ref_shape), sentinel_reference_time())),
            )
            .map_err(|e| open_failure(e.to_string()))?;
        }

        let key = ds
            .coord(REFERENCE_TIME)
            .and_then(|c| c.values().as_time())
            .and_then(|t| t.first().copied())
            .ok_or_else(|| {
                open_failure(format!("'{REFERENCE_TIME}' is empty or not time-valued"))
            })?;

        debug!(path = %path.display(), reference_time = %key, "grouped file");
        groups.insert(key, ds);
    }

    Ok(groups)
}

/// Assembles many per-file datasets into one `reference_time` x `time`
/// dataset.
///
/// Files are grouped by reference time (first-seen order), each group is
/// concatenated along [`LEAD_TIME`], and the group results are concatenated
/// along [`REFERENCE_TIME`]. If a chunk hint is configured the result
/// carries it. The call is atomic: any failure returns no dataset.
///
/// # Errors
///
/// Returns [`DatasetError::EmptyInput`] for no paths,
/// [`DatasetError::OpenFailure`] for unopenable files, and
/// [`DatasetError::ConcatenationMismatch`] for incompatible members.
pub fn assemble_forecast<P, O>(
    paths: impl IntoIterator<Item = P>,
    opener: &O,
    config: &AssembleConfig,
) -> Result<Dataset, DatasetError>
where
    P: AsRef<Path>,
    O: DatasetOpener + ?Sized,
{
    let groups = group_by_reference_time(paths, opener, config)?;
    if groups.is_empty() {
        return Err(DatasetError::EmptyInput);
    }
    info!(
        n_groups = groups.len(),
        forecast = config.forecast(),
        "grouped files by reference time"
    );

    let per_cycle = groups
        .iter()
        .map(|(key, members)| {
            debug!(reference_time = %key, n_members = members.len(), "concatenating lead times");
            concat(members, LEAD_TIME)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let assembled = concat(&per_cycle, REFERENCE_TIME)?;
    info!(
        n_reference_times = assembled.dim_len(REFERENCE_TIME).unwrap_or(0),
        n_lead_times = assembled.dim_len(LEAD_TIME).unwrap_or(0),
        "assembled forecast dataset"
    );

    Ok(match config.chunks() {
        Some(hint) => assembled.chunk(hint.clone()),
        None => assembled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn sentinel_is_unix_epoch() {
        assert_eq!(
            sentinel_reference_time(),
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let t = |h: u32| {
            NaiveDate::from_ymd_opt(2020, 6, 1)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let mut groups = ForecastGroups::new();
        groups.insert(t(12), Dataset::new());
        groups.insert(t(0), Dataset::new());
        groups.insert(t(12), Dataset::new());

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![t(12), t(0)]);
        assert_eq!(groups.get(&t(12)).unwrap().len(), 2);
        assert_eq!(groups.get(&t(0)).unwrap().len(), 1);
        assert!(groups.get(&t(6)).is_none());
        let order: Vec<_> = groups.iter().map(|(k, m)| (*k, m.len())).collect();
        assert_eq!(order, vec![(t(12), 2), (t(0), 1)]);
    }

    #[test]
    fn config_defaults() {
        let cfg = AssembleConfig::default();
        assert!(cfg.forecast());
        assert!(cfg.chunks().is_none());
        let cfg = cfg.with_forecast(false).with_chunks(Some(ChunkHint::new()));
        assert!(!cfg.forecast());
        assert!(cfg.chunks().is_some());
    }
}
