//! The relocation pipeline.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use hermes_cycle::{ForcingFileName, cycle_times, init_dir_name, parse_day_dir};
use tracing::{debug, info};

use crate::config::RelocateConfig;
use crate::discover::{ForcingSource, day_dirs, file_name, forcing_files, member_dirs};
use crate::error::RelocateError;
use crate::materialize::place;

/// Counts of what a relocation processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelocateSummary {
    /// Day directories visited.
    pub days: usize,
    /// Member directories visited.
    pub members: usize,
    /// Forcing files placed.
    pub files: usize,
    /// Distinct init-time directories written into.
    pub init_dirs: usize,
}

/// Rebuilds NOMADS-layout forcing as a WRF-Hydro LDASIN tree.
///
/// For every day directory, member directory and forcing file (sorted), the
/// file's init and valid times are computed, `<dest>/<YYYYMMDDHH init>/` is
/// created if needed, and the file is copied or symlinked there under its
/// LDASIN name. Symlinks target absolute source paths. The process working
/// directory is never changed.
///
/// The configuration is validated before the filesystem is touched, so an
/// unsupported `forc_type` leaves no entries behind. Any later failure
/// leaves already placed files in place.
///
/// # Errors
///
/// - [`RelocateError::Cycle`] for an unsupported `forc_type` or a malformed
///   day-directory or forcing filename.
/// - [`RelocateError::SourceNotFound`] for missing source directories.
/// - [`RelocateError::LinkOrCopyFailure`] when a destination exists under
///   [`OverwritePolicy::Reject`](crate::OverwritePolicy::Reject) or the
///   source cannot be read.
/// - [`RelocateError::Io`] for other filesystem failures.
pub fn relocate_forcing(
    source: &ForcingSource,
    config: &RelocateConfig,
) -> Result<RelocateSummary, RelocateError> {
    config.validate()?;
    let forc_type = config.forc_type()?;
    let range = config.range();

    let days = day_dirs(source)?;
    fs::create_dir_all(config.dest()).map_err(|e| RelocateError::io(config.dest(), e))?;
    info!(
        range = %range,
        dest = %config.dest().display(),
        n_days = days.len(),
        copy = config.copy(),
        "relocating forcing"
    );

    let mut summary = RelocateSummary {
        days: days.len(),
        ..RelocateSummary::default()
    };
    let mut init_dirs: BTreeSet<PathBuf> = BTreeSet::new();

    for day in &days {
        let date = parse_day_dir(file_name(day)?)?;
        let members = member_dirs(day, range)?;
        summary.members += members.len();

        for member in &members {
            for file in forcing_files(member, range)? {
                let name = ForcingFileName::parse(file_name(&file)?)?;
                let times = cycle_times(date, &name, range)?;

                let init_dir = config.dest().join(init_dir_name(times.init));
                if init_dirs.insert(init_dir.clone()) {
                    fs::create_dir_all(&init_dir).map_err(|e| RelocateError::io(&init_dir, e))?;
                }

                let dest = init_dir.join(forc_type.file_name(times.valid));
                place(&file, &dest, config.copy(), config.overwrite())?;
                debug!(source = %file.display(), dest = %dest.display(), "placed forcing file");
                summary.files += 1;
            }
        }
    }

    summary.init_dirs = init_dirs.len();
    info!(
        days = summary.days,
        members = summary.members,
        files = summary.files,
        init_dirs = summary.init_dirs,
        "relocation complete"
    );
    Ok(summary)
}
