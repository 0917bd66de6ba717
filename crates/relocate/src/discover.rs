//! Source discovery: day directories, member directories, forcing files.

use std::path::{Path, PathBuf};

use hermes_cycle::{DAY_DIR_GLOB, RangeCategory};
use tracing::{debug, warn};

use crate::error::RelocateError;

/// Where the NOMADS-layout forcing comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForcingSource {
    /// A directory holding `nwm.YYYYMMDD` day directories.
    Root(PathBuf),
    /// An explicit list of day directories; every entry must exist.
    Days(Vec<PathBuf>),
}

/// Resolves the day directories to process, as absolute paths in sorted
/// order.
///
/// An explicit [`ForcingSource::Days`] list is ordered by day directory
/// name (then full path), whatever order it was given in; an entry listed
/// twice is processed once.
///
/// # Errors
///
/// Returns [`RelocateError::SourceNotFound`] listing every missing entry of
/// an explicit list (or a missing root), and [`RelocateError::Io`] when a
/// path cannot be made absolute.
pub fn day_dirs(source: &ForcingSource) -> Result<Vec<PathBuf>, RelocateError> {
    match source {
        ForcingSource::Root(root) => {
            if !root.is_dir() {
                return Err(RelocateError::SourceNotFound {
                    missing: vec![root.clone()],
                });
            }
            let root = absolute(root)?;
            let days = glob_sorted(&root, DAY_DIR_GLOB)?;
            if days.is_empty() {
                warn!(root = %root.display(), pattern = DAY_DIR_GLOB, "no day directories found");
            }
            Ok(days)
        }
        ForcingSource::Days(days) => {
            let missing: Vec<PathBuf> = days.iter().filter(|d| !d.exists()).cloned().collect();
            if !missing.is_empty() {
                return Err(RelocateError::SourceNotFound { missing });
            }
            let mut days = days.iter().map(|d| absolute(d)).collect::<Result<Vec<_>, _>>()?;
            days.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
            days.dedup();
            Ok(days)
        }
    }
}

/// Member directories for `range` inside `day`, sorted; plain files that
/// happen to match are skipped.
pub fn member_dirs(day: &Path, range: RangeCategory) -> Result<Vec<PathBuf>, RelocateError> {
    let members = glob_sorted(day, &range.member_glob())?;
    Ok(members
        .into_iter()
        .filter(|m| {
            let is_dir = m.is_dir();
            if !is_dir {
                debug!(path = %m.display(), "skipping non-directory member entry");
            }
            is_dir
        })
        .collect())
}

/// Forcing files for `range` inside `member`, sorted.
pub fn forcing_files(member: &Path, range: RangeCategory) -> Result<Vec<PathBuf>, RelocateError> {
    glob_sorted(member, &range.file_glob())
}

/// Final path component as UTF-8, or an I/O error naming the path.
pub(crate) fn file_name(path: &Path) -> Result<&str, RelocateError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RelocateError::Io {
            path: path.to_path_buf(),
            reason: "file name is missing or not valid UTF-8".into(),
        })
}

fn absolute(path: &Path) -> Result<PathBuf, RelocateError> {
    std::fs::canonicalize(path).map_err(|e| RelocateError::io(path, e))
}

/// Entries of `dir` matching `pattern`, sorted lexically.
fn glob_sorted(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, RelocateError> {
    let dir_str = dir.to_str().ok_or_else(|| RelocateError::Pattern {
        pattern: pattern.to_string(),
        reason: format!("directory {} is not valid UTF-8", dir.display()),
    })?;
    let full = format!("{}/{pattern}", glob::Pattern::escape(dir_str));

    let entries = glob::glob(&full).map_err(|e| RelocateError::Pattern {
        pattern: full.clone(),
        reason: e.to_string(),
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| RelocateError::Io {
            path: e.path().to_path_buf(),
            reason: e.error().to_string(),
        })?;
        out.push(path);
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn root_days_sorted() {
        let tmp = TempDir::new().unwrap();
        for d in ["nwm.20200602", "nwm.20200601", "nwm.notes", "other"] {
            fs::create_dir(tmp.path().join(d)).unwrap();
        }
        let days = day_dirs(&ForcingSource::Root(tmp.path().to_path_buf())).unwrap();
        let names: Vec<_> = days.iter().map(|d| file_name(d).unwrap()).collect();
        assert_eq!(names, vec!["nwm.20200601", "nwm.20200602"]);
        assert!(days.iter().all(|d| d.is_absolute()));
    }

    #[test]
    fn empty_root_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(day_dirs(&ForcingSource::Root(tmp.path().to_path_buf()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn explicit_days_report_all_missing() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("nwm.20200601");
        fs::create_dir(&present).unwrap();
        let a = tmp.path().join("nwm.20200602");
        let b = tmp.path().join("nwm.20200603");

        let err = day_dirs(&ForcingSource::Days(vec![present, a.clone(), b.clone()])).unwrap_err();
        match err {
            RelocateError::SourceNotFound { missing } => assert_eq!(missing, vec![a, b]),
            other => panic!("expected SourceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn explicit_days_sorted_by_day() {
        let tmp = TempDir::new().unwrap();
        let late = tmp.path().join("a").join("nwm.20200603");
        let early = tmp.path().join("b").join("nwm.20200601");
        let middle = tmp.path().join("c").join("nwm.20200602");
        for d in [&late, &early, &middle] {
            fs::create_dir_all(d).unwrap();
        }

        let days = day_dirs(&ForcingSource::Days(vec![
            late.clone(),
            early.clone(),
            middle.clone(),
            late.clone(),
        ]))
        .unwrap();
        let names: Vec<_> = days.iter().map(|d| file_name(d).unwrap()).collect();
        assert_eq!(names, vec!["nwm.20200601", "nwm.20200602", "nwm.20200603"]);
        assert!(days.iter().all(|d| d.is_absolute()));
    }

    #[test]
    fn members_skip_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("forcing_medium_range")).unwrap();
        fs::create_dir(tmp.path().join("forcing_short_range")).unwrap();
        let range: RangeCategory = "medium_range".parse().unwrap();
        let members = member_dirs(tmp.path(), range).unwrap();
        assert_eq!(members.len(), 1);

        fs::remove_dir(tmp.path().join("forcing_medium_range")).unwrap();
        fs::write(tmp.path().join("forcing_medium_range"), b"").unwrap();
        assert!(member_dirs(tmp.path(), range).unwrap().is_empty());
    }

    #[test]
    fn glob_escapes_directory() {
        let tmp = TempDir::new().unwrap();
        let odd = tmp.path().join("run[1]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("nwm.t00z.short_range.forcing.f001.conus.nc"), b"").unwrap();
        let range: RangeCategory = "short_range".parse().unwrap();
        assert_eq!(forcing_files(&odd, range).unwrap().len(), 1);
    }
}
