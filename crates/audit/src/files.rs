//! Small filesystem helpers for simulation directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuditError;

/// Finds `name` in `dir`, retrying with every `:` replaced by `_` (some
/// filesystems rename restart files that way).
///
/// Returns the matching name relative to `dir`, prefixed with `./`.
pub fn find_with_colon_fallback(dir: &Path, name: &str) -> Option<PathBuf> {
    let underscored = name.replace(':', "_");
    [name, underscored.as_str()]
        .into_iter()
        .find(|candidate| dir.join(candidate).exists())
        .map(|found| Path::new(".").join(found))
}

/// Sorts paths by modification time, oldest first. Ties keep input order.
///
/// # Errors
///
/// Returns [`AuditError::Io`] if a file cannot be stat-ed.
pub fn sort_files_by_time(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>, AuditError> {
    let mut keyed = paths
        .into_iter()
        .map(|p| {
            let modified = fs::metadata(&p)
                .and_then(|m| m.modified())
                .map_err(|e| AuditError::Io {
                    path: p.clone(),
                    reason: e.to_string(),
                })?;
            Ok((modified, p))
        })
        .collect::<Result<Vec<_>, AuditError>>()?;
    keyed.sort_by_key(|(modified, _)| *modified);
    Ok(keyed.into_iter().map(|(_, p)| p).collect())
}
