//! Placing one forcing file at its destination.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::OverwritePolicy;
use crate::error::RelocateError;

/// Copies or symlinks `source` to `dest`, applying `overwrite` to an
/// existing entry. `source` should be absolute when linking.
pub(crate) fn place(
    source: &Path,
    dest: &Path,
    copy: bool,
    overwrite: OverwritePolicy,
) -> Result<(), RelocateError> {
    let failure = |reason: String| RelocateError::LinkOrCopyFailure {
        source_path: source.to_path_buf(),
        dest: dest.to_path_buf(),
        reason,
    };

    // symlink_metadata so that a dangling link still counts as existing.
    if let Ok(meta) = fs::symlink_metadata(dest) {
        match overwrite {
            OverwritePolicy::Reject => return Err(failure("destination exists".into())),
            OverwritePolicy::Replace if meta.is_dir() => {
                return Err(failure("destination is a directory".into()));
            }
            OverwritePolicy::Replace => {
                fs::remove_file(dest).map_err(|e| failure(format!("cannot remove existing entry: {e}")))?;
            }
        }
    }

    let result = if copy {
        fs::copy(source, dest).map(|_| ())
    } else {
        symlink(source, dest)
    };
    result.map_err(|e| failure(e.to_string()))
}

#[cfg(unix)]
fn symlink(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(windows)]
fn symlink(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, dest)
}
