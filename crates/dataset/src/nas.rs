//! NA auditing through the external `nccmp` comparator.
//!
//! A file is compared against itself with `nccmp --data --metadata --force`.
//! NaN never equals NaN, so every missing value shows up as a difference in
//! the report written to stderr.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::DatasetError;

/// How to invoke the comparator.
#[derive(Debug, Clone)]
pub struct NccmpConfig {
    program: PathBuf,
    args: Vec<String>,
}

impl Default for NccmpConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("nccmp"),
            args: vec!["--data".into(), "--metadata".into(), "--force".into()],
        }
    }
}

impl NccmpConfig {
    /// Use a different comparator executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Executable that will be run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Checks that a program is set.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Nccmp`] for an empty program path.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.program.as_os_str().is_empty() {
            return Err(DatasetError::Nccmp {
                reason: "comparator program must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Discrepancies reported by the comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NaReport {
    /// `:`-delimited report lines split into trimmed fields.
    Table(Vec<Vec<String>>),
    /// Report text that did not split into a uniform table.
    Raw(String),
}

/// Checks one file for NA values.
///
/// Returns `Ok(None)` when the comparator exits successfully (no NAs).
///
/// # Errors
///
/// Returns [`DatasetError::FileNotFound`] for a missing file and
/// [`DatasetError::Nccmp`] if the comparator cannot be started.
pub fn check_file_nas(path: &Path, config: &NccmpConfig) -> Result<Option<NaReport>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    config.validate()?;
    let output = Command::new(&config.program)
        .args(&config.args)
        .arg(path)
        .arg(path)
        .output()
        .map_err(|e| DatasetError::Nccmp {
            reason: format!("failed to run {}: {e}", config.program.display()),
        })?;

    if output.status.success() {
        debug!(path = %path.display(), "no NA values reported");
        return Ok(None);
    }

    let report = String::from_utf8_lossy(&output.stderr);
    let parsed = parse_report(&report);
    if let NaReport::Raw(_) = parsed {
        warn!(
            path = %path.display(),
            "could not read nccmp report as a table, returning raw text"
        );
    }
    Ok(Some(parsed))
}

/// Splits report lines on `:`; falls back to raw text unless every
/// non-empty line yields the same number (at least two) of fields.
pub(crate) fn parse_report(text: &str) -> NaReport {
    let rows: Vec<Vec<String>> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.split(':').map(|f| f.trim().to_string()).collect())
        .collect();

    let uniform = rows
        .first()
        .is_some_and(|first| first.len() >= 2 && rows.iter().all(|r| r.len() == first.len()));

    if uniform {
        NaReport::Table(rows)
    } else {
        NaReport::Raw(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_report() {
        let text = "DIFFER : VARIABLE : streamflow : POSITION : [0,3] : VALUES : nan <> nan\n\
                    DIFFER : VARIABLE : velocity : POSITION : [1,0] : VALUES : nan <> nan\n";
        match parse_report(text) {
            NaReport::Table(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0][0], "DIFFER");
                assert_eq!(rows[0][2], "streamflow");
                assert_eq!(rows[1][2], "velocity");
                assert_eq!(rows[1][6], "nan <> nan");
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn ragged_report_is_raw() {
        let text = "DIFFER : VARIABLE : q\nsegfault\n";
        assert_eq!(parse_report(text), NaReport::Raw(text.to_string()));
    }

    #[test]
    fn empty_report_is_raw() {
        assert_eq!(parse_report(""), NaReport::Raw(String::new()));
    }

    #[test]
    fn missing_file() {
        let err = check_file_nas(
            Path::new("/tmp/hermes_nonexistent_nas.nc"),
            &NccmpConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound { .. }));
    }

    #[test]
    fn default_program() {
        assert_eq!(NccmpConfig::default().program(), Path::new("nccmp"));
        assert_eq!(
            NccmpConfig::default().with_program("/opt/bin/nccmp").program(),
            Path::new("/opt/bin/nccmp")
        );
        assert!(NccmpConfig::default().validate().is_ok());
        assert!(NccmpConfig::default().with_program("").validate().is_err());
    }
}
