//! Relocation options.

use std::path::{Path, PathBuf};

use hermes_cycle::{ForcType, RangeCategory};

use crate::error::RelocateError;

/// What to do when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Fail with [`RelocateError::LinkOrCopyFailure`].
    #[default]
    Reject,
    /// Remove the existing entry and place the new one.
    Replace,
}

/// Configuration for [`relocate_forcing`](crate::relocate_forcing).
///
/// `forc_type` is kept as the raw numeric code so that an unsupported value
/// is reported by [`validate`](Self::validate) before anything is written.
#[derive(Debug, Clone)]
pub struct RelocateConfig {
    dest: PathBuf,
    range: RangeCategory,
    copy: bool,
    forc_type: u8,
    overwrite: OverwritePolicy,
}

impl RelocateConfig {
    /// Symlink `range` files into `dest` with hourly names, rejecting
    /// existing entries.
    pub fn new(dest: impl Into<PathBuf>, range: RangeCategory) -> Self {
        Self {
            dest: dest.into(),
            range,
            copy: false,
            forc_type: ForcType::default().code(),
            overwrite: OverwritePolicy::default(),
        }
    }

    /// Copy files instead of symlinking them.
    pub fn with_copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Set the output naming code (1 or 2).
    pub fn with_forc_type(mut self, code: u8) -> Self {
        self.forc_type = code;
        self
    }

    /// Set the policy for existing destination entries.
    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Destination root.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Range category being relocated.
    pub fn range(&self) -> RangeCategory {
        self.range
    }

    /// Whether files are copied rather than linked.
    pub fn copy(&self) -> bool {
        self.copy
    }

    /// Existing-entry policy.
    pub fn overwrite(&self) -> OverwritePolicy {
        self.overwrite
    }

    /// The output naming convention.
    ///
    /// # Errors
    ///
    /// Returns [`RelocateError::Cycle`] wrapping `UnsupportedFormat` for
    /// codes other than 1 and 2.
    pub fn forc_type(&self) -> Result<ForcType, RelocateError> {
        Ok(ForcType::try_from(self.forc_type)?)
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RelocateError::Cycle`] for an unsupported `forc_type` and
    /// [`RelocateError::Io`] for an empty destination path.
    pub fn validate(&self) -> Result<(), RelocateError> {
        self.forc_type()?;
        if self.dest.as_os_str().is_empty() {
            return Err(RelocateError::Io {
                path: self.dest.clone(),
                reason: "destination path must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_cycle::CycleError;

    fn range() -> RangeCategory {
        "medium_range".parse().unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = RelocateConfig::new("/out", range());
        assert!(!cfg.copy());
        assert_eq!(cfg.overwrite(), OverwritePolicy::Reject);
        assert_eq!(cfg.forc_type().unwrap(), ForcType::Hourly);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn forc_type_codes() {
        let cfg = RelocateConfig::new("/out", range()).with_forc_type(2);
        assert_eq!(cfg.forc_type().unwrap(), ForcType::Minute);

        for code in [0, 3, 9] {
            let err = RelocateConfig::new("/out", range())
                .with_forc_type(code)
                .validate()
                .unwrap_err();
            assert!(matches!(
                err,
                RelocateError::Cycle {
                    source: CycleError::UnsupportedFormat { forc_type }
                } if forc_type == code
            ));
        }
    }

    #[test]
    fn empty_dest_rejected() {
        assert!(RelocateConfig::new("", range()).validate().is_err());
    }
}
