//! Named file collections: a forecast time series and a static file.

use std::path::{Path, PathBuf};

use crate::assemble::{AssembleConfig, assemble_forecast};
use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::nas::{NaReport, NccmpConfig, check_file_nas};
use crate::opener::DatasetOpener;

/// Ordered set of per-time output files from one or more forecast cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastFiles {
    paths: Vec<PathBuf>,
}

impl ForecastFiles {
    /// Wraps `paths`, keeping their order.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Appends one file.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Member paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of member files.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when there are no member files.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Assembles the members into one dataset.
    ///
    /// # Errors
    ///
    /// See [`assemble_forecast`].
    pub fn open<O: DatasetOpener + ?Sized>(
        &self,
        opener: &O,
        config: &AssembleConfig,
    ) -> Result<Dataset, DatasetError> {
        assemble_forecast(&self.paths, opener, config)
    }

    /// Runs the NA audit on every member and returns the files with
    /// findings, in member order.
    ///
    /// # Errors
    ///
    /// Fails on the first member that cannot be checked.
    pub fn check_nas(&self, nccmp: &NccmpConfig) -> Result<Vec<(PathBuf, NaReport)>, DatasetError> {
        let mut findings = Vec::new();
        for path in &self.paths {
            if let Some(report) = check_file_nas(path, nccmp)? {
                findings.push((path.clone(), report));
            }
        }
        Ok(findings)
    }
}

impl FromIterator<PathBuf> for ForecastFiles {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ForecastFiles {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// A single static input file (e.g. a domain or parameter file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    path: PathBuf,
}

impl StaticFile {
    /// Wraps `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The wrapped path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file.
    ///
    /// # Errors
    ///
    /// Whatever `opener` returns.
    pub fn open<O: DatasetOpener + ?Sized>(&self, opener: &O) -> Result<Dataset, DatasetError> {
        opener.open(&self.path, None)
    }

    /// Runs the NA audit on the file.
    ///
    /// # Errors
    ///
    /// See [`check_file_nas`].
    pub fn check_nas(&self, nccmp: &NccmpConfig) -> Result<Option<NaReport>, DatasetError> {
        check_file_nas(&self.path, nccmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_and_iterate() {
        let files: ForecastFiles = ["a.nc", "b.nc"].iter().map(PathBuf::from).collect();
        assert_eq!(files.len(), 2);
        let names: Vec<_> = (&files).into_iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(names, vec!["a.nc", "b.nc"]);
    }

    #[test]
    fn empty_collection_fails_to_open() {
        struct Never;
        impl DatasetOpener for Never {
            fn open(
                &self,
                path: &Path,
                _chunks: Option<&crate::dataset::ChunkHint>,
            ) -> Result<Dataset, DatasetError> {
                Err(DatasetError::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
        }
        let err = ForecastFiles::default()
            .open(&Never, &AssembleConfig::default())
            .unwrap_err();
        assert!(matches!(err, DatasetError::EmptyInput));
    }

    #[test]
    fn static_file_path() {
        let f = StaticFile::new("/domain/Fulldom_hires.nc");
        assert_eq!(f.path(), Path::new("/domain/Fulldom_hires.nc"));
    }
}
