//! The open-a-path collaborator.

use std::path::Path;

use crate::dataset::{ChunkHint, Dataset};
use crate::error::DatasetError;

/// Opens one file into an in-memory [`Dataset`].
///
/// The chunk hint is passed through untouched; implementations may attach
/// it to the returned dataset.
pub trait DatasetOpener {
    /// Opens `path`.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the assembler wraps any error into
    /// [`DatasetError::OpenFailure`].
    fn open(&self, path: &Path, chunks: Option<&ChunkHint>) -> Result<Dataset, DatasetError>;
}

impl<T: DatasetOpener + ?Sized> DatasetOpener for &T {
    fn open(&self, path: &Path, chunks: Option<&ChunkHint>) -> Result<Dataset, DatasetError> {
        (**self).open(path, chunks)
    }
}
