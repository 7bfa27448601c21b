//! Error types for `docket-core`.

use std::path::PathBuf;

use thiserror::Error;

use crate::lifecycle::DeletionReport;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more artifacts of a deleted record could not be removed. The
  /// metadata record is already gone; the report says which files remain.
  #[error(
    "artifact cleanup for document {} left {} artifact(s) behind",
    .0.document_id,
    .0.failures().count()
  )]
  ArtifactCleanup(Box<DeletionReport>),

  #[error("originals and thumbnails must use different directories, both are {}", .0.display())]
  SharedStorageDir(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
