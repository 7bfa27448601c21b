//! Artifact deletion against a pluggable filesystem.
//!
//! [`Filesystem`] is the only place real I/O happens, so it can be swapped for
//! a fake when testing failure cases.

use std::{
  io,
  path::{Path, PathBuf},
};

use thiserror::Error;

// ─── Filesystem ──────────────────────────────────────────────────────────────

/// The filesystem calls artifact deletion needs.
pub trait Filesystem: Send + Sync {
  /// Whether any directory entry exists at `path`. A missing entry is
  /// `Ok(false)`; any other failure to stat is an error.
  fn exists(&self, path: &Path) -> io::Result<bool>;
  fn remove(&self, path: &Path) -> io::Result<()>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
  fn exists(&self, path: &Path) -> io::Result<bool> { (**self).exists(path) }

  fn remove(&self, path: &Path) -> io::Result<()> { (**self).remove(path) }
}

/// The local filesystem via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
  // `symlink_metadata` so a dangling or looping symlink counts as present.
  fn exists(&self, path: &Path) -> io::Result<bool> {
    match std::fs::symlink_metadata(path) {
      Ok(_) => Ok(true),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
      Err(e) => Err(e),
    }
  }

  fn remove(&self, path: &Path) -> io::Result<()> { std::fs::remove_file(path) }
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// A deletion that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
  Deleted,
  /// Nothing was there; not an error (e.g. a thumbnail never rendered).
  NotFound,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
  #[error("failed to delete artifact {}: {source}", path.display())]
  DeletionFailed {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
}

// ─── ArtifactStore ───────────────────────────────────────────────────────────

/// Removes artifacts by path.
pub trait ArtifactStore: Send + Sync {
  /// Remove the file at `path`, reporting whether it was there.
  fn delete(&self, path: &Path) -> Result<DeleteOutcome, ArtifactError>;
}

impl<A: ArtifactStore + ?Sized> ArtifactStore for &A {
  fn delete(&self, path: &Path) -> Result<DeleteOutcome, ArtifactError> {
    (**self).delete(path)
  }
}

/// An [`ArtifactStore`] over a [`Filesystem`].
#[derive(Debug, Clone, Default)]
pub struct FsArtifactStore<F = LocalFilesystem> {
  fs: F,
}

impl<F: Filesystem> FsArtifactStore<F> {
  pub fn new(fs: F) -> Self { Self { fs } }
}

impl<F: Filesystem> ArtifactStore for FsArtifactStore<F> {
  fn delete(&self, path: &Path) -> Result<DeleteOutcome, ArtifactError> {
    match self.fs.exists(path) {
      Ok(true) => {}
      Ok(false) => {
        tracing::debug!(path = %path.display(), "artifact not present");
        return Ok(DeleteOutcome::NotFound);
      }
      Err(source) => return Err(failed(path, source)),
    }

    match self.fs.remove(path) {
      Ok(()) => {
        tracing::debug!(path = %path.display(), "artifact deleted");
        Ok(DeleteOutcome::Deleted)
      }
      // Removed by someone else between the check and the unlink.
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        tracing::debug!(path = %path.display(), "artifact vanished before removal");
        Ok(DeleteOutcome::NotFound)
      }
      Err(source) => Err(failed(path, source)),
    }
  }
}

fn failed(path: &Path, source: io::Error) -> ArtifactError {
  tracing::warn!(path = %path.display(), error = %source, "artifact deletion failed");
  ArtifactError::DeletionFailed {
    path: path.to_path_buf(),
    source,
  }
}
