//! Test doubles shared by the unit tests in this crate.

use std::{
  collections::{HashMap, HashSet},
  convert::Infallible,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
};

use uuid::Uuid;

use crate::{
  artifact::{ArtifactError, ArtifactStore, DeleteOutcome, Filesystem},
  document::{Correspondent, DocumentRecord, NewDocument, RecordDeleted},
  store::DocumentStore,
};

// ─── FakeFilesystem ──────────────────────────────────────────────────────────

/// An in-memory file set that records every `remove` call.
#[derive(Default)]
pub struct FakeFilesystem {
  files:         Mutex<HashSet<PathBuf>>,
  failures:      Mutex<HashMap<PathBuf, io::ErrorKind>>,
  stat_failures: Mutex<HashMap<PathBuf, io::ErrorKind>>,
  removals:      Mutex<Vec<PathBuf>>,
}

impl FakeFilesystem {
  pub fn with_files<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
    let fs = Self::default();
    fs.files.lock().unwrap().extend(paths.into_iter().map(Into::into));
    fs
  }

  pub fn touch(&self, path: impl Into<PathBuf>) {
    self.files.lock().unwrap().insert(path.into());
  }

  /// Make `remove(path)` fail with `kind` (the file stays in place).
  pub fn fail_with(&self, path: impl Into<PathBuf>, kind: io::ErrorKind) {
    self.failures.lock().unwrap().insert(path.into(), kind);
  }

  /// Make `exists(path)` fail with `kind`.
  pub fn fail_exists_with(&self, path: impl Into<PathBuf>, kind: io::ErrorKind) {
    self.stat_failures.lock().unwrap().insert(path.into(), kind);
  }

  pub fn removals(&self) -> Vec<PathBuf> { self.removals.lock().unwrap().clone() }
}

impl Filesystem for FakeFilesystem {
  fn exists(&self, path: &Path) -> io::Result<bool> {
    if let Some(kind) = self.stat_failures.lock().unwrap().get(path) {
      return Err(io::Error::from(*kind));
    }
    Ok(self.files.lock().unwrap().contains(path))
  }

  fn remove(&self, path: &Path) -> io::Result<()> {
    self.removals.lock().unwrap().push(path.to_path_buf());
    if let Some(kind) = self.failures.lock().unwrap().get(path) {
      return Err(io::Error::from(*kind));
    }
    if self.files.lock().unwrap().remove(path) {
      Ok(())
    } else {
      Err(io::Error::from(io::ErrorKind::NotFound))
    }
  }
}

// ─── RecordingArtifactStore ──────────────────────────────────────────────────

/// An [`ArtifactStore`] that only records the paths it was asked to delete.
#[derive(Default)]
pub struct RecordingArtifactStore {
  calls: Mutex<Vec<PathBuf>>,
}

impl RecordingArtifactStore {
  pub fn calls(&self) -> Vec<PathBuf> { self.calls.lock().unwrap().clone() }
}

impl ArtifactStore for RecordingArtifactStore {
  fn delete(&self, path: &Path) -> Result<DeleteOutcome, ArtifactError> {
    self.calls.lock().unwrap().push(path.to_path_buf());
    Ok(DeleteOutcome::Deleted)
  }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// A [`DocumentStore`] over a `HashMap`; enough to drive `delete_document`.
#[derive(Default)]
pub struct MemoryStore {
  documents: Mutex<HashMap<Uuid, DocumentRecord>>,
}

impl DocumentStore for MemoryStore {
  type Error = Infallible;

  async fn add_correspondent(&self, name: String) -> Result<Correspondent, Infallible> {
    Ok(Correspondent { correspondent_id: Uuid::new_v4(), name })
  }

  async fn get_correspondent(&self, _id: Uuid) -> Result<Option<Correspondent>, Infallible> {
    Ok(None)
  }

  async fn delete_correspondent(&self, _id: Uuid) -> Result<bool, Infallible> { Ok(false) }

  async fn insert_document(&self, input: NewDocument) -> Result<DocumentRecord, Infallible> {
    let record = input.into_record();
    self.documents.lock().unwrap().insert(record.document_id, record.clone());
    Ok(record)
  }

  async fn get_document(&self, id: Uuid) -> Result<Option<DocumentRecord>, Infallible> {
    Ok(self.documents.lock().unwrap().get(&id).cloned())
  }

  async fn delete_document(&self, id: Uuid) -> Result<Option<RecordDeleted>, Infallible> {
    Ok(self.documents.lock().unwrap().remove(&id).map(RecordDeleted::new))
  }
}
