//! Deterministic artifact paths.
//!
//! Paths are never stored. They are recomputed from the record on every call:
//!
//! ```text
//! <originals_dir>/<document_id>[.<ext>][.gpg]
//! <thumbnail_dir>/<document_id>.png[.gpg]
//! ```
//!
//! The file stem is the record's UUID, so two records never share a path.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  document::{DocumentRecord, StorageType},
  mime::MimeTypeRegistry,
};

/// Thumbnails are always rendered as PNG.
const THUMBNAIL_EXTENSION: &str = "png";

/// Where artifacts live on disk.
///
/// The two directories must differ: an `image/png` original and its thumbnail
/// share a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
  pub originals_dir: PathBuf,
  pub thumbnail_dir: PathBuf,
}

/// Which artifact of a document a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactKind {
  Original,
  Thumbnail,
}

/// A resolved artifact location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  pub kind: ArtifactKind,
  pub path: PathBuf,
}

/// Computes artifact paths from records. Immutable once built.
///
/// Construction fails with [`Error::SharedStorageDir`] if both roots are the
/// same directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
  config:   StorageConfig,
  registry: MimeTypeRegistry,
}

impl PathResolver {
  pub fn new(config: StorageConfig) -> Result<Self> {
    Self::with_registry(config, MimeTypeRegistry::default())
  }

  pub fn with_registry(config: StorageConfig, registry: MimeTypeRegistry) -> Result<Self> {
    if config.originals_dir == config.thumbnail_dir {
      return Err(Error::SharedStorageDir(config.originals_dir));
    }
    Ok(Self { config, registry })
  }

  pub fn config(&self) -> &StorageConfig { &self.config }

  /// Location of the original upload.
  pub fn original_path(&self, record: &DocumentRecord) -> PathBuf {
    let ext = self.registry.extension_for(&record.mime_type);
    self
      .config
      .originals_dir
      .join(file_name(record.document_id, ext, record.storage_type))
  }

  /// Location of the generated thumbnail.
  pub fn thumbnail_path(&self, record: &DocumentRecord) -> PathBuf {
    self.config.thumbnail_dir.join(file_name(
      record.document_id,
      Some(THUMBNAIL_EXTENSION),
      record.storage_type,
    ))
  }

  /// All artifacts of `record`, original first.
  pub fn artifacts(&self, record: &DocumentRecord) -> Vec<Artifact> {
    vec![
      Artifact {
        kind: ArtifactKind::Original,
        path: self.original_path(record),
      },
      Artifact {
        kind: ArtifactKind::Thumbnail,
        path: self.thumbnail_path(record),
      },
    ]
  }
}

fn file_name(id: Uuid, ext: Option<&str>, storage: StorageType) -> String {
  let mut name = id.hyphenated().to_string();
  for part in [ext, storage.suffix()].into_iter().flatten() {
    name.push('.');
    name.push_str(part);
  }
  name
}
