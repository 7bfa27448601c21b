//! Document records and the entities they reference.
//!
//! A record carries no path fields. Every on-disk location is recomputed from
//! the record by [`crate::paths::PathResolver`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::filename;

// ─── Storage type ────────────────────────────────────────────────────────────

/// How a document's artifacts are stored on disk.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageType {
  #[default]
  Unencrypted,
  /// Artifacts are GPG-encrypted and carry an extra `.gpg` suffix.
  Gpg,
}

impl StorageType {
  /// The extra file suffix appended to every artifact of this storage type.
  pub fn suffix(self) -> Option<&'static str> {
    match self {
      Self::Unencrypted => None,
      Self::Gpg => Some("gpg"),
    }
  }
}

// ─── Correspondent ───────────────────────────────────────────────────────────

/// The sender or recipient of a document. Documents refer to a correspondent
/// by id only; they never own it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondent {
  pub correspondent_id: Uuid,
  pub name:             String,
}

// ─── DocumentRecord ──────────────────────────────────────────────────────────

/// The metadata record of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
  /// Assigned at creation; never changes.
  pub document_id:      Uuid,
  pub correspondent_id: Option<Uuid>,
  /// User-supplied; may contain characters that are unsafe in filenames.
  pub title:            String,
  pub content:          String,
  pub checksum:         String,
  /// Not validated. Malformed values are tolerated everywhere.
  pub mime_type:        String,
  pub created:          DateTime<Utc>,
  pub storage_type:     StorageType,
}

impl DocumentRecord {
  /// The name presented to users when downloading or exporting this
  /// document. See [`filename::public_filename`].
  pub fn public_filename(&self) -> String {
    filename::public_filename(&self.title, self.created, &self.mime_type)
  }
}

// ─── NewDocument ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::DocumentStore::insert_document`].
#[derive(Debug, Clone)]
pub struct NewDocument {
  pub correspondent_id: Option<Uuid>,
  pub title:            String,
  pub content:          String,
  pub checksum:         String,
  pub mime_type:        String,
  /// Defaults to the time of insertion when `None`.
  pub created:          Option<DateTime<Utc>>,
  pub storage_type:     StorageType,
}

impl NewDocument {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(title: impl Into<String>, mime_type: impl Into<String>) -> Self {
    Self {
      correspondent_id: None,
      title:            title.into(),
      content:          String::new(),
      checksum:         String::new(),
      mime_type:        mime_type.into(),
      created:          None,
      storage_type:     StorageType::default(),
    }
  }

  /// Assign a fresh id and resolve defaults.
  pub fn into_record(self) -> DocumentRecord {
    DocumentRecord {
      document_id:      Uuid::new_v4(),
      correspondent_id: self.correspondent_id,
      title:            self.title,
      content:          self.content,
      checksum:         self.checksum,
      mime_type:        self.mime_type,
      created:          self.created.unwrap_or_else(Utc::now),
      storage_type:     self.storage_type,
    }
  }
}

// ─── RecordDeleted ───────────────────────────────────────────────────────────

/// Emitted by a store after a record is removed.
///
/// Carries a full copy of the record as it was at deletion time, since the
/// record can no longer be read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDeleted {
  pub record:     DocumentRecord,
  pub deleted_at: DateTime<Utc>,
}

impl RecordDeleted {
  pub fn new(record: DocumentRecord) -> Self {
    Self { record, deleted_at: Utc::now() }
  }
}
