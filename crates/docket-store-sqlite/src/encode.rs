//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings and
//! storage types their lowercase names.

use chrono::{DateTime, Utc};
use docket_core::document::{Correspondent, DocumentRecord, StorageType};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── StorageType ──────────────────────────────────────────────────────────────

pub fn encode_storage_type(t: StorageType) -> &'static str { t.into() }

pub fn decode_storage_type(s: &str) -> Result<StorageType> {
  s.parse()
    .map_err(|_| Error::UnknownStorageType(s.to_owned()))
}

// ─── Row types ────────────────────────────────────────────────────────────────

/// Column list matching [`RawDocument::from_row`].
pub const DOCUMENT_COLUMNS: &str = "document_id, correspondent_id, title, content, \
                                    checksum, mime_type, created, storage_type";

/// A `documents` row as read from SQLite, before decoding.
pub struct RawDocument {
  pub document_id:      String,
  pub correspondent_id: Option<String>,
  pub title:            String,
  pub content:          String,
  pub checksum:         String,
  pub mime_type:        String,
  pub created:          String,
  pub storage_type:     String,
}

impl RawDocument {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      document_id:      row.get(0)?,
      correspondent_id: row.get(1)?,
      title:            row.get(2)?,
      content:          row.get(3)?,
      checksum:         row.get(4)?,
      mime_type:        row.get(5)?,
      created:          row.get(6)?,
      storage_type:     row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<DocumentRecord> {
    Ok(DocumentRecord {
      document_id:      decode_uuid(&self.document_id)?,
      correspondent_id: self
        .correspondent_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
      title:            self.title,
      content:          self.content,
      checksum:         self.checksum,
      mime_type:        self.mime_type,
      created:          decode_dt(&self.created)?,
      storage_type:     decode_storage_type(&self.storage_type)?,
    })
  }
}

/// A `correspondents` row as read from SQLite, before decoding.
pub struct RawCorrespondent {
  pub correspondent_id: String,
  pub name:             String,
}

impl RawCorrespondent {
  pub fn into_correspondent(self) -> Result<Correspondent> {
    Ok(Correspondent {
      correspondent_id: decode_uuid(&self.correspondent_id)?,
      name:             self.name,
    })
  }
}
