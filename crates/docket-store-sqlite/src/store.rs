//! [`SqliteStore`], the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use docket_core::{
  document::{Correspondent, DocumentRecord, NewDocument, RecordDeleted},
  store::DocumentStore,
};

use crate::{
  Error, Result,
  encode::{
    DOCUMENT_COLUMNS, RawCorrespondent, RawDocument, encode_dt, encode_storage_type,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Docket metadata store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  // ── Correspondents ────────────────────────────────────────────────────────

  async fn add_correspondent(&self, name: String) -> Result<Correspondent> {
    let correspondent = Correspondent {
      correspondent_id: Uuid::new_v4(),
      name,
    };

    let id_str = encode_uuid(correspondent.correspondent_id);
    let name   = correspondent.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO correspondents (correspondent_id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(correspondent)
  }

  async fn get_correspondent(&self, id: Uuid) -> Result<Option<Correspondent>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCorrespondent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT correspondent_id, name FROM correspondents WHERE correspondent_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawCorrespondent {
                correspondent_id: row.get(0)?,
                name:             row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCorrespondent::into_correspondent).transpose()
  }

  async fn delete_correspondent(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM correspondents WHERE correspondent_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }

  // ── Documents ─────────────────────────────────────────────────────────────

  async fn insert_document(&self, input: NewDocument) -> Result<DocumentRecord> {
    let record = input.into_record();

    let id_str            = encode_uuid(record.document_id);
    let correspondent_str = record.correspondent_id.map(encode_uuid);
    let title             = record.title.clone();
    let content           = record.content.clone();
    let checksum          = record.checksum.clone();
    let mime_type         = record.mime_type.clone();
    let created_str       = encode_dt(record.created);
    let storage_str       = encode_storage_type(record.storage_type);

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if let Some(cid) = &correspondent_str {
          let known = tx
            .query_row(
              "SELECT 1 FROM correspondents WHERE correspondent_id = ?1",
              rusqlite::params![cid],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
          if !known {
            return Ok(false);
          }
        }

        tx.execute(
          "INSERT INTO documents (
             document_id, correspondent_id, title, content,
             checksum, mime_type, created, storage_type
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            correspondent_str,
            title,
            content,
            checksum,
            mime_type,
            created_str,
            storage_str,
          ],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    match (inserted, record.correspondent_id) {
      (false, Some(cid)) => Err(Error::CorrespondentNotFound(cid)),
      _ => Ok(record),
    }
  }

  async fn get_document(&self, id: Uuid) -> Result<Option<DocumentRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE document_id = ?1"),
            rusqlite::params![id_str],
            RawDocument::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDocument::into_record).transpose()
  }

  async fn delete_document(&self, id: Uuid) -> Result<Option<RecordDeleted>> {
    let id_str = encode_uuid(id);

    // Read, decode and delete in one transaction so the snapshot is exactly
    // the row that was removed. A row that fails to decode is left in place.
    let decoded: Result<Option<DocumentRecord>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE document_id = ?1"),
            rusqlite::params![id_str],
            RawDocument::from_row,
          )
          .optional()?;
        let decoded = raw.map(RawDocument::into_record).transpose();
        if let Ok(Some(_)) = &decoded {
          tx.execute(
            "DELETE FROM documents WHERE document_id = ?1",
            rusqlite::params![id_str],
          )?;
          tx.commit()?;
        }
        Ok(decoded)
      })
      .await?;

    Ok(decoded?.map(RecordDeleted::new))
  }
}
