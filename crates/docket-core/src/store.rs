//! The `DocumentStore` trait.
//!
//! The trait is implemented by metadata backends (e.g. `docket-store-sqlite`).
//! It covers only what the artifact lifecycle needs: creating records,
//! reading them back, and deleting them with a snapshot of what was removed.

use std::future::Future;

use uuid::Uuid;

use crate::document::{Correspondent, DocumentRecord, NewDocument, RecordDeleted};

/// Abstraction over a document metadata backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Correspondents ────────────────────────────────────────────────────

  fn add_correspondent(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Correspondent, Self::Error>> + Send + '_;

  fn get_correspondent(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Correspondent>, Self::Error>> + Send + '_;

  /// Remove a correspondent. Documents referring to it keep existing with
  /// the reference cleared. Returns `false` if no such correspondent.
  fn delete_correspondent(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Documents ─────────────────────────────────────────────────────────

  /// Persist a new record. The id (and `created`, if unset) are assigned
  /// here.
  fn insert_document(
    &self,
    input: NewDocument,
  ) -> impl Future<Output = Result<DocumentRecord, Self::Error>> + Send + '_;

  fn get_document(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DocumentRecord>, Self::Error>> + Send + '_;

  /// Delete a record and return a snapshot of it as it was just before
  /// removal. Returns `None` if there was nothing to delete.
  ///
  /// The snapshot must be read in the same transaction as the delete.
  fn delete_document(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<RecordDeleted>, Self::Error>> + Send + '_;
}
