//! Artifact cleanup after a record is deleted.
//!
//! The metadata store is authoritative: once it reports a record gone, the
//! controller removes that record's artifacts and reports what happened. It
//! never deletes or restores metadata and never retries.
//!
//! Per event the controller moves through
//! `Idle → ResolvingPaths → DeletingArtifacts → Done | ReportedFailure`.
//! All paths are resolved before the first deletion is attempted.

use std::path::PathBuf;

use uuid::Uuid;

use crate::{
  Error, Result,
  artifact::{ArtifactError, ArtifactStore, DeleteOutcome},
  document::RecordDeleted,
  paths::{Artifact, ArtifactKind, PathResolver},
  store::DocumentStore,
};

// ─── Phases ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LifecyclePhase {
  Idle,
  ResolvingPaths,
  DeletingArtifacts,
  Done,
  ReportedFailure,
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// The outcome for a single artifact.
#[derive(Debug)]
pub struct ArtifactReport {
  pub kind:   ArtifactKind,
  pub path:   PathBuf,
  pub result: std::result::Result<DeleteOutcome, ArtifactError>,
}

impl ArtifactReport {
  pub fn is_failure(&self) -> bool { self.result.is_err() }
}

/// Aggregated outcome of cleaning up one deleted record.
#[derive(Debug)]
pub struct DeletionReport {
  pub document_id: Uuid,
  /// One entry per artifact, in [`PathResolver::artifacts`] order.
  pub outcomes:    Vec<ArtifactReport>,
}

impl DeletionReport {
  /// True when every artifact was either deleted or already absent.
  pub fn is_success(&self) -> bool { !self.outcomes.iter().any(ArtifactReport::is_failure) }

  /// The terminal phase this report represents.
  pub fn phase(&self) -> LifecyclePhase {
    if self.is_success() {
      LifecyclePhase::Done
    } else {
      LifecyclePhase::ReportedFailure
    }
  }

  pub fn failures(&self) -> impl Iterator<Item = &ArtifactReport> {
    self.outcomes.iter().filter(|o| o.is_failure())
  }

  pub fn outcome(&self, kind: ArtifactKind) -> Option<&ArtifactReport> {
    self.outcomes.iter().find(|o| o.kind == kind)
  }

  /// Turn a failed report into [`Error::ArtifactCleanup`].
  pub fn into_result(self) -> Result<Self> {
    if self.is_success() {
      Ok(self)
    } else {
      Err(Error::ArtifactCleanup(Box::new(self)))
    }
  }
}

// ─── Listener contract ───────────────────────────────────────────────────────

/// Receives record-deleted events from a metadata store.
///
/// Must be invoked exactly once per committed deletion.
pub trait RecordDeletionListener: Send + Sync {
  fn on_record_deleted(&self, event: &RecordDeleted) -> DeletionReport;
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// Removes a deleted record's artifacts. Holds no per-event state, so one
/// controller can serve concurrent deletions of different records.
#[derive(Debug, Clone)]
pub struct DocumentLifecycleController<A> {
  resolver:  PathResolver,
  artifacts: A,
}

impl<A: ArtifactStore> DocumentLifecycleController<A> {
  pub fn new(resolver: PathResolver, artifacts: A) -> Self { Self { resolver, artifacts } }

  pub fn resolver(&self) -> &PathResolver { &self.resolver }
}

impl<A: ArtifactStore> RecordDeletionListener for DocumentLifecycleController<A> {
  /// Delete every artifact of the record in `event`, exactly once each.
  fn on_record_deleted(&self, event: &RecordDeleted) -> DeletionReport {
    let document_id = event.record.document_id;
    let span = tracing::info_span!("artifact_cleanup", %document_id);
    let _enter = span.enter();

    tracing::trace!(phase = %LifecyclePhase::ResolvingPaths);
    let resolved = self.resolver.artifacts(&event.record);

    tracing::trace!(phase = %LifecyclePhase::DeletingArtifacts);
    let outcomes = resolved
      .into_iter()
      .map(|Artifact { kind, path }| {
        let result = self.artifacts.delete(&path);
        ArtifactReport { kind, path, result }
      })
      .collect();

    let report = DeletionReport { document_id, outcomes };
    match report.phase() {
      LifecyclePhase::Done => tracing::info!("artifacts removed"),
      phase => tracing::warn!(
        %phase,
        failed = report.failures().count(),
        "some artifacts could not be removed"
      ),
    }
    report
  }
}

// ─── Orchestration ───────────────────────────────────────────────────────────

/// Delete a record from `store` and, if one was removed, hand its snapshot to
/// `listener` once.
///
/// Returns `Ok(None)` when the record did not exist. A report with failures
/// is still `Ok`: the record is gone either way, and the caller decides how
/// to surface leftover artifacts.
pub async fn delete_document<S, L>(
  store: &S,
  listener: &L,
  document_id: Uuid,
) -> std::result::Result<Option<DeletionReport>, S::Error>
where
  S: DocumentStore,
  L: RecordDeletionListener + ?Sized,
{
  let Some(event) = store.delete_document(document_id).await? else {
    tracing::debug!(%document_id, "no such document; nothing to clean up");
    return Ok(None);
  };
  Ok(Some(listener.on_record_deleted(&event)))
}
