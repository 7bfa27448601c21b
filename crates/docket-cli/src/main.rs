//! `docket`: command-line access to document artifacts.
//!
//! # Usage
//!
//! ```
//! docket filename --title "Invoice" --created 2020-12-25 --mime application/pdf
//! docket --config docket.toml show <document-id>
//! docket --config docket.toml delete <document-id>
//! ```

mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, NaiveTime, TimeZone as _, Utc};
use clap::{Parser, Subcommand};
use docket_core::{
  artifact::{DeleteOutcome, FsArtifactStore, LocalFilesystem},
  filename::public_filename,
  lifecycle::{DeletionReport, DocumentLifecycleController, delete_document},
  paths::PathResolver,
  store::DocumentStore,
};
use docket_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::settings::DocketConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Docket document artifact tool")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "docket.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the public filename for the given metadata. Reads nothing.
  Filename {
    #[arg(long)]
    title:   String,
    /// Creation date, `YYYY-MM-DD`.
    #[arg(long)]
    created: NaiveDate,
    #[arg(long)]
    mime:    String,
  },
  /// Show a document record with its public filename and artifact paths.
  Show { id: Uuid },
  /// Delete a document record and its artifacts.
  Delete { id: Uuid },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Filename { title, created, mime } => {
      let created = Utc.from_utc_datetime(&created.and_time(NaiveTime::MIN));
      println!("{}", public_filename(&title, created, &mime));
      Ok(())
    }
    Command::Show { id } => {
      let (store, resolver) = open(&cli.config).await?;
      show(&store, &resolver, id).await
    }
    Command::Delete { id } => {
      let (store, resolver) = open(&cli.config).await?;
      let controller =
        DocumentLifecycleController::new(resolver, FsArtifactStore::new(LocalFilesystem));
      delete(&store, &controller, id).await
    }
  }
}

/// Load configuration and open the metadata store it points at.
async fn open(config_path: &Path) -> Result<(SqliteStore, PathResolver)> {
  let cfg = DocketConfig::load(config_path)?;
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let resolver = PathResolver::new(cfg.storage).context("invalid storage configuration")?;
  Ok((store, resolver))
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn show(store: &SqliteStore, resolver: &PathResolver, id: Uuid) -> Result<()> {
  let record = store
    .get_document(id)
    .await
    .context("failed to read document")?
    .with_context(|| format!("no document with id {id}"))?;

  println!("{}", serde_json::to_string_pretty(&record)?);
  println!("public filename: {}", record.public_filename());
  println!("original:        {}", resolver.original_path(&record).display());
  println!("thumbnail:       {}", resolver.thumbnail_path(&record).display());
  Ok(())
}

async fn delete(
  store: &SqliteStore,
  controller: &DocumentLifecycleController<FsArtifactStore>,
  id: Uuid,
) -> Result<()> {
  let Some(report) = delete_document(store, controller, id)
    .await
    .context("failed to delete document")?
  else {
    anyhow::bail!("no document with id {id}");
  };

  print_report(&report);
  if !report.is_success() {
    // The record is already gone; leftover files are a warning, not a failure.
    tracing::warn!(
      document_id = %report.document_id,
      "document deleted, but some artifacts remain on disk"
    );
  }
  Ok(())
}

fn print_report(report: &DeletionReport) {
  println!("deleted document {}", report.document_id);
  for outcome in &report.outcomes {
    let status = match &outcome.result {
      Ok(DeleteOutcome::Deleted) => "deleted".to_owned(),
      Ok(DeleteOutcome::NotFound) => "not present".to_owned(),
      Err(e) => format!("FAILED ({e})"),
    };
    let kind = outcome.kind.to_string();
    println!("  {kind:<9} {}: {status}", outcome.path.display());
  }
}
