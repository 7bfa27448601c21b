//! Error type for `docket-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown storage type: {0:?}")]
  UnknownStorageType(String),

  #[error("correspondent not found: {0}")]
  CorrespondentNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
