//! Error type for `pauta-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] pauta_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown enum value in column {column}: {value:?}")]
  UnknownEnumValue { column: &'static str, value: String },

  #[error("hour column {column} out of range: {value}")]
  HourOutOfRange { column: &'static str, value: i64 },

  #[error("project not found: {0}")]
  ProjectNotFound(uuid::Uuid),

  #[error("task not found: {0}")]
  TaskNotFound(uuid::Uuid),

  #[error("client not found: {0}")]
  ClientNotFound(uuid::Uuid),

  #[error("deal not found: {0}")]
  DealNotFound(uuid::Uuid),

  #[error("calendar event not found: {0}")]
  EventNotFound(uuid::Uuid),

  #[error("planner note not found: {0}")]
  NoteNotFound(uuid::Uuid),

  #[error("outreach entry not found: {0}")]
  OutreachNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
