//! Error types for `pauta-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("hour-granularity note requires a start hour")]
  MissingStartHour,

  #[error("hour {0} is outside 0..=23")]
  HourOutOfRange(u8),

  #[error("note content must not be empty")]
  EmptyContent,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
