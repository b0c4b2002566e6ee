//! Error types for `imenik-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unrecognised date: {0:?}")]
  UnrecognisedDate(String),

  #[error("year must have four digits: {0:?}")]
  YearOutOfRange(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
