//! Errors raised while loading the question dataset.
//!
//! Sampling and scoring have no failure modes of their own, so this is the
//! only error type the core exposes.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
  #[error("quiz dataset file not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read quiz dataset {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// `record` is the 0-based index of the offending entry, when one is known.
  #[error("malformed quiz dataset{}: {reason}", record.map(|i| format!(" (record {i})")).unwrap_or_default())]
  MalformedData { record: Option<usize>, reason: String },
}

impl DataError {
  pub(crate) fn malformed(record: usize, reason: impl Into<String>) -> Self {
    DataError::MalformedData { record: Some(record), reason: reason.into() }
  }
}

impl From<serde_json::Error> for DataError {
  fn from(e: serde_json::Error) -> Self {
    DataError::MalformedData { record: None, reason: e.to_string() }
  }
}

/// Caller-side mistakes when submitting a quiz back for correction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
  #[error("unknown question id: {0}")]
  UnknownQuestion(usize),

  /// Keys must be plain decimal positions: "0", "1", ... (no padding or signs).
  #[error("answer key is not a question index: {0:?}")]
  BadAnswerIndex(String),
}
