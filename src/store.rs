//! Question store: loads the dataset once and answers tag queries.
//!
//! The dataset is a JSON array of records:
//!
//! ```json
//! [{ "question": "Capital of France?", "choices": ["Paris", "Lyon"],
//!    "correct": ["Paris"], "mode": "single", "tags": ["geography"] }]
//! ```
//!
//! Loading is all-or-nothing: the first bad record fails the whole load.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::domain::{Mode, Question};
use crate::error::DataError;

/// One entry of the dataset file, before validation.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
  question: String,
  choices: Vec<String>,
  correct: Vec<String>,
  mode: Mode,
  tags: Vec<String>,
}

/// Immutable collection of questions. Built once, then shared read-only.
#[derive(Debug, Clone)]
pub struct QuestionStore {
  questions: Vec<Question>,
  tags: Vec<String>,
}

impl QuestionStore {
  /// Read and validate the dataset at `path`.
  #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
  pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
      ErrorKind::NotFound => DataError::NotFound { path: path.to_path_buf() },
      _ => DataError::Io { path: path.to_path_buf(), source: e },
    })?;

    match Self::from_json_str(&raw) {
      Ok(store) => {
        info!(target: "quiz", path = %path.display(), questions = store.len(), tags = store.tags.len(), "Loaded quiz dataset");
        Ok(store)
      }
      Err(e) => {
        error!(target: "quiz", path = %path.display(), error = %e, "Rejected quiz dataset");
        Err(e)
      }
    }
  }

  /// Parse and validate a dataset held in memory.
  pub fn from_json_str(raw: &str) -> Result<Self, DataError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;

    let mut questions = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
      let record: QuestionRecord =
        serde_json::from_value(value).map_err(|e| DataError::malformed(idx, e.to_string()))?;
      questions.push(validate(idx, record)?);
    }

    Ok(Self::from_questions(questions))
  }

  fn from_questions(questions: Vec<Question>) -> Self {
    let tags: BTreeSet<&String> = questions.iter().flat_map(|q| q.tags.iter()).collect();
    let tags = tags.into_iter().cloned().collect();
    Self { questions, tags }
  }

  pub fn questions(&self) -> &[Question] {
    &self.questions
  }

  /// Look up a question by its dataset position.
  pub fn get(&self, id: usize) -> Option<&Question> {
    self.questions.get(id)
  }

  /// Every distinct tag, sorted lexicographically.
  pub fn all_tags(&self) -> &[String] {
    &self.tags
  }

  pub fn len(&self) -> usize {
    self.questions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.questions.is_empty()
  }
}

fn validate(idx: usize, r: QuestionRecord) -> Result<Question, DataError> {
  if r.choices.is_empty() {
    return Err(DataError::malformed(idx, "no choices"));
  }
  if r.correct.is_empty() {
    return Err(DataError::malformed(idx, "no correct answer"));
  }
  if let Some(missing) = r.correct.iter().find(|c| !r.choices.contains(c)) {
    return Err(DataError::malformed(idx, format!("correct answer '{missing}' is not among the choices")));
  }

  let correct_answers: BTreeSet<String> = r.correct.into_iter().collect();
  if r.mode == Mode::Single && correct_answers.len() != 1 {
    return Err(DataError::malformed(
      idx,
      format!("single-choice question has {} correct answers", correct_answers.len()),
    ));
  }

  Ok(Question {
    id: idx,
    text: r.question,
    choices: r.choices,
    correct_answers,
    mode: r.mode,
    tags: r.tags.into_iter().collect(),
  })
}
