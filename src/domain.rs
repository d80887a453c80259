//! Domain models: questions, answer modes, and submitted answers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How many choices a question accepts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  /// Exactly one choice is picked; scored by membership in the correct set.
  Single,
  /// Any number of choices are picked; scored with proportional credit.
  Multiple,
}

impl Mode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Mode::Single => "single",
      Mode::Multiple => "multiple",
    }
  }
}

/// Immutable quiz question, as loaded from the dataset.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Question {
  /// Position of the record in the dataset (stable for the process lifetime).
  pub id: usize,
  pub text: String,
  /// Display order matters, correctness does not depend on it.
  pub choices: Vec<String>,
  /// Never empty, always a subset of `choices` (checked at load).
  pub correct_answers: BTreeSet<String>,
  pub mode: Mode,
  pub tags: BTreeSet<String>,
}

impl Question {
  /// True if the question carries at least one of `tags`.
  pub fn has_any_tag<'a, I>(&self, tags: I) -> bool
  where
    I: IntoIterator<Item = &'a String>,
  {
    tags.into_iter().any(|t| self.tags.contains(t))
  }
}

/// A submitted answer.
///
/// Over the wire this is a bare JSON value: a string for single choice,
/// an array of strings for multiple choice, `null` when nothing was picked.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(untagged)]
pub enum Answer {
  Single(String),
  Multiple(BTreeSet<String>),
  #[default]
  Unanswered,
}

impl Answer {
  /// Build a multiple-choice answer from any list of choices, e.g.
  /// `Answer::multiple(["A", "C"])`. Duplicates collapse.
  pub fn multiple<I, S>(items: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Answer::Multiple(items.into_iter().map(Into::into).collect())
  }
}

/// A single-choice answer: `Answer::from("Paris")`.
impl From<&str> for Answer {
  fn from(s: &str) -> Self {
    Answer::Single(s.to_string())
  }
}
