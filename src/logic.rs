//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This is the whole contract an outside caller needs:
//!   - listing tags for the filter UI
//!   - sampling a quiz for a tag filter and a count
//!   - resolving question ids sent back by a remote client
//!   - scoring a submitted quiz

use std::collections::{BTreeSet, HashMap};

use tracing::{info, instrument, warn};

use crate::domain::{Answer, Question};
use crate::error::RequestError;
use crate::protocol::ScoreIn;
use crate::sampler::generate_quiz_random;
use crate::scorer::{correct_quiz, QuizResult};
use crate::store::QuestionStore;

#[instrument(level = "debug", skip(store))]
pub fn list_tags(store: &QuestionStore) -> Vec<String> {
  store.all_tags().to_vec()
}

#[instrument(level = "info", skip(store), fields(pool = store.len()))]
pub fn sample_quiz(store: &QuestionStore, tags: &BTreeSet<String>, count: i64) -> Vec<Question> {
  let quiz = generate_quiz_random(store.questions(), tags, count);
  if quiz.is_empty() {
    warn!(target: "quiz", ?tags, count, "No questions matched the selected tags");
  } else {
    info!(target: "quiz", drawn = quiz.len(), count, "Quiz generated");
  }
  quiz
}

/// Turn client-supplied ids back into questions, preserving their order.
#[instrument(level = "debug", skip(store, ids), fields(ids = ids.len()))]
pub fn resolve_questions(store: &QuestionStore, ids: &[usize]) -> Result<Vec<Question>, RequestError> {
  ids
    .iter()
    .map(|&id| store.get(id).cloned().ok_or(RequestError::UnknownQuestion(id)))
    .collect()
}

/// Resolve a remote submission and score it.
pub fn score_submission(store: &QuestionStore, submission: &ScoreIn) -> Result<QuizResult, RequestError> {
  let questions = resolve_questions(store, &submission.question_ids)?;
  let answers = submission.indexed_answers()?;
  Ok(score_quiz(&questions, &answers))
}

#[instrument(level = "info", skip_all, fields(questions = questions.len(), answered = answers.len()))]
pub fn score_quiz(questions: &[Question], answers: &HashMap<usize, Answer>) -> QuizResult {
  let result = correct_quiz(questions, answers);
  info!(
    target: "quiz",
    total_score = result.total_score,
    max_score = result.max_score,
    percentage = %format!("{:.1}", result.percentage),
    correct = result.correct_count(),
    "Quiz scored"
  );
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  const DATASET: &str = r#"[
    { "question": "2 + 2?", "choices": ["3", "4"], "correct": ["4"], "mode": "single", "tags": ["math"] },
    { "question": "Primes?", "choices": ["2", "3", "4"], "correct": ["2", "3"], "mode": "multiple", "tags": ["math"] },
    { "question": "Site of the 1066 battle?", "choices": ["Hastings", "Agincourt"], "correct": ["Hastings"], "mode": "single", "tags": ["history"] }
  ]"#;

  fn store() -> QuestionStore {
    QuestionStore::from_json_str(DATASET).unwrap()
  }

  #[test]
  fn tags_come_back_sorted() {
    assert_eq!(list_tags(&store()), vec!["history", "math"]);
  }

  #[test]
  fn sample_respects_filter() {
    let tags = BTreeSet::from(["history".to_string()]);
    let quiz = sample_quiz(&store(), &tags, 10);
    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz[0].id, 2);
  }

  #[test]
  fn resolve_keeps_order_and_rejects_unknown_ids() {
    let store = store();
    let qs = resolve_questions(&store, &[2, 0]).unwrap();
    assert_eq!(qs.iter().map(|q| q.id).collect::<Vec<_>>(), vec![2, 0]);
    assert_eq!(resolve_questions(&store, &[0, 7]), Err(RequestError::UnknownQuestion(7)));
  }

  #[test]
  fn score_round_trip_through_ids() {
    let store = store();
    let questions = resolve_questions(&store, &[1, 0]).unwrap();
    let answers = HashMap::from([(0, Answer::multiple(["2", "3"])), (1, Answer::from("3"))]);
    let result = score_quiz(&questions, &answers);
    assert_eq!(result.total_score, 1.0);
    assert_eq!(result.percentage, 50.0);
    assert!(result.results[0].is_correct);
    assert!(!result.results[1].is_correct);
  }

  #[test]
  fn submission_with_bad_answer_key_is_rejected() {
    let submission: ScoreIn =
      serde_json::from_str(r#"{ "questionIds": [0], "answers": { "first": "4" } }"#).unwrap();
    assert_eq!(
      score_submission(&store(), &submission),
      Err(RequestError::BadAnswerIndex("first".into()))
    );
  }

  #[test]
  fn submission_with_aliased_answer_keys_is_rejected() {
    for alias in ["00", " 0", "+0"] {
      let raw = serde_json::json!({ "questionIds": [0], "answers": { "0": "4", alias: "3" } });
      let submission: ScoreIn = serde_json::from_value(raw).unwrap();
      for _ in 0..20 {
        assert_eq!(
          score_submission(&store(), &submission),
          Err(RequestError::BadAnswerIndex(alias.into()))
        );
      }
    }
  }

  #[test]
  fn submission_scores_by_position() {
    let submission: ScoreIn = serde_json::from_str(
      r#"{ "questionIds": [2, 1], "answers": { "0": "Hastings", "1": ["2", "4"] } }"#,
    )
    .unwrap();
    let result = score_submission(&store(), &submission).unwrap();
    assert_eq!(result.results[0].score, 1.0);
    assert_eq!(result.results[1].score, 0.0);
    assert_eq!(result.total_score, 1.0);
  }
}
