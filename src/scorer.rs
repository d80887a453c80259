//! Quiz correction.
//!
//! Single-choice questions score 1 when the picked choice is one of the
//! correct answers. Multiple-choice questions use proportional credit:
//!
//! ```text
//! score = max(0, |C ∩ S| / |C| - |S \ C| / |C|)
//! ```
//!
//! where `C` is the correct set and `S` the selected set. Both terms share the
//! `|C|` denominator. `C` is never empty; the store rejects such questions.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::{Answer, Mode, Question};

/// Outcome for one question.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ScoreResult {
    pub question: String,
    pub mode: Mode,
    pub correct_answers: BTreeSet<String>,
    /// The answer exactly as submitted, even when it was ignored.
    pub user_answer: Answer,
    pub score: f64,
    pub is_correct: bool,
}

/// Outcome for a whole quiz.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuizResult {
    pub results: Vec<ScoreResult>,
    pub total_score: f64,
    /// Number of questions, one point each.
    pub max_score: usize,
    pub percentage: f64,
}

/// How the per-question scores split up.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Breakdown {
    pub correct: usize,
    pub partial: usize,
    pub incorrect: usize,
}

impl QuizResult {
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }

    pub fn breakdown(&self) -> Breakdown {
        self.results.iter().fold(Breakdown::default(), |mut b, r| {
            if r.is_correct {
                b.correct += 1;
            } else if r.score > 0.0 {
                b.partial += 1;
            } else {
                b.incorrect += 1;
            }
            b
        })
    }
}

pub fn score_single(correct: &BTreeSet<String>, answer: Option<&str>) -> f64 {
    match answer {
        Some(a) if correct.contains(a) => 1.0,
        _ => 0.0,
    }
}

pub fn score_multiple(correct: &BTreeSet<String>, selected: &BTreeSet<String>) -> f64 {
    if selected.is_empty() {
        return 0.0;
    }
    let total = correct.len() as f64;
    let hits = correct.intersection(selected).count() as f64;
    let wrong = selected.difference(correct).count() as f64;
    (hits / total - wrong / total).max(0.0)
}

/// Score one question. An answer whose shape does not match the question
/// mode is ignored and scores zero.
pub fn score_question(question: &Question, answer: &Answer) -> ScoreResult {
    let score = match (question.mode, answer) {
        (Mode::Single, Answer::Single(a)) => score_single(&question.correct_answers, Some(a.as_str())),
        (Mode::Multiple, Answer::Multiple(s)) => score_multiple(&question.correct_answers, s),
        (_, Answer::Unanswered) => 0.0,
        (mode, _) => {
            warn!(target: "quiz", id = question.id, mode = mode.as_str(), "Ignoring answer with mismatched shape");
            0.0
        }
    };

    ScoreResult {
        question: question.text.clone(),
        mode: question.mode,
        correct_answers: question.correct_answers.clone(),
        user_answer: answer.clone(),
        score,
        is_correct: score == 1.0,
    }
}

/// Correct a full quiz. `answers` is keyed by position in `questions`;
/// missing positions count as unanswered, positions past the end are ignored.
#[instrument(level = "debug", skip_all, fields(questions = questions.len(), answers = answers.len()))]
pub fn correct_quiz(questions: &[Question], answers: &HashMap<usize, Answer>) -> QuizResult {
    let unanswered = Answer::Unanswered;
    let results: Vec<ScoreResult> = questions
        .iter()
        .enumerate()
        .map(|(idx, q)| score_question(q, answers.get(&idx).unwrap_or(&unanswered)))
        .collect();

    let total_score: f64 = results.iter().map(|r| r.score).sum();
    let max_score = questions.len();
    let percentage = if max_score > 0 {
        total_score / max_score as f64 * 100.0
    } else {
        0.0
    };

    debug!(target: "quiz", total_score, max_score, percentage, "Quiz corrected");
    QuizResult { results, total_score, max_score, percentage }
}
