//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, Mode, Question};
use crate::error::RequestError;
use crate::scorer::{Breakdown, QuizResult};

/// Shown when a tag filter matches nothing.
pub const NO_QUESTIONS_MESSAGE: &str = "No questions found for selected topics.";

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListTags,
    NewQuiz {
        #[serde(default)]
        tags: BTreeSet<String>,
        #[serde(default)]
        count: Option<i64>,
    },
    SubmitQuiz(ScoreIn),
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Tags { tags: Vec<String> },
    Quiz(QuizOut),
    QuizResult(QuizResultOut),
    Error { message: String },
}

/// Question as delivered to the quiz taker. Correct answers stay server-side
/// until the quiz is scored.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QuestionOut {
    pub id: usize,
    pub question: String,
    pub choices: Vec<String>,
    pub mode: Mode,
    pub tags: BTreeSet<String>,
}

pub fn to_out(q: &Question) -> QuestionOut {
    QuestionOut {
        id: q.id,
        question: q.text.clone(),
        choices: q.choices.clone(),
        mode: q.mode,
        tags: q.tags.clone(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Serialize, Deserialize)]
pub struct TagsOut {
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizOut {
    pub questions: Vec<QuestionOut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QuizOut {
    pub fn from_questions(questions: &[Question]) -> Self {
        let message = questions.is_empty().then(|| NO_QUESTIONS_MESSAGE.to_string());
        Self { questions: questions.iter().map(to_out).collect(), message }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreIn {
    #[serde(rename = "questionIds")]
    pub question_ids: Vec<usize>,
    /// Keyed by position in `question_ids`, as a decimal string ("0", "1", ...).
    #[serde(default)]
    pub answers: HashMap<String, Answer>,
}

impl ScoreIn {
    /// Answers keyed by quiz position. Only canonical decimal keys are
    /// accepted, so no two keys can name the same position.
    pub fn indexed_answers(&self) -> Result<HashMap<usize, Answer>, RequestError> {
        self.answers
            .iter()
            .map(|(k, v)| match k.parse::<usize>() {
                Ok(idx) if idx.to_string() == *k => Ok((idx, v.clone())),
                _ => Err(RequestError::BadAnswerIndex(k.clone())),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResultOut {
    #[serde(flatten)]
    pub result: QuizResult,
    pub correct_count: usize,
    pub breakdown: Breakdown,
}

impl From<QuizResult> for QuizResultOut {
    fn from(result: QuizResult) -> Self {
        Self { correct_count: result.correct_count(), breakdown: result.breakdown(), result }
    }
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub questions: usize,
}
