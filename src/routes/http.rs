//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use tracing::{info, instrument, warn};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, questions: state.store.len() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_tags(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(TagsOut { tags: list_tags(&state.store) })
}

#[instrument(level = "info", skip(state, body), fields(tags = body.tags.len(), count = ?body.count))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizIn>,
) -> impl IntoResponse {
  let count = state.limits.clamp(body.count);
  let questions = sample_quiz(&state.store, &body.tags, count);
  info!(target: "quiz", count, served = questions.len(), "HTTP quiz served");
  Json(QuizOut::from_questions(&questions))
}

#[instrument(level = "info", skip(state, body), fields(questions = body.question_ids.len(), answers = body.answers.len()))]
pub async fn http_post_score(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ScoreIn>,
) -> Response {
  match score_submission(&state.store, &body) {
    Ok(result) => {
      info!(target: "quiz", total_score = result.total_score, max_score = result.max_score, "HTTP quiz scored");
      Json(QuizResultOut::from(result)).into_response()
    }
    Err(e) => {
      warn!(target: "quiz", error = %e, "HTTP quiz submission rejected");
      (StatusCode::BAD_REQUEST, Json(ErrorOut { error: e.to_string() })).into_response()
    }
  }
}
