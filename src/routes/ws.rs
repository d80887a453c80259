//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug, warn};

use crate::protocol::{ClientWsMessage, QuizOut, QuizResultOut, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "quizgen_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "quizgen_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "quizgen_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state)
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "quizgen_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => {
        if let Err(e) = socket.send(Message::Pong(payload)).await {
          error!(target: "quizgen_backend", error = %e, "WS pong send error");
          break;
        }
      }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "quizgen_backend", "WebSocket disconnected");
}

/// Dispatch one parsed client message. Sampling and scoring are in-memory,
/// so this runs synchronously inside the socket task.
pub fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::ListTags => ServerWsMessage::Tags { tags: list_tags(&state.store) },

    ClientWsMessage::NewQuiz { tags, count } => {
      let count = state.limits.clamp(count);
      let questions = sample_quiz(&state.store, &tags, count);
      info!(target: "quiz", count, served = questions.len(), "WS new_quiz served");
      ServerWsMessage::Quiz(QuizOut::from_questions(&questions))
    }

    ClientWsMessage::SubmitQuiz(submission) => match score_submission(&state.store, &submission) {
      Ok(result) => {
        info!(target: "quiz", total_score = result.total_score, max_score = result.max_score, "WS submit_quiz scored");
        ServerWsMessage::QuizResult(QuizResultOut::from(result))
      }
      Err(e) => {
        warn!(target: "quiz", error = %e, "WS quiz submission rejected");
        ServerWsMessage::Error { message: e.to_string() }
      }
    },
  }
}
