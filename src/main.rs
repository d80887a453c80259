//! Quizgen · quiz backend
//!
//! - Axum HTTP + WebSocket API over the quiz core
//! - Static frontend fallback (`static_dir`/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   QUIZ_CONFIG_PATH  : path to TOML config (dataset path, static dir, quiz limits)
//!   QUIZ_DATASET_PATH : dataset JSON file, overrides the config (default "quiz_dataset.json")
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

use quizgen_backend::config::AppConfig;
use quizgen_backend::routes::build_router;
use quizgen_backend::state::AppState;
use quizgen_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = AppConfig::from_env();

  // The dataset is loaded once; without it there is nothing to serve.
  let state = match AppState::from_config(&cfg) {
    Ok(s) => Arc::new(s),
    Err(e) => {
      error!(target: "quizgen_backend", dataset = %cfg.dataset_path.display(), error = %e, "Cannot start without a valid quiz dataset");
      return Err(e.into());
    }
  };

  let app = build_router(state, &cfg.static_dir);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizgen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(target: "quizgen_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "quizgen_backend", "Shutdown signal received");
}
