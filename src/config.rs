//! Loading server configuration (dataset location, static dir, quiz limits) from TOML.
//!
//! Every key is optional:
//!
//! ```toml
//! dataset_path = "data/quiz_dataset.json"
//! static_dir = "./static"
//!
//! [quiz]
//! default_count = 10
//! min_count = 5
//! max_count = 50
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
  #[serde(default = "default_dataset_path")]
  pub dataset_path: PathBuf,
  #[serde(default = "default_static_dir")]
  pub static_dir: PathBuf,
  #[serde(default)]
  pub quiz: QuizLimits,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      dataset_path: default_dataset_path(),
      static_dir: default_static_dir(),
      quiz: QuizLimits::default(),
    }
  }
}

fn default_dataset_path() -> PathBuf { PathBuf::from("quiz_dataset.json") }
fn default_static_dir() -> PathBuf { PathBuf::from("./static") }

/// Bounds applied to the requested quiz size at the API edge.
/// The sampler itself accepts any count.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuizLimits {
  pub default_count: i64,
  pub min_count: i64,
  pub max_count: i64,
}

impl Default for QuizLimits {
  fn default() -> Self {
    Self { default_count: 10, min_count: 5, max_count: 50 }
  }
}

impl QuizLimits {
  /// Missing count -> default; otherwise clamp into `[min_count, max_count]`.
  pub fn clamp(&self, requested: Option<i64>) -> i64 {
    match requested {
      None => self.default_count,
      Some(n) => n.max(self.min_count).min(self.max_count),
    }
  }
}

impl AppConfig {
  /// Build from env: QUIZ_CONFIG_PATH (TOML, optional), then QUIZ_DATASET_PATH override.
  pub fn from_env() -> Self {
    let mut cfg = load_config_from_env().unwrap_or_default();
    if let Ok(path) = std::env::var("QUIZ_DATASET_PATH") {
      cfg.dataset_path = PathBuf::from(path);
    }
    cfg
  }
}

/// Attempt to load `AppConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quizgen_backend", %path, "Loaded server config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizgen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizgen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
