//! Application state: the loaded question store and quiz limits.
//!
//! The store is loaded exactly once at startup and never written afterwards,
//! so handlers share it through an `Arc` without any locking.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{AppConfig, QuizLimits};
use crate::error::DataError;
use crate::store::QuestionStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<QuestionStore>,
    pub limits: QuizLimits,
}

impl AppState {
    pub fn new(store: QuestionStore, limits: QuizLimits) -> Self {
        Self { store: Arc::new(store), limits }
    }

    /// Load the dataset named by `cfg`. Fails if the dataset is missing or malformed.
    #[instrument(level = "info", skip_all, fields(dataset = %cfg.dataset_path.display()))]
    pub fn from_config(cfg: &AppConfig) -> Result<Self, DataError> {
        let store = QuestionStore::load(&cfg.dataset_path)?;
        info!(
            target: "quiz",
            questions = store.len(),
            tags = store.all_tags().len(),
            default_count = cfg.quiz.default_count,
            min_count = cfg.quiz.min_count,
            max_count = cfg.quiz.max_count,
            "Startup question inventory"
        );
        Ok(Self::new(store, cfg.quiz))
    }
}
