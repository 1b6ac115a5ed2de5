use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::JsonModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The generative model behind question generation and answer analysis.
    /// `GeminiClient` in production, a stub in tests.
    pub model: Arc<dyn JsonModel>,
    pub config: Config,
}
