use std::sync::Arc;

use crate::llm_client::ChatProvider;

/// Shared application state injected into the API route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat provider built from the configured credential.
    /// `None` when `OPENAI_API_KEY` is unset; analysis then answers 500.
    pub llm: Option<Arc<dyn ChatProvider>>,
}
