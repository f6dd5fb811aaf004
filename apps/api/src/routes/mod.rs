pub mod health;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::{handle_analyze, MAX_BODY_BYTES};
use crate::form::handlers::{handle_form_page, handle_form_submit, FormContext};
use crate::form::transport::{AnalyzeTransport, ApiTransport, ANALYZE_PATH};
use crate::state::AppState;

/// JSON API: health and analysis.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            ANALYZE_PATH,
            post(handle_analyze).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

/// Full application router: the API plus the readiness page.
///
/// Without an explicit transport the page calls the API router in-process.
pub fn build_router(state: AppState, transport: Option<Arc<dyn AnalyzeTransport>>) -> Router {
    let api = api_router(state);
    let transport = transport.unwrap_or_else(|| {
        let in_process: Arc<dyn AnalyzeTransport> = Arc::new(ApiTransport::new(api.clone()));
        in_process
    });

    Router::new()
        .route("/", get(handle_form_page).post(handle_form_submit))
        .with_state(FormContext { transport })
        .merge(api)
}
