//! Axum route handlers for the readiness page.

use std::sync::Arc;

use axum::{extract::State, response::Html, Form};

use crate::form::render::render_page;
use crate::form::transport::AnalyzeTransport;
use crate::form::FormState;
use crate::models::analysis::AnalysisRequest;

/// State for the page routes: the transport used to reach `/api/analyze`.
#[derive(Clone)]
pub struct FormContext {
    pub transport: Arc<dyn AnalyzeTransport>,
}

/// GET /
pub async fn handle_form_page() -> Html<String> {
    Html(render_page(&FormState::default()))
}

/// POST /
///
/// Submits the posted fields to the analysis endpoint once (skipped when a
/// required field is empty) and re-renders the page with the outcome.
pub async fn handle_form_submit(
    State(ctx): State<FormContext>,
    Form(fields): Form<AnalysisRequest>,
) -> Html<String> {
    let mut state = FormState::new(fields);
    state.submit(ctx.transport.as_ref()).await;
    Html(render_page(&state))
}
