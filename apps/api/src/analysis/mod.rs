// Readiness analysis: prompt construction, the single provider call, and the
// `POST /api/analyze` handler. All LLM calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
