//! Analyzer: turns one `AnalysisRequest` into the model's JSON verdict.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::analysis::prompts::{resume_message, system_prompt};
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, ChatProvider};
use crate::models::analysis::AnalysisRequest;

/// Builds the prompt pair, makes exactly one provider call, and parses the reply.
///
/// Model output that is not JSON degrades to `{}` instead of failing the
/// request. Provider failures surface as `AppError::Llm`.
pub async fn analyze_profile(
    provider: &dyn ChatProvider,
    request: &AnalysisRequest,
) -> Result<Value, AppError> {
    let system = system_prompt(&request.role, &request.country, &request.experience);
    let user = resume_message(&request.resume);

    let content = provider.complete_json(&system, &user).await?;
    let result = parse_model_output(content.as_deref());

    info!(
        role = %request.role,
        country = %request.country,
        "Profile analysis completed"
    );

    Ok(result)
}

/// Parses model text as JSON. Missing or unparsable content yields an empty object.
pub fn parse_model_output(content: Option<&str>) -> Value {
    let Some(text) = content else {
        return Value::Object(Map::new());
    };

    match serde_json::from_str(strip_json_fences(text)) {
        Ok(value) => value,
        Err(e) => {
            warn!("Model output was not valid JSON, returning empty result: {e}");
            Value::Object(Map::new())
        }
    }
}
