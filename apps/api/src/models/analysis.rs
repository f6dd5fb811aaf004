use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target markets offered by the form. The endpoint itself accepts any text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Country {
    #[default]
    Uae,
    SaudiArabia,
    Qatar,
}

impl Country {
    pub const ALL: [Country; 3] = [Country::Uae, Country::SaudiArabia, Country::Qatar];

    /// Value sent in `AnalysisRequest.country`.
    pub fn value(self) -> &'static str {
        match self {
            Country::Uae => "UAE",
            Country::SaudiArabia => "Saudi Arabia",
            Country::Qatar => "Qatar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Country::Uae => "United Arab Emirates",
            Country::SaudiArabia => "Saudi Arabia",
            Country::Qatar => "Qatar",
        }
    }
}

/// Body of `POST /api/analyze`; also the page's urlencoded form fields.
///
/// The endpoint does not type-check fields: see [`AnalysisRequest::from_json`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub resume: String,
}

impl AnalysisRequest {
    /// Reads the four fields out of any JSON value without failing.
    /// Missing or null fields become `""`; other scalars and nested values are
    /// written as their JSON text. Non-object input yields all-empty fields.
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).map(text_of).unwrap_or_default();
        Self {
            role: field("role"),
            experience: field("experience"),
            country: field("country"),
            resume: field("resume"),
        }
    }
}

/// The readiness assessment as the form renders it.
///
/// The endpoint relays whatever JSON the model produced, so every field is
/// optional on the wire and falls back to an empty value here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    pub score: Option<i64>,
    pub summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub action_plan: Vec<String>,
}

impl AnalysisResult {
    /// Reads a result out of arbitrary JSON without failing.
    /// Non-object input yields the empty result.
    pub fn from_json(value: &Value) -> Self {
        Self {
            score: value.get("score").and_then(score_of),
            summary: value
                .get("summary")
                .map(text_of)
                .unwrap_or_default(),
            strengths: list_of(value.get("strengths")),
            gaps: list_of(value.get("gaps")),
            action_plan: list_of(value.get("action_plan")),
        }
    }
}

fn score_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn list_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(text_of)
            .collect(),
        _ => Vec::new(),
    }
}
