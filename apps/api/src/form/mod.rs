//! The readiness form: field state, one-shot submission, and the tagged outcome
//! the page renders from.

pub mod handlers;
pub mod render;
pub mod transport;

use serde_json::Value;
use tracing::{debug, warn};

use crate::form::transport::AnalyzeTransport;
use crate::models::analysis::{AnalysisRequest, AnalysisResult, Country};

/// Shown for transport failures and bodies that are not JSON.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// What the last submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(AnalysisResult),
    Failure(String),
}

impl Outcome {
    /// Classifies an endpoint response body. Status codes are not consulted:
    /// an `error` field means failure, any other JSON means success.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => return Outcome::Failure(GENERIC_FAILURE_MESSAGE.to_string()),
        };

        match value.get("error") {
            None | Some(Value::Null) => Outcome::Success(AnalysisResult::from_json(&value)),
            Some(Value::String(message)) => Outcome::Failure(message.clone()),
            Some(_) => Outcome::Failure(GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub fields: AnalysisRequest,
    pub outcome: Option<Outcome>,
    pub in_flight: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(AnalysisRequest {
            country: Country::default().value().to_string(),
            ..AnalysisRequest::default()
        })
    }
}

impl FormState {
    pub fn new(fields: AnalysisRequest) -> Self {
        Self {
            fields,
            outcome: None,
            in_flight: false,
        }
    }

    /// Role, experience, and resume must be filled in, and no request may be pending.
    pub fn can_submit(&self) -> bool {
        !self.in_flight
            && !self.fields.role.trim().is_empty()
            && !self.fields.experience.trim().is_empty()
            && !self.fields.resume.trim().is_empty()
    }

    /// Sends the current fields once. Returns `false` without touching the
    /// transport when the form is not submittable.
    pub async fn submit(&mut self, transport: &dyn AnalyzeTransport) -> bool {
        if !self.can_submit() {
            return false;
        }

        self.outcome = None;
        self.in_flight = true;

        let outcome = match transport.send(&self.fields).await {
            Ok(response) => {
                debug!("Analysis endpoint answered with status {}", response.status);
                Outcome::from_body(&response.body)
            }
            Err(e) => {
                warn!("Analysis request failed: {e}");
                Outcome::Failure(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };

        self.in_flight = false;
        self.outcome = Some(outcome);
        true
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.outcome {
            Some(Outcome::Success(result)) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failure(message)) => Some(message.as_str()),
            _ => None,
        }
    }
}
