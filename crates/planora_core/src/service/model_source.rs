//! Generative-model candidate source.
//!
//! # Responsibility
//! - Render the schedule prompt and call an injected `ModelClient`.
//! - Parse the model's JSON answer into loosely typed candidates.
//! - Classify client failures as overload (retryable) or generic.
//!
//! # Invariants
//! - No network code lives here; transport is the client's concern.
//! - Parsed candidates are not trusted: the service validates them like any
//!   other source.

use crate::model::event::{CandidateEvent, RawDuration};
use crate::service::error::ScheduleError;
use crate::service::source::CandidateSource;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROMPT_TEMPLATE: &str = "Convert the text below into a one-day schedule.
Respond with a JSON array only, no prose and no markdown.
Each element must have exactly these fields:
  \"title\": short descriptive name, at most 50 characters
  \"startTime\": 24-hour clock time formatted HH:mm
  \"duration\": whole minutes, 0 or more
  \"type\": one of exercise, work, meeting, meal, leisure

Text: {text}";

const OVERLOAD_MARKERS: &[&str] = &["quota", "overloaded", "rate limit", "429"];

static CODE_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?[ \t]*\r?\n?").expect("valid code fence regex"));

/// Failure reported by a model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelClientError {
    /// Transport status code when one exists (e.g. HTTP 429).
    pub status: Option<u16>,
    pub message: String,
}

impl ModelClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Whether the failure signals overload, quota or rate limiting.
    pub fn is_overload(&self) -> bool {
        if matches!(self.status, Some(429) | Some(503)) {
            return true;
        }
        let lowered = self.message.to_ascii_lowercase();
        OVERLOAD_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }
}

impl Display for ModelClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "status {status}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for ModelClientError {}

impl From<ModelClientError> for ScheduleError {
    fn from(value: ModelClientError) -> Self {
        if value.is_overload() {
            Self::UpstreamOverloaded(value.to_string())
        } else {
            Self::Upstream(value.to_string())
        }
    }
}

/// Text-in/text-out generative model.
pub trait ModelClient {
    fn generate(&self, prompt: &str) -> Result<String, ModelClientError>;
}

/// Candidate source backed by a generative model.
pub struct ModelBackedSource<C: ModelClient> {
    client: C,
}

impl<C: ModelClient> ModelBackedSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: ModelClient> CandidateSource for ModelBackedSource<C> {
    fn source_id(&self) -> &str {
        "model"
    }

    fn extract(&self, text: &str) -> Result<Vec<CandidateEvent>, ScheduleError> {
        let prompt = render_prompt(text);
        let raw = self.client.generate(prompt.as_str()).map_err(|err| {
            warn!(
                "event=model_generate module=service status=error overload={} status_code={}",
                err.is_overload(),
                err.status.map_or_else(|| "none".to_string(), |s| s.to_string())
            );
            ScheduleError::from(err)
        })?;
        debug!(
            "event=model_generate module=service status=ok response_chars={}",
            raw.chars().count()
        );
        parse_model_response(raw.as_str())
    }
}

/// Renders the schedule prompt for `text`.
pub fn render_prompt(text: &str) -> String {
    PROMPT_TEMPLATE.replace("{text}", text.trim())
}

/// Parses a model answer into candidates.
///
/// Accepts a bare JSON array or one wrapped in markdown code fences.
/// Array elements with wrong field types become candidates with those fields
/// missing, so the validator can reject them individually.
///
/// # Errors
/// - `MalformedResponse` when the body is not JSON or not an array.
pub fn parse_model_response(raw: &str) -> Result<Vec<CandidateEvent>, ScheduleError> {
    let cleaned = CODE_FENCE_RE.replace_all(raw.trim(), "");
    let value: Value = serde_json::from_str(cleaned.trim())
        .map_err(|err| ScheduleError::MalformedResponse(err.to_string()))?;
    match value {
        Value::Array(items) => Ok(items.iter().map(candidate_from_value).collect()),
        other => Err(ScheduleError::MalformedResponse(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn candidate_from_value(value: &Value) -> CandidateEvent {
    let Value::Object(fields) = value else {
        return CandidateEvent::default();
    };
    CandidateEvent {
        title: string_field(fields, "title"),
        start_time: string_field(fields, "startTime"),
        duration: match fields.get("duration") {
            Some(Value::Number(number)) => number
                .as_i64()
                .map(RawDuration::Integer)
                .or_else(|| number.as_f64().map(RawDuration::Float)),
            Some(Value::String(text)) => Some(RawDuration::Text(text.clone())),
            _ => None,
        },
        end_time: string_field(fields, "endTime"),
        event_type: string_field(fields, "type"),
        location: string_field(fields, "location"),
        notes: string_field(fields, "notes"),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(text)) => Some(text.clone()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
