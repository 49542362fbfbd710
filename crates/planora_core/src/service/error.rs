//! Aggregate failures of schedule generation.
//!
//! # Responsibility
//! - Classify failures that reach callers of the extraction service.
//! - Provide stable codes and a JSON error body for transport layers.
//!
//! # Invariants
//! - Field-level `ValidationError`s never appear here; they are handled per
//!   candidate inside the service.
//! - `code()` values are stable wire identifiers.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one `generate_schedule` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Input text is empty or whitespace-only.
    EmptyInput,
    /// No candidate survived validation. `rejected` counts dropped candidates
    /// (zero when nothing was extracted and fallback is disabled).
    NoValidEvents { rejected: usize },
    /// External model reported overload, quota or rate limiting.
    UpstreamOverloaded(String),
    /// External model failed for any other reason.
    Upstream(String),
    /// External model answered with something other than a JSON event array.
    MalformedResponse(String),
}

impl ScheduleError {
    /// Stable machine-readable code for error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::NoValidEvents { .. } => "NO_VALID_EVENTS",
            Self::UpstreamOverloaded(_) => "MODEL_OVERLOADED",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::MalformedResponse(_) => "MALFORMED_MODEL_RESPONSE",
        }
    }

    /// Suggested HTTP status for transport layers.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::EmptyInput => 400,
            Self::NoValidEvents { .. } => 422,
            Self::UpstreamOverloaded(_) => 503,
            Self::Upstream(_) | Self::MalformedResponse(_) => 502,
        }
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamOverloaded(_))
    }

    /// Builds the `{ error, message }` body.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "text input is required"),
            Self::NoValidEvents { rejected } => {
                write!(f, "no valid events found ({rejected} candidate(s) rejected)")
            }
            Self::UpstreamOverloaded(details) => write!(
                f,
                "the schedule model is currently overloaded, please try again later: {details}"
            ),
            Self::Upstream(details) => write!(f, "schedule model failed: {details}"),
            Self::MalformedResponse(details) => {
                write!(f, "schedule model returned an invalid response: {details}")
            }
        }
    }
}

impl Error for ScheduleError {}

/// JSON error body returned at transport boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable code from `ScheduleError::code`.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}
