//! Candidate source SPI and the local rule-based implementation.

use crate::engine::extractor::{extract_candidates_with_span, DEFAULT_SPAN_MINUTES};
use crate::model::event::CandidateEvent;
use crate::service::error::ScheduleError;

/// Produces unvalidated candidates from free text.
///
/// Implementations may be local (rule engine) or remote (generative model);
/// either way the service validates their output before returning it.
pub trait CandidateSource {
    /// Short identifier used in log lines, e.g. `rules`.
    fn source_id(&self) -> &str;

    /// Extracts candidates. An empty result means "nothing recognizable"
    /// and is not an error.
    fn extract(&self, text: &str) -> Result<Vec<CandidateEvent>, ScheduleError>;
}

/// Deterministic keyword/time-expression extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleBasedSource {
    default_span_minutes: u32,
}

impl RuleBasedSource {
    pub fn new() -> Self {
        Self {
            default_span_minutes: DEFAULT_SPAN_MINUTES,
        }
    }

    /// Overrides the span given to a time without an end partner.
    pub fn with_default_span(mut self, minutes: u32) -> Self {
        self.default_span_minutes = minutes;
        self
    }

    /// Span given to a time without an end partner.
    pub fn default_span_minutes(&self) -> u32 {
        self.default_span_minutes
    }
}

impl Default for RuleBasedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateSource for RuleBasedSource {
    fn source_id(&self) -> &str {
        "rules"
    }

    fn extract(&self, text: &str) -> Result<Vec<CandidateEvent>, ScheduleError> {
        Ok(extract_candidates_with_span(text, self.default_span_minutes))
    }
}
