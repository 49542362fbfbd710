//! Core schedule extraction engine for Planora.
//! This crate is the single source of truth for the event schema and its
//! invariants.

pub mod engine;
pub mod logging;
pub mod model;
pub mod service;

pub use engine::extractor::{extract_candidates, extract_candidates_with_span};
pub use engine::normalizer::{find_overlaps, normalize, OverlapWarning};
pub use engine::time_parser::{parse_time_expression, TimeParseError};
pub use engine::validator::{validate, validate_all, ValidationError, ValidationReport};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::clock::{ClockTime, MINUTES_PER_DAY};
pub use model::event::{CandidateEvent, EventType, RawDuration, ScheduleEvent};
pub use service::error::{ErrorBody, ScheduleError};
pub use service::fallback::fallback_schedule;
pub use service::model_source::{
    parse_model_response, ModelBackedSource, ModelClient, ModelClientError,
};
pub use service::schedule_service::{
    generate_schedule, revalidate_schedule, EditRejected, ExtractionOptions, FallbackPolicy,
    GeneratedSchedule, ScheduleService, ScheduleSource,
};
pub use service::source::{CandidateSource, RuleBasedSource};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
