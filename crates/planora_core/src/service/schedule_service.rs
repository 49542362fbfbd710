//! Schedule generation use-case service.
//!
//! # Responsibility
//! - Compose source → validator → normalizer into `text -> schedule`.
//! - Own the drop-or-fail policy for invalid candidates.
//! - Own the fallback policy when nothing can be extracted.
//!
//! # Invariants
//! - Blank input fails with `EmptyInput` before any source is called.
//! - Invalid candidates are dropped and logged; the call fails only when
//!   every candidate is invalid.
//! - Returned events are always in canonical order.
//! - Fallback data is always flagged as `ScheduleSource::Fallback`.

use crate::engine::normalizer::{find_overlaps, normalize, OverlapWarning};
use crate::engine::validator::{validate, validate_all, ValidationError};
use crate::model::event::{CandidateEvent, ScheduleEvent};
use crate::service::error::ScheduleError;
use crate::service::fallback::fallback_schedule;
use crate::service::source::{CandidateSource, RuleBasedSource};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What to do when the source finds no candidates at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Return the sample schedule, flagged as fallback.
    #[default]
    Substitute,
    /// Fail with `NoValidEvents { rejected: 0 }`.
    Disabled,
}

/// Service configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub fallback: FallbackPolicy,
}

/// Where the returned events came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// Events were extracted from the caller's text.
    Extracted,
    /// Nothing was extractable; events are the sample schedule.
    Fallback,
}

/// Successful generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSchedule {
    /// Canonical schedule, sorted by start time.
    pub events: Vec<ScheduleEvent>,
    pub source: ScheduleSource,
    /// Overlapping pairs, indices into `events`.
    pub warnings: Vec<OverlapWarning>,
    /// Number of candidates dropped by validation.
    pub rejected: usize,
}

impl GeneratedSchedule {
    pub fn is_fallback(&self) -> bool {
        self.source == ScheduleSource::Fallback
    }
}

/// Use-case service wrapping one candidate source.
pub struct ScheduleService<S: CandidateSource> {
    source: S,
    options: ExtractionOptions,
}

impl<S: CandidateSource> ScheduleService<S> {
    /// Creates a service with default options (fallback enabled).
    pub fn new(source: S) -> Self {
        Self::with_options(source, ExtractionOptions::default())
    }

    pub fn with_options(source: S, options: ExtractionOptions) -> Self {
        Self { source, options }
    }

    /// Generates the canonical schedule for `text`.
    ///
    /// # Errors
    /// - `EmptyInput` for blank text.
    /// - `NoValidEvents` when every candidate fails validation, or when none
    ///   were found and fallback is disabled.
    /// - Source errors (`UpstreamOverloaded`, `Upstream`, `MalformedResponse`)
    ///   are returned unchanged.
    pub fn generate_schedule(&self, text: &str) -> Result<GeneratedSchedule, ScheduleError> {
        let source_id = self.source.source_id();
        if text.trim().is_empty() {
            warn!("event=generate_schedule module=service status=rejected source={source_id} code=EMPTY_INPUT");
            return Err(ScheduleError::EmptyInput);
        }

        let candidates = self.source.extract(text)?;
        if candidates.is_empty() {
            return self.without_candidates(source_id);
        }

        let report = validate_all(&candidates);
        for (index, err) in &report.rejected {
            warn!(
                "event=candidate_dropped module=service source={source_id} index={index} code={} reason={err}",
                err.code()
            );
        }
        if report.accepted.is_empty() {
            let rejected = report.rejected.len();
            warn!("event=generate_schedule module=service status=error source={source_id} code=NO_VALID_EVENTS rejected={rejected}");
            return Err(ScheduleError::NoValidEvents { rejected });
        }

        let events = normalize(report.accepted);
        let warnings = find_overlaps(&events);
        info!(
            "event=generate_schedule module=service status=ok source={source_id} events={} rejected={} overlaps={}",
            events.len(),
            report.rejected.len(),
            warnings.len()
        );
        Ok(GeneratedSchedule {
            events,
            source: ScheduleSource::Extracted,
            warnings,
            rejected: report.rejected.len(),
        })
    }

    fn without_candidates(&self, source_id: &str) -> Result<GeneratedSchedule, ScheduleError> {
        match self.options.fallback {
            FallbackPolicy::Substitute => {
                let events = fallback_schedule();
                let warnings = find_overlaps(&events);
                info!(
                    "event=generate_schedule module=service status=fallback source={source_id} events={}",
                    events.len()
                );
                Ok(GeneratedSchedule {
                    events,
                    source: ScheduleSource::Fallback,
                    warnings,
                    rejected: 0,
                })
            }
            FallbackPolicy::Disabled => {
                warn!("event=generate_schedule module=service status=error source={source_id} code=NO_VALID_EVENTS rejected=0");
                Err(ScheduleError::NoValidEvents { rejected: 0 })
            }
        }
    }
}

/// Generates a schedule with the rule-based source and default options.
pub fn generate_schedule(text: &str) -> Result<GeneratedSchedule, ScheduleError> {
    ScheduleService::new(RuleBasedSource::new()).generate_schedule(text)
}

/// One edited event failed re-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRejected {
    /// Position of the offending event in the submitted list.
    pub index: usize,
    pub error: ValidationError,
}

impl Display for EditRejected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "edited event #{} is invalid: {}", self.index, self.error)
    }
}

impl Error for EditRejected {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Re-validates a user-edited schedule, all or nothing.
///
/// Unlike generation, edits are never silently dropped: the first invalid
/// event rejects the whole submission.
pub fn revalidate_schedule(edited: &[CandidateEvent]) -> Result<Vec<ScheduleEvent>, EditRejected> {
    let events = edited
        .iter()
        .enumerate()
        .map(|(index, candidate)| validate(candidate).map_err(|error| EditRejected { index, error }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(normalize(events))
}

#[cfg(test)]
mod tests {
    use super::{
        revalidate_schedule, ExtractionOptions, FallbackPolicy, ScheduleService, ScheduleSource,
    };
    use crate::engine::validator::ValidationError;
    use crate::model::event::CandidateEvent;
    use crate::service::error::ScheduleError;
    use crate::service::source::CandidateSource;

    struct FixedSource(Vec<CandidateEvent>);

    impl CandidateSource for FixedSource {
        fn source_id(&self) -> &str {
            "fixed"
        }

        fn extract(&self, _text: &str) -> Result<Vec<CandidateEvent>, ScheduleError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn drops_invalid_candidates_and_sorts_the_rest() {
        let service = ScheduleService::new(FixedSource(vec![
            CandidateEvent::new("Dinner", "19:00", 60, "meal"),
            CandidateEvent::new("Nap", "15:00", 30, "sleep"),
            CandidateEvent::new("Standup", "09:00", 15, "MEETING"),
        ]));
        let schedule = service.generate_schedule("anything").unwrap();
        assert_eq!(schedule.source, ScheduleSource::Extracted);
        assert_eq!(schedule.rejected, 1);
        let titles: Vec<_> = schedule.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Standup", "Dinner"]);
    }

    #[test]
    fn all_invalid_candidates_fail() {
        let service = ScheduleService::new(FixedSource(vec![
            CandidateEvent::new("", "10:00", 10, "work"),
            CandidateEvent::new("X", "10:00", -1, "work"),
        ]));
        assert_eq!(
            service.generate_schedule("anything").unwrap_err(),
            ScheduleError::NoValidEvents { rejected: 2 }
        );
    }

    #[test]
    fn blank_text_never_reaches_the_source() {
        struct PanickingSource;
        impl CandidateSource for PanickingSource {
            fn source_id(&self) -> &str {
                "panicking"
            }
            fn extract(&self, _text: &str) -> Result<Vec<CandidateEvent>, ScheduleError> {
                panic!("source must not be called for blank input");
            }
        }
        let service = ScheduleService::new(PanickingSource);
        assert_eq!(
            service.generate_schedule(" \n\t ").unwrap_err(),
            ScheduleError::EmptyInput
        );
    }

    #[test]
    fn empty_extraction_follows_fallback_policy() {
        let substitute = ScheduleService::new(FixedSource(Vec::new()));
        let schedule = substitute.generate_schedule("no times").unwrap();
        assert!(schedule.is_fallback());
        assert_eq!(schedule.events.len(), 5);

        let disabled = ScheduleService::with_options(
            FixedSource(Vec::new()),
            ExtractionOptions {
                fallback: FallbackPolicy::Disabled,
            },
        );
        assert_eq!(
            disabled.generate_schedule("no times").unwrap_err(),
            ScheduleError::NoValidEvents { rejected: 0 }
        );
    }

    #[test]
    fn revalidate_rejects_whole_submission_on_first_error() {
        let err = revalidate_schedule(&[
            CandidateEvent::new("Gym", "07:00", 60, "exercise"),
            CandidateEvent::new("Gym", "7am", 60, "exercise"),
        ])
        .unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(
            err.error,
            ValidationError::InvalidTimeFormat("7am".to_string())
        );

        let events = revalidate_schedule(&[
            CandidateEvent::new("Lunch", "12:00", 60, "meal"),
            CandidateEvent::new("Gym", "07:00", 60, "exercise"),
        ])
        .unwrap();
        assert_eq!(events[0].title, "Gym");
    }
}
