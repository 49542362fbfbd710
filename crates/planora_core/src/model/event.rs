//! Schedule event domain model.
//!
//! # Responsibility
//! - Define the canonical validated event and its loosely typed candidate.
//! - Keep the end time derived from start time and duration.
//!
//! # Invariants
//! - `ScheduleEvent::end_time()` is always `start_time + duration` modulo one day.
//! - Editing the end time recomputes `duration`; no end time is stored.
//! - A candidate carrying an edited `endTime` has its duration recomputed
//!   by the validator, never the other way round.
//! - Deserializing a `ScheduleEvent` runs the full validator.

use crate::model::clock::ClockTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Closed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Exercise,
    Work,
    Meeting,
    Meal,
    Leisure,
}

impl EventType {
    /// All accepted categories in wire order.
    pub const ALL: [EventType; 5] = [
        EventType::Exercise,
        EventType::Work,
        EventType::Meeting,
        EventType::Meal,
        EventType::Leisure,
    ];

    /// Parses a category name case-insensitively, ignoring surrounding whitespace.
    ///
    /// Unknown names return `None`; there is no default category.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized.as_str())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Work => "work",
            Self::Meeting => "meeting",
            Self::Meal => "meal",
            Self::Leisure => "leisure",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, validated schedule entry.
///
/// Fields are public for read access by boundary layers. Values built by hand
/// should be passed through `validate` (via `to_candidate`) before they are
/// handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CandidateEvent")]
pub struct ScheduleEvent {
    /// Trimmed display title, 1..=50 characters.
    pub title: String,
    /// Start of the event within the implicit day.
    pub start_time: ClockTime,
    /// Length in minutes.
    pub duration: u32,
    /// Serialized as `type` to match the external schema.
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduleEvent {
    /// Derived end time; crosses midnight when `start_time + duration >= 24:00`.
    pub fn end_time(&self) -> ClockTime {
        self.start_time.add_minutes(self.duration)
    }

    /// Moves the end of the event, recomputing `duration` as the forward
    /// distance from `start_time`. An end equal to the start yields `0`.
    pub fn set_end_time(&mut self, end: ClockTime) {
        self.duration = self.start_time.minutes_until(end);
    }

    /// Converts back into an unvalidated candidate, e.g. to re-submit an
    /// edited event through the validator.
    pub fn to_candidate(&self) -> CandidateEvent {
        CandidateEvent {
            title: Some(self.title.clone()),
            start_time: Some(self.start_time.to_string()),
            duration: Some(RawDuration::Integer(i64::from(self.duration))),
            end_time: None,
            event_type: Some(self.event_type.as_str().to_string()),
            location: self.location.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Duration value as it may arrive from extraction, a model or a UI form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Display for RawDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "`{value}`"),
        }
    }
}

/// Extracted, not yet validated event record.
///
/// Every field may be missing or malformed; `validate` decides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateEvent {
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<RawDuration>,
    /// Client-edited end; when present it overrides `duration`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CandidateEvent {
    /// Creates a candidate with the four required fields set.
    pub fn new(
        title: impl Into<String>,
        start_time: impl Into<String>,
        duration_minutes: i64,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            start_time: Some(start_time.into()),
            duration: Some(RawDuration::Integer(duration_minutes)),
            end_time: None,
            event_type: Some(event_type.into()),
            location: None,
            notes: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets an edited end time, as a form would after the user drags the end.
    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
