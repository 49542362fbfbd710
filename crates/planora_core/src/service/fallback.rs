//! Deterministic sample schedule used when nothing can be extracted.
//!
//! Callers always see it flagged as `ScheduleSource::Fallback`.

use crate::engine::normalizer::normalize;
use crate::engine::validator::validate_all;
use crate::model::event::{CandidateEvent, ScheduleEvent};

/// Sample day as unvalidated candidates.
pub fn fallback_candidates() -> Vec<CandidateEvent> {
    vec![
        CandidateEvent::new("Morning Gym", "07:00", 60, "exercise")
            .with_location("Fitness Center")
            .with_notes("Remember to bring water bottle"),
        CandidateEvent::new("Coffee with Sarah", "10:00", 60, "meeting")
            .with_location("Starbucks Downtown")
            .with_notes("Discuss project timeline"),
        CandidateEvent::new("Work on Project", "11:30", 90, "work")
            .with_notes("Focus on UI components"),
        CandidateEvent::new("Lunch Break", "13:00", 60, "meal").with_location("Deli on 5th"),
        CandidateEvent::new("Evening Walk", "18:00", 30, "leisure").with_location("Central Park"),
    ]
}

/// Sample day, validated and in canonical order.
pub fn fallback_schedule() -> Vec<ScheduleEvent> {
    normalize(validate_all(&fallback_candidates()).accepted)
}
