//! Canonical ordering and overlap reporting.
//!
//! # Responsibility
//! - Put validated events into canonical presentation order.
//! - Report (never resolve) overlapping events in a separate pass.
//!
//! # Invariants
//! - Sorting is stable: equal start times keep their input order.
//! - `normalize` is idempotent.

use crate::model::clock::MINUTES_PER_DAY;
use crate::model::event::ScheduleEvent;
use serde::Serialize;

/// Sorts events by start time ascending, keeping input order on ties.
///
/// End times are derived on read by `ScheduleEvent::end_time`.
pub fn normalize(mut events: Vec<ScheduleEvent>) -> Vec<ScheduleEvent> {
    events.sort_by_key(|event| event.start_time);
    events
}

/// Two events whose time ranges intersect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapWarning {
    /// Index of the earlier event in the inspected slice.
    pub first: usize,
    /// Index of the later event in the inspected slice.
    pub second: usize,
    /// Shared minutes between the two events.
    pub overlap_minutes: u32,
}

/// Finds every pair of intersecting events.
///
/// Events crossing midnight are treated as ending at 24:00, since the
/// schedule models a single implicit day. Zero-length events never overlap.
pub fn find_overlaps(events: &[ScheduleEvent]) -> Vec<OverlapWarning> {
    let ranges: Vec<(u32, u32)> = events.iter().map(day_range).collect();
    let mut warnings = Vec::new();
    for (first, &(first_start, first_end)) in ranges.iter().enumerate() {
        for (offset, &(second_start, second_end)) in ranges[first + 1..].iter().enumerate() {
            let shared_start = first_start.max(second_start);
            let shared_end = first_end.min(second_end);
            if shared_end > shared_start {
                warnings.push(OverlapWarning {
                    first,
                    second: first + 1 + offset,
                    overlap_minutes: shared_end - shared_start,
                });
            }
        }
    }
    warnings
}

fn day_range(event: &ScheduleEvent) -> (u32, u32) {
    let start = event.start_time.minute_of_day();
    let end = start.saturating_add(event.duration).min(MINUTES_PER_DAY);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::{find_overlaps, normalize, OverlapWarning};
    use crate::model::clock::ClockTime;
    use crate::model::event::{EventType, ScheduleEvent};

    fn event(title: &str, start: &str, duration: u32) -> ScheduleEvent {
        ScheduleEvent {
            title: title.to_string(),
            start_time: ClockTime::parse_hhmm(start).unwrap(),
            duration,
            event_type: EventType::Leisure,
            location: None,
            notes: None,
        }
    }

    fn titles(events: &[ScheduleEvent]) -> Vec<&str> {
        events.iter().map(|event| event.title.as_str()).collect()
    }

    #[test]
    fn sorts_stably_by_start_time() {
        let sorted = normalize(vec![
            event("late", "18:00", 30),
            event("tie-a", "09:00", 10),
            event("early", "07:00", 60),
            event("tie-b", "09:00", 5),
        ]);
        assert_eq!(titles(&sorted), vec!["early", "tie-a", "tie-b", "late"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(vec![
            event("b", "10:00", 10),
            event("a", "08:00", 10),
            event("c", "10:00", 20),
        ]);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn normalized_events_end_at_start_plus_duration() {
        for item in normalize(vec![event("night", "23:30", 90), event("day", "09:15", 50)]) {
            assert_eq!(item.end_time(), item.start_time.add_minutes(item.duration));
        }
    }

    #[test]
    fn reports_overlaps_without_touching_events() {
        let events = normalize(vec![
            event("gym", "07:00", 60),
            event("breakfast", "07:30", 30),
            event("commute", "08:00", 30),
        ]);
        let warnings = find_overlaps(&events);
        assert_eq!(
            warnings,
            vec![OverlapWarning {
                first: 0,
                second: 1,
                overlap_minutes: 30
            }]
        );
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn midnight_crossing_event_is_clamped_to_day_end() {
        let events = vec![event("party", "23:00", 180), event("early", "00:30", 30)];
        assert!(find_overlaps(&events).is_empty());
    }
}
