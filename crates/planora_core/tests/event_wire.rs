use planora_core::{revalidate_schedule, CandidateEvent, ClockTime, EventType, ScheduleEvent};
use serde_json::json;

#[test]
fn schedule_event_serializes_with_external_field_names() {
    let event: ScheduleEvent = CandidateEvent::new("Morning Gym", "07:00", 60, "Exercise")
        .try_into()
        .unwrap();

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        json!({
            "title": "Morning Gym",
            "startTime": "07:00",
            "duration": 60,
            "type": "exercise"
        })
    );
}

#[test]
fn optional_fields_are_emitted_only_when_present() {
    let event: ScheduleEvent = CandidateEvent::new("Lunch", "13:00", 60, "meal")
        .with_location("Deli on 5th")
        .try_into()
        .unwrap();
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["location"], "Deli on 5th");
    assert!(value.get("notes").is_none());
}

#[test]
fn deserialize_runs_the_validator() {
    let err = serde_json::from_value::<ScheduleEvent>(json!({
        "title": "X",
        "startTime": "10:00",
        "duration": 10,
        "type": "sleep"
    }))
    .unwrap_err();
    assert!(
        err.to_string().contains("invalid event type `sleep`"),
        "unexpected error: {err}"
    );

    let err = serde_json::from_value::<ScheduleEvent>(json!({
        "title": "X",
        "startTime": "25:00",
        "duration": 10,
        "type": "work"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("invalid time `25:00`"), "unexpected error: {err}");
}

#[test]
fn deserialize_coerces_loose_input() {
    let event = serde_json::from_value::<ScheduleEvent>(json!({
        "title": "  Standup ",
        "startTime": "09:30",
        "duration": "15",
        "type": "MEETING"
    }))
    .unwrap();
    assert_eq!(event.title, "Standup");
    assert_eq!(event.duration, 15);
    assert_eq!(event.event_type, EventType::Meeting);
    assert_eq!(event.end_time().to_string(), "09:45");
}

#[test]
fn edited_end_time_on_the_wire_recomputes_duration() {
    let edited: CandidateEvent = serde_json::from_value(json!({
        "title": "Work on Project",
        "startTime": "11:30",
        "duration": 90,
        "endTime": "14:00",
        "type": "work"
    }))
    .unwrap();
    let events = revalidate_schedule(&[edited]).unwrap();
    assert_eq!(events[0].duration, 150);
    assert_eq!(events[0].end_time().to_string(), "14:00");
    assert!(serde_json::to_value(&events[0]).unwrap().get("endTime").is_none());

    let err = serde_json::from_value::<ScheduleEvent>(json!({
        "title": "Work on Project",
        "startTime": "11:30",
        "duration": 90,
        "endTime": "2pm",
        "type": "work"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("invalid time `2pm`"), "unexpected error: {err}");
}

#[test]
fn edited_end_time_flows_back_through_validation() {
    let mut event: ScheduleEvent = CandidateEvent::new("Work on Project", "11:30", 90, "work")
        .try_into()
        .unwrap();
    event.set_end_time(ClockTime::from_hm(14, 0).unwrap());

    let edited: Vec<CandidateEvent> = vec![event.to_candidate()];
    let events = revalidate_schedule(&edited).unwrap();
    assert_eq!(events[0].duration, 150);
    assert_eq!(events[0].end_time().to_string(), "14:00");
}

#[test]
fn candidate_wire_shape_accepts_partial_objects() {
    let candidate: CandidateEvent = serde_json::from_value(json!({ "title": "Nap" })).unwrap();
    assert_eq!(candidate.title.as_deref(), Some("Nap"));
    assert_eq!(candidate.start_time, None);
    assert_eq!(candidate.duration, None);
}
