use planora_core::{
    ModelBackedSource, ModelClient, ModelClientError, ScheduleError, ScheduleService,
    ScheduleSource,
};
use std::cell::RefCell;

struct StubClient {
    reply: Result<String, ModelClientError>,
    prompts: RefCell<Vec<String>>,
}

impl StubClient {
    fn replying(body: &str) -> Self {
        Self {
            reply: Ok(body.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    fn failing(err: ModelClientError) -> Self {
        Self {
            reply: Err(err),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl ModelClient for &StubClient {
    fn generate(&self, prompt: &str) -> Result<String, ModelClientError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.reply.clone()
    }
}

#[test]
fn model_output_is_validated_and_sorted() {
    let client = StubClient::replying(
        r#"```json
[
  {"title": "Lunch", "startTime": "12:30", "duration": 45, "type": "Meal"},
  {"title": "Gym", "startTime": "7:00", "duration": 60, "type": "exercise"},
  {"title": "Focus block", "startTime": "09:00", "duration": 120, "type": "work"}
]
```"#,
    );
    let service = ScheduleService::new(ModelBackedSource::new(&client));

    let schedule = service
        .generate_schedule("lunch at half past twelve, focus block at nine")
        .unwrap();

    assert_eq!(schedule.source, ScheduleSource::Extracted);
    assert_eq!(schedule.rejected, 1);
    let titles: Vec<&str> = schedule.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Focus block", "Lunch"]);

    let prompts = client.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("lunch at half past twelve"));
}

#[test]
fn overload_surfaces_as_retryable_error() {
    let client = StubClient::failing(ModelClientError::new("model is overloaded"));
    let service = ScheduleService::new(ModelBackedSource::new(&client));

    let err = service.generate_schedule("gym at 7am").unwrap_err();
    assert!(matches!(err, ScheduleError::UpstreamOverloaded(_)));
    assert_eq!(err.code(), "MODEL_OVERLOADED");
    assert_eq!(err.http_status(), 503);
    assert!(err.is_retryable());
}

#[test]
fn malformed_model_output_is_classified() {
    let client = StubClient::replying("I could not build a schedule.");
    let service = ScheduleService::new(ModelBackedSource::new(&client));

    let err = service.generate_schedule("gym at 7am").unwrap_err();
    assert_eq!(err.code(), "MALFORMED_MODEL_RESPONSE");
}

#[test]
fn empty_model_array_uses_flagged_fallback() {
    let client = StubClient::replying("[]");
    let service = ScheduleService::new(ModelBackedSource::new(&client));

    let schedule = service.generate_schedule("nothing planned").unwrap();
    assert!(schedule.is_fallback());
}

#[test]
fn blank_text_skips_the_model() {
    let client = StubClient::replying("[]");
    let service = ScheduleService::new(ModelBackedSource::new(&client));

    assert_eq!(
        service.generate_schedule("  ").unwrap_err(),
        ScheduleError::EmptyInput
    );
    assert!(client.prompts.borrow().is_empty());
}
