//! Activity keyword table.
//!
//! Each rule maps whole-word keywords to a display title and event type.
//! Rule order breaks ties when two keywords sit at the same distance, and
//! inside a compound phrase such as "coffee meeting", where the earlier
//! (more specific) rule names the whole phrase.

use crate::model::event::EventType;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Title used when no activity keyword is found near a candidate.
pub const GENERIC_TITLE: &str = "Scheduled Activity";
/// Type used together with `GENERIC_TITLE`.
pub const GENERIC_TYPE: EventType = EventType::Work;

/// One keyword family.
#[derive(Debug)]
pub struct KeywordRule {
    pub title: &'static str,
    pub event_type: EventType,
    pattern: Regex,
}

impl KeywordRule {
    fn new(words: &[&str], title: &'static str, event_type: EventType) -> Self {
        let pattern = format!(r"\b(?:{})\b", words.join("|"));
        Self {
            title,
            event_type,
            pattern: Regex::new(&pattern).expect("valid keyword regex"),
        }
    }

    /// Byte ranges of every keyword hit in lowercased `text`.
    pub fn hits<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        self.pattern.find_iter(text).map(|hit| hit.range())
    }
}

pub static KEYWORD_RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    vec![
        KeywordRule::new(&["coffee"], "Coffee Meeting", EventType::Meeting),
        KeywordRule::new(&["lunch"], "Lunch Break", EventType::Meal),
        KeywordRule::new(&["breakfast", "brunch"], "Breakfast", EventType::Meal),
        KeywordRule::new(&["dinner", "supper"], "Dinner", EventType::Meal),
        KeywordRule::new(&["gym", "workout"], "Gym Workout", EventType::Exercise),
        KeywordRule::new(&["run", "running", "jog", "jogging"], "Run", EventType::Exercise),
        KeywordRule::new(&["yoga"], "Yoga", EventType::Exercise),
        KeywordRule::new(&["meeting", "meetings"], "Meeting", EventType::Meeting),
        KeywordRule::new(&["call", "standup"], "Call", EventType::Meeting),
        KeywordRule::new(&["work", "working", "office"], "Work Session", EventType::Work),
        KeywordRule::new(&["study", "studying", "class"], "Study Session", EventType::Work),
        KeywordRule::new(&["walk"], "Walk", EventType::Leisure),
        KeywordRule::new(&["movie", "movies", "tv"], "Movie Time", EventType::Leisure),
        KeywordRule::new(&["read", "reading"], "Reading", EventType::Leisure),
    ]
});

/// Returns the rule whose hit lies closest to `anchor` within `text`.
///
/// Keywords separated only by whitespace form one phrase; the phrase is named
/// by its earliest rule in table order.
pub fn nearest_rule(text: &str, anchor: usize) -> Option<&'static KeywordRule> {
    let rules: &'static [KeywordRule] = &KEYWORD_RULES;
    let mut hits: Vec<(Range<usize>, usize)> = rules
        .iter()
        .enumerate()
        .flat_map(|(rule_index, rule)| rule.hits(text).map(move |range| (range, rule_index)))
        .collect();
    hits.sort_by_key(|(range, rule_index)| (range.start, *rule_index));

    let nearest = hits
        .iter()
        .enumerate()
        .min_by_key(|(_, (range, rule_index))| (range.start.abs_diff(anchor), *rule_index))
        .map(|(position, _)| position)?;

    let adjacent = |left: &Range<usize>, right: &Range<usize>| {
        left.end <= right.start && text[left.end..right.start].trim().is_empty()
    };
    let mut first = nearest;
    while first > 0 && adjacent(&hits[first - 1].0, &hits[first].0) {
        first -= 1;
    }
    let mut last = nearest;
    while last + 1 < hits.len() && adjacent(&hits[last].0, &hits[last + 1].0) {
        last += 1;
    }

    hits[first..=last]
        .iter()
        .map(|(_, rule_index)| *rule_index)
        .min()
        .map(|rule_index| &rules[rule_index])
}
