//! Rule-based candidate extraction.
//!
//! # Responsibility
//! - Find time expressions in free text and group them into candidate events.
//! - Attach a keyword-derived title/type and a best-effort location.
//!
//! # Invariants
//! - Output order follows the order of time expressions in the text.
//! - Consecutive times pair as (start, end); an odd trailing time gets the
//!   default span.
//! - Text without any recognized time yields an empty sequence, not an error.
//! - Pure function of the input: no I/O, clock or randomness.

use crate::engine::keywords::{nearest_rule, GENERIC_TITLE, GENERIC_TYPE};
use crate::engine::time_parser::{parse_time_expression, TIME_TOKEN_RE};
use crate::model::clock::ClockTime;
use crate::model::event::CandidateEvent;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Span given to a time without an end partner.
pub const DEFAULT_SPAN_MINUTES: u32 = 60;

const LOCATION_MAX_WORDS: usize = 4;

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bat\s+(?:the\s+)?([a-z][a-z0-9'&.\-]*(?:\s+[a-z][a-z0-9'&.\-]*){0,3})")
        .expect("valid location regex")
});

const LOCATION_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "am", "and", "around", "at", "before", "breakfast", "but", "by",
    "dinner", "for", "from", "i", "in", "least", "leave", "lunch", "midday", "midnight", "my",
    "night", "noon", "on", "once", "or", "pm", "some", "then", "till", "to", "until", "we",
    "with",
];

#[derive(Debug, Clone, Copy)]
struct TimeHit {
    start: usize,
    end: usize,
    time: ClockTime,
}

/// Extracts candidates using the default 60-minute span for unpaired times.
pub fn extract_candidates(text: &str) -> Vec<CandidateEvent> {
    extract_candidates_with_span(text, DEFAULT_SPAN_MINUTES)
}

/// Extracts candidates, giving unpaired trailing times `default_span_minutes`.
pub fn extract_candidates_with_span(text: &str, default_span_minutes: u32) -> Vec<CandidateEvent> {
    // ASCII-only folding keeps byte offsets aligned with `text`.
    let lowered = text.to_ascii_lowercase();
    let hits = scan_times(lowered.as_str());
    if hits.is_empty() {
        debug!("event=extract_candidates module=engine status=empty times=0");
        return Vec::new();
    }

    let groups: Vec<&[TimeHit]> = hits.chunks(2).collect();
    let mut candidates = Vec::with_capacity(groups.len());

    for (index, group) in groups.iter().enumerate() {
        let first = group[0];
        let last = group[group.len() - 1];
        let lead_start = match index {
            0 => 0,
            _ => groups[index - 1][groups[index - 1].len() - 1].end,
        };
        let trail_end = groups
            .get(index + 1)
            .map_or(lowered.len(), |next| next[0].start);

        let leading = &lowered[lead_start..last.end];
        let trailing = &lowered[last.end..trail_end];
        let rule = nearest_rule(leading, first.start - lead_start)
            .or_else(|| nearest_rule(trailing, 0));
        let (title, event_type) = match rule {
            Some(rule) => (rule.title, rule.event_type),
            None => (GENERIC_TITLE, GENERIC_TYPE),
        };

        let duration = if group.len() == 2 {
            first.time.minutes_until(last.time)
        } else {
            default_span_minutes
        };

        let mut candidate = CandidateEvent::new(
            title,
            first.time.to_string(),
            i64::from(duration),
            event_type.as_str(),
        );
        candidate.location = find_location(text, leading, lead_start);
        candidates.push(candidate);
    }

    debug!(
        "event=extract_candidates module=engine status=ok times={} candidates={}",
        hits.len(),
        candidates.len()
    );
    candidates
}

fn scan_times(lowered: &str) -> Vec<TimeHit> {
    TIME_TOKEN_RE
        .find_iter(lowered)
        .filter_map(|hit| {
            parse_time_expression(hit.as_str())
                .ok()
                .map(|time| TimeHit {
                    start: hit.start(),
                    end: hit.end(),
                    time,
                })
        })
        .collect()
}

/// Looks for `at <place>` in `leading` and returns the place with the
/// casing it has in `original`.
fn find_location(original: &str, leading: &str, offset: usize) -> Option<String> {
    for caps in LOCATION_RE.captures_iter(leading) {
        let Some(phrase) = caps.get(1) else {
            continue;
        };
        let kept = phrase
            .as_str()
            .split_whitespace()
            .take(LOCATION_MAX_WORDS)
            .take_while(|word| !LOCATION_STOP_WORDS.contains(&trim_word(word)))
            .count();
        if kept == 0 {
            continue;
        }

        let source = original.get(offset + phrase.start()..offset + phrase.end())?;
        let location = source
            .split_whitespace()
            .take(kept)
            .map(trim_word)
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !location.is_empty() {
            return Some(location);
        }
    }
    None
}

fn trim_word(word: &str) -> &str {
    word.trim_end_matches(['.', '\'', '-', '&'])
}
