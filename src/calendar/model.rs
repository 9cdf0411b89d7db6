use anyhow::Context;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};

use crate::foundation::error::ScrollcalResult;

/// One calendar entry as supplied by the event source.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarEvent {
    pub start: DateTime<FixedOffset>,
    #[serde(default)]
    pub end: Option<DateTime<FixedOffset>>,
    pub title: String,
}

impl CalendarEvent {
    /// Whether the event finished before `now`. Events without an end never expire.
    pub fn is_ended(&self, now: DateTime<FixedOffset>) -> bool {
        self.end.is_some_and(|end| end < now)
    }
}

/// Events sharing a start date, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

/// Parse a JSON array of events.
pub fn parse_events(json: &[u8]) -> ScrollcalResult<Vec<CalendarEvent>> {
    let events: Vec<CalendarEvent> =
        serde_json::from_slice(json).context("parse calendar events")?;
    Ok(events)
}

/// Keep events starting within `days` days of `now`, plus any still in progress.
///
/// Before 03:00 the window opens on the previous day, so late-night events stay visible.
pub fn select_window(
    mut events: Vec<CalendarEvent>,
    now: DateTime<FixedOffset>,
    days: u32,
) -> Vec<CalendarEvent> {
    let mut first = now.date_naive();
    if now.hour() < 3 {
        first = first.pred_opt().unwrap_or(first);
    }
    let last = now.date_naive() + Duration::days(i64::from(days));

    events.retain(|ev| {
        let date = ev.start.date_naive();
        let upcoming = date >= first && date < last;
        let running = ev.end.is_some_and(|end| ev.start <= now && end >= now);
        upcoming || running
    });
    events
}

/// Sort events, group them by local start date and drop consecutive duplicates.
///
/// Titles have iCalendar escapes removed (`\n` is dropped, `\x` becomes `x`).
pub fn group_into_days(mut events: Vec<CalendarEvent>) -> Vec<CalendarDay> {
    events.sort_by(|a, b| (a.start, a.end, &a.title).cmp(&(b.start, b.end, &b.title)));

    let mut days: Vec<CalendarDay> = Vec::new();
    let mut prev: Option<CalendarEvent> = None;
    for event in events {
        let date = event.start.date_naive();
        if prev.as_ref() == Some(&event) {
            continue;
        }
        prev = Some(event.clone());

        let event = CalendarEvent {
            title: unescape(&event.title),
            ..event
        };
        match days.last_mut() {
            Some(day) if day.date == date => day.events.push(event),
            _ => days.push(CalendarDay {
                date,
                events: vec![event],
            }),
        }
    }
    days
}

/// Strip iCalendar text escapes.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | None => {}
            Some(c2) => out.push(c2),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/model.rs"]
mod tests;
