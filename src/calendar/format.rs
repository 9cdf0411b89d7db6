use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Weekday};

use crate::calendar::model::CalendarEvent;

/// Single-character weekday label.
pub fn weekday_sigil(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

/// Day header label, e.g. `05/30 (土)`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} ({})", date.format("%m/%d"), weekday_sigil(date.weekday()))
}

pub fn format_start(event: &CalendarEvent) -> String {
    event.start.format("%H:%M").to_string()
}

/// End-time label relative to the start.
///
/// Same day: `~HH:MM`. Next day up to 03:59: hours continue past 24. Next day otherwise: `~翌HH:MM`.
/// Later: full date with weekday.
pub fn format_end(event: &CalendarEvent) -> Option<String> {
    let end: DateTime<FixedOffset> = event.end?;
    let start_date = event.start.date_naive();
    let end_date = end.date_naive();
    let next_day = start_date.succ_opt() == Some(end_date);

    Some(if start_date == end_date {
        format!("~{}", end.format("%H:%M"))
    } else if next_day && end.hour() <= 3 {
        format!("~{:02}:{:02}", end.hour() + 24, end.minute())
    } else if next_day {
        format!("~翌{}", end.format("%H:%M"))
    } else {
        format!(
            "~{} ({}) {}",
            end.format("%m/%d"),
            weekday_sigil(end_date.weekday()),
            end.format("%H:%M")
        )
    })
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/format.rs"]
mod tests;
