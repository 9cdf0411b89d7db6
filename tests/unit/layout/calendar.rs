use chrono::NaiveDate;

use super::*;
use crate::layout::text::PlaceholderShaper;

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn day(events: Vec<CalendarEvent>) -> CalendarDay {
    CalendarDay {
        date: NaiveDate::from_ymd_opt(2020, 5, 30).unwrap(),
        events,
    }
}

fn event(start: &str, end: Option<&str>) -> CalendarEvent {
    CalendarEvent {
        start: at(start),
        end: end.map(at),
        title: "meeting".to_string(),
    }
}

fn lay(days: &[CalendarDay]) -> CalendarLayout {
    layout_calendar(
        days,
        &Style::default(),
        95,
        at("2020-05-30T12:00:00+09:00"),
        &mut PlaceholderShaper,
    )
    .unwrap()
}

#[test]
fn empty_day_gets_header_margin_filler_margin() {
    let layout = lay(&[day(vec![])]);
    let segs = layout.segments();
    assert_eq!(segs.len(), 4);
    assert_eq!(segs[0].kind, EntryKind::Header);
    assert_eq!(segs[0].height, 95.0);
    assert!(!segs[1].has_ink());
    assert!(segs[2].has_ink());
    assert_eq!(segs[2].kind, EntryKind::Body { colors: [PAL_TEXT; 4] });
}

#[test]
fn separator_only_when_the_hour_changes() {
    let layout = lay(&[day(vec![
        event("2020-05-30T10:00:00+09:00", None),
        event("2020-05-30T10:30:00+09:00", None),
        event("2020-05-30T11:00:00+09:00", None),
    ])]);
    let dashes = layout
        .segments()
        .iter()
        .filter(|s| s.kind == EntryKind::Body { colors: [PAL_TIME_DASH; 4] })
        .count();
    assert_eq!(dashes, 1);
}

#[test]
fn ended_events_use_ended_palette() {
    let layout = lay(&[day(vec![
        event("2020-05-30T09:00:00+09:00", Some("2020-05-30T10:00:00+09:00")),
        event("2020-05-30T13:00:00+09:00", Some("2020-05-30T14:00:00+09:00")),
    ])]);
    let kinds: Vec<_> = layout.segments().iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&EntryKind::Body {
        colors: [PAL_TIME_ENDED, PAL_TEXT_ENDED, PAL_TEXT_ENDED, PAL_TEXT_ENDED]
    }));
    assert!(kinds.contains(&EntryKind::Body {
        colors: [PAL_TIME, PAL_TEXT, PAL_TEXT, PAL_TEXT]
    }));
}

#[test]
fn timeline_is_contiguous_and_headers_start_on_their_row() {
    let layout = lay(&[day(vec![event("2020-05-30T10:00:00+09:00", None)]), day(vec![])]);
    let timeline = layout.timeline();
    assert_eq!(timeline.len(), layout.segments().len());
    assert_eq!(timeline[0].top, 0);
    assert_eq!(timeline[0].height, 95);

    let total = layout.height().ceil() as u32;
    let last = timeline.last().unwrap();
    assert_eq!(last.top + last.height, total);

    let second_header = timeline
        .iter()
        .skip(1)
        .find(|e| e.kind == EntryKind::Header)
        .unwrap();
    assert!(second_header.top > 95);
}

#[test]
fn rows_round_up_to_multiple_of_three_and_cap() {
    let layout = lay(&[day(vec![])]);
    let rows = layout.rows(u32::MAX);
    assert_eq!(rows % 3, 0);
    assert!(rows as f32 >= layout.height());
    assert_eq!(layout.rows(100), 99);
}

#[test]
fn rasterized_mask_has_header_ink() {
    let layout = lay(&[day(vec![])]);
    let rows = layout.rows(3000);
    let cov = layout.rasterize(1024, rows).unwrap();
    assert_eq!(cov.len(), 1024 * rows as usize);
    assert!(cov[..1024 * 95].iter().any(|&c| c > 0));
}

#[test]
fn empty_layout_rasterizes_to_nothing() {
    let layout = lay(&[]);
    assert_eq!(layout.rows(300), 0);
    assert!(layout.rasterize(1024, 0).unwrap().is_empty());
}

#[test]
fn inverted_center_band_fails_instead_of_overflowing() {
    let style = Style {
        outer_left: 960,
        ..Style::default()
    };
    let err = layout_calendar(
        &[day(vec![])],
        &style,
        95,
        at("2020-05-30T12:00:00+09:00"),
        &mut PlaceholderShaper,
    )
    .unwrap_err();
    assert!(err.is_configuration());
}
