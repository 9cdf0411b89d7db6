use super::*;
use chrono::DateTime;

fn event(start: &str, end: Option<&str>) -> CalendarEvent {
    CalendarEvent {
        start: DateTime::parse_from_rfc3339(start).unwrap(),
        end: end.map(|e| DateTime::parse_from_rfc3339(e).unwrap()),
        title: String::new(),
    }
}

#[test]
fn date_label_has_weekday_sigil() {
    let date = NaiveDate::from_ymd_opt(2020, 5, 30).unwrap();
    assert_eq!(format_date(date), "05/30 (土)");
}

#[test]
fn start_is_hours_and_minutes() {
    assert_eq!(format_start(&event("2020-05-30T09:05:00+09:00", None)), "09:05");
}

#[test]
fn end_formats_by_distance_from_start() {
    let s = "2020-05-30T20:00:00+09:00";
    assert_eq!(format_end(&event(s, None)), None);
    assert_eq!(
        format_end(&event(s, Some("2020-05-30T22:30:00+09:00"))).unwrap(),
        "~22:30"
    );
    assert_eq!(
        format_end(&event(s, Some("2020-05-31T02:15:00+09:00"))).unwrap(),
        "~26:15"
    );
    assert_eq!(
        format_end(&event(s, Some("2020-05-31T09:00:00+09:00"))).unwrap(),
        "~翌09:00"
    );
    assert_eq!(
        format_end(&event(s, Some("2020-06-02T09:00:00+09:00"))).unwrap(),
        "~06/02 (火) 09:00"
    );
}
