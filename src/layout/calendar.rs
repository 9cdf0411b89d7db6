//! Vertical layout of the scrollable event list.
//!
//! The list is a stack of segments (day headers, margins, separators, events). Each segment knows
//! its height, how its rows are tinted, and the ink it puts on the text mask.

use chrono::{DateTime, FixedOffset, Timelike};
use vello_cpu::kurbo;

use crate::{
    calendar::{
        format::{format_date, format_end, format_start},
        model::{CalendarDay, CalendarEvent},
    },
    foundation::{
        error::{ScrollcalError, ScrollcalResult},
        style::{PAL_TEXT, PAL_TEXT_ENDED, PAL_TIME, PAL_TIME_DASH, PAL_TIME_ENDED, Style},
    },
    layout::text::{ShapedText, TextShaper},
    render::mask::MaskCanvas,
    rows::encoder::{EntryKind, TimelineEntry},
};

#[derive(Clone, Debug)]
enum Mark {
    Text { text: ShapedText, x: f32, y: f32 },
    Polygon(Vec<(f64, f64)>),
    Rect(kurbo::Rect),
}

/// One horizontal band of the event list.
#[derive(Clone, Debug)]
pub struct Segment {
    pub height: f32,
    pub kind: EntryKind,
    marks: Vec<Mark>,
}

impl Segment {
    fn blank(height: f32, colors: [u8; 4]) -> Self {
        Self {
            height,
            kind: EntryKind::Body { colors },
            marks: Vec::new(),
        }
    }

    /// Whether the segment draws anything.
    pub fn has_ink(&self) -> bool {
        !self.marks.is_empty()
    }
}

/// The stacked event list.
#[derive(Clone, Debug, Default)]
pub struct CalendarLayout {
    segments: Vec<Segment>,
}

impl CalendarLayout {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn height(&self) -> f32 {
        self.segments.iter().map(|s| s.height).sum()
    }

    /// Mask rows needed, rounded up to a multiple of 3 and capped at `limit`.
    pub fn rows(&self, limit: u32) -> u32 {
        let limit = limit - limit % 3;
        let rows = self.height().ceil() as u32;
        let rows = rows.div_ceil(3) * 3;
        if rows > limit {
            tracing::warn!(rows, limit, "event list truncated to fit the texture");
            return limit;
        }
        rows
    }

    /// Row spans of every segment. Headers start at the row holding their top edge and span
    /// exactly their own height; other segments start at the first row fully below the previous
    /// segment.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let mut y = 0.0f32;
        let mut out = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            let (top, height) = match seg.kind {
                EntryKind::Header => (y.floor() as u32, seg.height.ceil() as u32),
                EntryKind::Body { .. } => {
                    let top = y.ceil() as u32;
                    (top, ((y + seg.height).ceil() as u32).saturating_sub(top))
                }
            };
            out.push(TimelineEntry {
                top,
                height,
                kind: seg.kind,
            });
            y += seg.height;
        }
        out
    }

    /// Draw the list into a coverage mask `width` wide and `rows` tall.
    #[tracing::instrument(skip(self))]
    pub fn rasterize(&self, width: u32, rows: u32) -> ScrollcalResult<Vec<u8>> {
        if rows == 0 {
            return Ok(Vec::new());
        }
        let mut canvas = MaskCanvas::new(width, rows)?;
        let mut y = 0.0f32;
        for seg in &self.segments {
            if y >= rows as f32 {
                break;
            }
            let dy = f64::from(y);
            for mark in &seg.marks {
                match mark {
                    Mark::Text { text, x, y: ty } => {
                        text.draw(canvas.context(), f64::from(*x), dy + f64::from(*ty));
                    }
                    Mark::Polygon(points) => {
                        let moved: Vec<_> = points.iter().map(|&(px, py)| (px, py + dy)).collect();
                        canvas.fill_polygon(&moved);
                    }
                    Mark::Rect(r) => canvas.fill_rect(*r + kurbo::Vec2::new(0.0, dy)),
                }
            }
            y += seg.height;
        }
        Ok(canvas.finish())
    }
}

/// Lay out `days` for display at time `now`.
#[tracing::instrument(skip(days, style, shaper), fields(days = days.len()))]
pub fn layout_calendar(
    days: &[CalendarDay],
    style: &Style,
    header_height: u32,
    now: DateTime<FixedOffset>,
    shaper: &mut dyn TextShaper,
) -> ScrollcalResult<CalendarLayout> {
    let mut segments = Vec::new();
    for day in days {
        layout_day(day, style, header_height, now, shaper, &mut segments)?;
    }
    let layout = CalendarLayout { segments };
    tracing::info!(
        segments = layout.segments.len(),
        height = layout.height(),
        "laid out calendar"
    );
    Ok(layout)
}

fn layout_day(
    day: &CalendarDay,
    style: &Style,
    header_height: u32,
    now: DateTime<FixedOffset>,
    shaper: &mut dyn TextShaper,
    out: &mut Vec<Segment>,
) -> ScrollcalResult<()> {
    let center_left = style.outer_left as f32;
    let center_w = style
        .outer_right
        .checked_sub(style.outer_left)
        .ok_or_else(|| ScrollcalError::configuration("outer_left must be left of outer_right"))?
        as f32;

    let title = shaper.shape(&format_date(day.date), style.font_day_header_px, center_w, 1)?;
    let x = center_left + (center_w - title.width) / 2.0;
    let y = (header_height as f32 - title.height) / 2.0;
    out.push(Segment {
        height: header_height as f32,
        kind: EntryKind::Header,
        marks: vec![Mark::Text { text: title, x, y }],
    });
    out.push(Segment::blank(style.header_margin, [PAL_TEXT; 4]));

    if day.events.is_empty() {
        let filler = shaper.shape(&style.no_events_text, style.font_event_info_px, center_w, 2)?;
        let x = center_left + (center_w - filler.width) / 2.0;
        out.push(Segment {
            height: filler.height,
            kind: EntryKind::Body {
                colors: [PAL_TEXT; 4],
            },
            marks: vec![Mark::Text {
                text: filler,
                x,
                y: 0.0,
            }],
        });
    }

    let mut prior_hour = None;
    for event in &day.events {
        let hour = event.start.hour();
        if prior_hour.is_some_and(|h| h != hour) {
            out.push(separator(style));
        }
        prior_hour = Some(hour);
        out.push(layout_event(event, style, now, shaper)?);
    }

    out.push(Segment::blank(style.header_margin, [PAL_TEXT; 4]));
    Ok(())
}

/// Dashed rule across the time column.
fn separator(style: &Style) -> Segment {
    let left = f64::from(style.time_col_left);
    let width = f64::from(style.time_col_right - style.time_col_left);
    let dash = f64::from(style.separator_dash);
    let half = f64::from(style.separator_thickness) / 2.0;
    let mid = f64::from(style.separator_margin);

    let mut marks = Vec::new();
    let mut x = dash / 2.0;
    while x < width {
        let end = (x + dash).min(width);
        marks.push(Mark::Rect(kurbo::Rect::new(
            left + x,
            mid - half,
            left + end,
            mid + half,
        )));
        x += dash * 2.0;
    }

    Segment {
        height: style.separator_thickness + style.separator_margin,
        kind: EntryKind::Body {
            colors: [PAL_TIME_DASH; 4],
        },
        marks,
    }
}

fn layout_event(
    event: &CalendarEvent,
    style: &Style,
    now: DateTime<FixedOffset>,
    shaper: &mut dyn TextShaper,
) -> ScrollcalResult<Segment> {
    let time_w = (style.time_col_right - style.time_col_left) as f32;
    let col_right = style.time_col_right as f32;

    let start = shaper.shape(&format_start(event), style.font_time_px, time_w, 1)?;
    let end = match format_end(event) {
        Some(s) => shaper.shape(&s, style.font_end_time_px, time_w, 1)?,
        None => ShapedText::empty(),
    };
    let desc = shaper.shape(
        &event.title,
        style.font_event_info_px,
        (style.event_info_right - style.event_info_left) as f32,
        2,
    )?;

    let start_x = style.time_col_left as f32 + 8.0;
    let end_x = start_x + start.width;
    let (end_x, end_y) = if end_x + end.width < col_right {
        (end_x, start.baseline - end.baseline)
    } else {
        // No room beside the start time; right-align on the next line.
        (col_right - end.width, start.baseline)
    };

    let marker = marker_polygon(style, f64::from(start.height) / 2.0);
    let height = [
        start.height,
        end_y + end.height,
        desc.height,
        start.height / 2.0 + style.marker_height / 2.0,
    ]
    .into_iter()
    .fold(0.0f32, f32::max);

    let colors = if event.is_ended(now) {
        [PAL_TIME_ENDED, PAL_TEXT_ENDED, PAL_TEXT_ENDED, PAL_TEXT_ENDED]
    } else {
        [PAL_TIME, PAL_TEXT, PAL_TEXT, PAL_TEXT]
    };

    Ok(Segment {
        height,
        kind: EntryKind::Body { colors },
        marks: vec![
            Mark::Polygon(marker),
            Mark::Text {
                text: start,
                x: start_x,
                y: 0.0,
            },
            Mark::Text {
                text: end,
                x: end_x,
                y: end_y,
            },
            Mark::Text {
                text: desc,
                x: style.event_info_left as f32,
                y: 0.0,
            },
        ],
    })
}

/// Right-pointing triangle left of the event text, with its left edge clipped off.
fn marker_polygon(style: &Style, center_y: f64) -> Vec<(f64, f64)> {
    let left = f64::from(style.time_col_right);
    let w = f64::from(style.marker_width());
    let half = f64::from(style.marker_height) / 2.0;
    let clip = f64::from(style.marker_clip).min(w);
    let half_at_clip = half * (1.0 - clip / w);
    vec![
        (left + clip, center_y - half_at_clip),
        (left + w, center_y),
        (left + clip, center_y + half_at_clip),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/layout/calendar.rs"]
mod tests;
