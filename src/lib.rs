//! Scrollcal builds the single texture behind a shader-driven scrolling calendar.
//!
//! One PNG carries both the visuals (template strips, day-header sprites, a text mask packed into
//! the color channels) and a configuration payload encoded directly into pixels. The consuming
//! shader decodes the payload with per-pixel arithmetic, so the encoding is built to survive the
//! host's sRGB-to-linear sampling.
//!
//! # Pipeline overview
//!
//! 1. **Group**: `Vec<CalendarEvent> -> Vec<CalendarDay>` (sorted, de-duplicated, by date)
//! 2. **Lay out**: days -> [`CalendarLayout`] (stacked segments, shaped text)
//! 3. **Encode rows**: layout timeline -> [`RowArrays`] (header offsets and column palettes)
//! 4. **Compose**: template + day header + layout -> [`GeneratedTexture`] with the
//!    [`MetadataBlock`] in the top-right corner
//!
//! [`read_block`] reverses step 4 for inspection and testing.
//!
//! The library performs no file or network IO; the `scrollcal` binary loads inputs and writes the
//! PNG.
#![forbid(unsafe_code)]

mod calendar;
mod codec;
mod compose;
mod decode;
mod foundation;
mod layout;
mod render;
mod rows;
mod slicer;

pub use calendar::format::{format_date, format_end, format_start, weekday_sigil};
pub use calendar::model::{
    CalendarDay, CalendarEvent, group_into_days, parse_events, select_window, unescape,
};
pub use codec::metadata::{MetadataBlock, traversal_xy};
pub use codec::pattern::{expected_value, test_pattern};
pub use codec::pixel::{
    CHANNEL_BITS, COLOR_BITS, MAX_BITS, calibrate_levels, check_value, check_width, decode,
    decode_sampled, encode, sample,
};
pub use codec::schema::{
    COORD_BITS, Cell, FIXED_FIELDS, Field, FieldKind, PREV_DAY_HEADER, ROW_BITS, ROW_INFO,
    fixed_len, fixed_offset,
};
pub use compose::composer::{GenerateInputs, GeneratedTexture, generate};
pub use decode::inspect::{DecodedBlock, read_block};
pub use foundation::config::Config;
pub use foundation::error::{ScrollcalError, ScrollcalResult};
pub use foundation::math::{linear_to_srgb, srgb_to_linear, srgb8_to_linear8};
pub use foundation::style::{
    PAL_DATE, PAL_TEXT, PAL_TEXT_ENDED, PAL_TIME, PAL_TIME_DASH, PAL_TIME_ENDED, PALETTE_LEN,
    Style,
};
pub use layout::calendar::{CalendarLayout, Segment, layout_calendar};
pub use layout::text::{ParleyShaper, PlaceholderShaper, ShapedText, TextInk, TextShaper};
pub use render::raster::{decode_image, scale_to_width};
pub use rows::encoder::{
    DEFAULT_COLUMNS, EntryKind, HEADER_FLAG, NO_PRIOR_HEADER, RowArrays, RowData, RowKind,
    TimelineEntry, encode_rows,
};
pub use slicer::day_header::SlicedHeader;
