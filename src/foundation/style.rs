use std::path::Path;

use anyhow::Context;
use image::Rgb;

use crate::foundation::error::{ScrollcalError, ScrollcalResult};

/// Palette slot for date-header text.
pub const PAL_DATE: u8 = 0;
/// Palette slot for text of events that already ended.
pub const PAL_TEXT_ENDED: u8 = 1;
/// Palette slot for times of events that already ended.
pub const PAL_TIME_ENDED: u8 = 2;
/// Palette slot for event text.
pub const PAL_TEXT: u8 = 3;
/// Palette slot for event times.
pub const PAL_TIME: u8 = 4;
/// Palette slot for the dashed hour separator.
pub const PAL_TIME_DASH: u8 = 5;

/// Number of palette entries.
pub const PALETTE_LEN: usize = 8;

/// Layout constants for the calendar look.
///
/// Defaults reproduce the reference template. Any subset can be overridden from JSON; template
/// coordinates are in viewport texels (after scaling the template to `viewport_width`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Display width; the template is scaled to this width.
    pub viewport_width: u32,
    /// Ceiling on the output texture height.
    pub texture_max_height: u32,
    /// Mipmap guard padding between texture elements.
    pub section_pad: u32,

    /// Width of the unscrolled left side border.
    pub border_left: u32,
    /// Width of the unscrolled right side border.
    pub border_right: u32,
    /// Left edge of the day-header band.
    pub outer_left: u32,
    /// X at which the right side border starts in the template.
    pub outer_right: u32,
    /// Top of the scrollable section.
    pub variable_top: u32,
    /// Template y where the background sample strip is taken.
    pub template_sample_top: u32,
    /// Bottom of the scrollable section.
    pub variable_bottom: u32,

    /// Time column bounds.
    pub time_col_left: u32,
    /// Time column bounds.
    pub time_col_right: u32,
    /// Event text column bounds.
    pub event_info_left: u32,
    /// Event text column bounds.
    pub event_info_right: u32,

    /// Unscrolled band at the top of the first header.
    pub header_blend_start: u32,
    /// End of the header blend band.
    pub header_blend_end: u32,
    /// Height of the background sample strip.
    pub bg_sample_height: u32,

    /// Width of each end cap of the sliced day header.
    pub header_cap_width: u32,
    /// Width of the repeatable middle slice.
    pub header_mid_width: u32,
    /// Blank space between a day header and the event list (and after the list).
    pub header_margin: f32,

    /// Font size of the date in day headers, in pixels.
    pub font_day_header_px: f32,
    /// Font size of event start times.
    pub font_time_px: f32,
    /// Font size of event end times.
    pub font_end_time_px: f32,
    /// Font size of event descriptions.
    pub font_event_info_px: f32,
    /// Font size of the debug info line in the footer.
    pub font_config_info_px: f32,

    /// Height of the event marker triangle.
    pub marker_height: f32,
    /// Horizontal clip applied to the marker's left edge.
    pub marker_clip: f32,

    /// Hour separator line thickness.
    pub separator_thickness: f32,
    /// Hour separator dash length.
    pub separator_dash: f32,
    /// Space above the hour separator.
    pub separator_margin: f32,

    /// Text palette as `#RRGGBB` strings.
    #[serde(with = "palette_hex")]
    pub palette: [Rgb<u8>; PALETTE_LEN],

    /// Fill for texture areas no element covers.
    pub background_rgba: [u8; 4],

    /// Line shown for a day without events.
    pub no_events_text: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            viewport_width: 1024,
            texture_max_height: 4096,
            section_pad: 32,
            border_left: 23,
            border_right: 71,
            outer_left: 23,
            outer_right: 953,
            variable_top: 585,
            template_sample_top: 590,
            variable_bottom: 1313,
            time_col_left: 28,
            time_col_right: 139,
            event_info_left: 160,
            event_info_right: 948,
            header_blend_start: 8,
            header_blend_end: 16,
            bg_sample_height: 32,
            header_cap_width: 8,
            header_mid_width: 1,
            header_margin: 16.0,
            font_day_header_px: 28.8,
            font_time_px: 21.6,
            font_end_time_px: 14.4,
            font_event_info_px: 21.6,
            font_config_info_px: 14.4,
            marker_height: 16.0,
            marker_clip: 4.0,
            separator_thickness: 2.0,
            separator_dash: 4.0,
            separator_margin: 4.0,
            palette: [
                rgb(0xEFD4A5),
                rgb(0x9BAEC0),
                rgb(0x7D8D93),
                rgb(0x694342),
                rgb(0x7D5757),
                rgb(0xC28979),
                rgb(0xFF00FF),
                rgb(0x00FFFF),
            ],
            background_rgba: [255, 0, 255, 255],
            no_events_text: "【イベント情報がありません】".to_string(),
        }
    }
}

/// Split a `0xRRGGBB` literal into channels.
pub const fn rgb(col: u32) -> Rgb<u8> {
    Rgb([(col >> 16) as u8, (col >> 8) as u8, col as u8])
}

impl Style {
    /// Load a style from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> ScrollcalResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read style '{}'", path.display()))?;
        let style: Style = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse style '{}'", path.display()))?;
        style.validate()?;
        Ok(style)
    }

    /// Width of the event marker triangle.
    pub fn marker_width(&self) -> f32 {
        self.marker_height * 0.866
    }

    /// X-coordinates separating the four palette columns.
    pub fn col_divs(&self) -> [u32; 3] {
        [
            self.time_col_right,
            self.time_col_right + self.marker_width().ceil() as u32,
            self.viewport_width,
        ]
    }

    /// Check internal consistency of the template geometry.
    pub fn validate(&self) -> ScrollcalResult<()> {
        if self.viewport_width == 0 {
            return Err(ScrollcalError::configuration("viewport_width must be > 0"));
        }
        if self.variable_top >= self.variable_bottom {
            return Err(ScrollcalError::configuration(
                "variable_top must be above variable_bottom",
            ));
        }
        if self.outer_left >= self.outer_right {
            return Err(ScrollcalError::configuration(
                "outer_left must be left of outer_right",
            ));
        }
        if self.outer_right + self.border_right > self.viewport_width {
            return Err(ScrollcalError::configuration(
                "right border extends past the viewport",
            ));
        }
        if self.border_left > self.outer_right {
            return Err(ScrollcalError::configuration(
                "left border overlaps the right border",
            ));
        }
        if self.header_blend_start > self.header_blend_end {
            return Err(ScrollcalError::configuration(
                "header_blend_start must not exceed header_blend_end",
            ));
        }
        if self.time_col_left >= self.time_col_right
            || self.event_info_left >= self.event_info_right
        {
            return Err(ScrollcalError::configuration("empty text column"));
        }
        if self.header_mid_width == 0 {
            return Err(ScrollcalError::configuration(
                "header_mid_width must be > 0",
            ));
        }
        let sprite_w = self
            .header_cap_width
            .checked_mul(2)
            .and_then(|caps| caps.checked_add(self.header_mid_width));
        if sprite_w.is_none_or(|w| w > self.viewport_width) {
            return Err(ScrollcalError::configuration(
                "day-header caps and middle are wider than the viewport",
            ));
        }
        Ok(())
    }
}

mod palette_hex {
    use image::Rgb;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::SerializeSeq};

    use super::PALETTE_LEN;

    pub(super) fn serialize<S: Serializer>(
        palette: &[Rgb<u8>; PALETTE_LEN],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(PALETTE_LEN))?;
        for Rgb([r, g, b]) in palette {
            seq.serialize_element(&format!("#{r:02X}{g:02X}{b:02X}"))?;
        }
        seq.end()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<[Rgb<u8>; PALETTE_LEN], D::Error> {
        let raw = Vec::<String>::deserialize(d)?;
        if raw.len() != PALETTE_LEN {
            return Err(D::Error::custom(format!(
                "palette must have {PALETTE_LEN} entries, got {}",
                raw.len()
            )));
        }
        let mut out = [Rgb([0u8; 3]); PALETTE_LEN];
        for (slot, s) in out.iter_mut().zip(&raw) {
            let hex = s.strip_prefix('#').unwrap_or(s);
            if hex.len() != 6 {
                return Err(D::Error::custom(format!("invalid palette color '{s}'")));
            }
            let v = u32::from_str_radix(hex, 16)
                .map_err(|e| D::Error::custom(format!("invalid palette color '{s}': {e}")))?;
            *slot = super::rgb(v);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/style.rs"]
mod tests;
