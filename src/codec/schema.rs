//! Field order and widths of the metadata block.
//!
//! The order is the decode contract: the shader addresses each field by its pixel offset, so
//! fields are only ever appended, never reordered.

use image::Rgb;

use crate::foundation::{
    config::Config,
    error::{ScrollcalError, ScrollcalResult},
    style::PALETTE_LEN,
};

/// Width of texture coordinates and sizes.
pub const COORD_BITS: u8 = 16;
/// Width of row counts and per-row entries.
pub const ROW_BITS: u8 = 18;

/// How a field's pixels are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Codec-encoded integers of the given width.
    Value { bits: u8 },
    /// Raw colors, stored verbatim with full alpha.
    Color,
}

/// One named entry in the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Number of consecutive pixels.
    pub count: usize,
}

impl Field {
    const fn value(name: &'static str, bits: u8) -> Self {
        Self::values(name, bits, 1)
    }

    const fn values(name: &'static str, bits: u8, count: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Value { bits },
            count,
        }
    }

    const fn colors(name: &'static str, count: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Color,
            count,
        }
    }
}

/// Fixed fields, in block order. The first two describe the block itself.
pub const FIXED_FIELDS: &[Field] = &[
    Field::value("datastream_width", COORD_BITS),
    Field::value("datastream_height", COORD_BITS),
    Field::value("viewport_w", COORD_BITS),
    Field::value("viewport_h", COORD_BITS),
    Field::value("header_h", COORD_BITS),
    Field::value("footer_h", COORD_BITS),
    Field::value("border_l", COORD_BITS),
    Field::value("border_r", COORD_BITS),
    Field::value("day_header_height", COORD_BITS),
    Field::values("col_divs", COORD_BITS, 3),
    Field::colors("palette", PALETTE_LEN),
    Field::value("section_pad", COORD_BITS),
    Field::value("scroll_height", ROW_BITS),
    Field::value("scroll_tex_y", COORD_BITS),
    Field::value("bg_sample_y", COORD_BITS),
    Field::value("bg_sample_h", COORD_BITS),
    Field::value("header_tex_y", COORD_BITS),
    Field::value("footer_tex_y", COORD_BITS),
    Field::value("day_header_tex_x", COORD_BITS),
    Field::value("day_header_tex_alpha_x", COORD_BITS),
    Field::value("day_header_tex_y", COORD_BITS),
    Field::value("day_header_side_width", COORD_BITS),
    Field::value("day_header_mid_width", COORD_BITS),
    Field::value("day_header_true_width", COORD_BITS),
    Field::value("header_blend_start", COORD_BITS),
    Field::value("header_blend_end", COORD_BITS),
    Field::value("scroll_split_point", COORD_BITS),
    Field::value("row_count", ROW_BITS),
];

/// Per-row distance to the nearest header origin above.
pub const PREV_DAY_HEADER: &str = "prev_day_header";
/// Per-row palette indices or header reference.
pub const ROW_INFO: &str = "row_info";

/// Pixels taken by the fixed fields.
pub fn fixed_len() -> usize {
    FIXED_FIELDS.iter().map(|f| f.count).sum()
}

/// Pixel offset of a fixed field from the start of the block.
pub fn fixed_offset(name: &str) -> Option<usize> {
    let mut offset = 0;
    for field in FIXED_FIELDS {
        if field.name == name {
            return Some(offset);
        }
        offset += field.count;
    }
    None
}

/// A single bound pixel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Value(u32),
    Color(Rgb<u8>),
}

/// Bind a fixed field to its value(s) from `config`.
///
/// `block_size` supplies the two self-describing fields and `row_count` the row tail length.
pub fn bind(
    field: &Field,
    config: &Config,
    block_size: (u32, u32),
    row_count: u32,
) -> ScrollcalResult<Vec<Cell>> {
    let one = |v: u32| vec![Cell::Value(v)];
    let cells = match field.name {
        "datastream_width" => one(block_size.0),
        "datastream_height" => one(block_size.1),
        "viewport_w" => one(config.viewport_w),
        "viewport_h" => one(config.viewport_h),
        "header_h" => one(config.header_h),
        "footer_h" => one(config.footer_h),
        "border_l" => one(config.border_l),
        "border_r" => one(config.border_r),
        "day_header_height" => one(config.day_header_height),
        "col_divs" => config.col_divs.iter().copied().map(Cell::Value).collect(),
        "palette" => config.palette.iter().copied().map(Cell::Color).collect(),
        "section_pad" => one(config.section_pad),
        "scroll_height" => one(config.scroll_height),
        "scroll_tex_y" => one(config.scroll_tex_y),
        "bg_sample_y" => one(config.bg_sample_y),
        "bg_sample_h" => one(config.bg_sample_h),
        "header_tex_y" => one(config.header_tex_y),
        "footer_tex_y" => one(config.footer_tex_y),
        "day_header_tex_x" => one(config.day_header_tex_x),
        "day_header_tex_alpha_x" => one(config.day_header_tex_alpha_x),
        "day_header_tex_y" => one(config.day_header_tex_y),
        "day_header_side_width" => one(config.day_header_side_width),
        "day_header_mid_width" => one(config.day_header_mid_width),
        "day_header_true_width" => one(config.day_header_true_width),
        "header_blend_start" => one(config.header_blend_start),
        "header_blend_end" => one(config.header_blend_end),
        "scroll_split_point" => one(config.scroll_split_point),
        "row_count" => one(row_count),
        other => {
            return Err(ScrollcalError::configuration(format!(
                "no binding for field '{other}'"
            )));
        }
    };

    if cells.len() != field.count {
        return Err(ScrollcalError::configuration(format!(
            "field '{}' expects {} entries, got {}",
            field.name,
            field.count,
            cells.len()
        )));
    }
    Ok(cells)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/schema.rs"]
mod tests;
