use image::{Rgb, RgbaImage};

use crate::{
    codec::{
        metadata::traversal_xy,
        pixel,
        schema::{COORD_BITS, Cell, FIXED_FIELDS, FieldKind, ROW_BITS, fixed_len},
    },
    foundation::{
        config::Config,
        error::{ScrollcalError, ScrollcalResult},
        style::PALETTE_LEN,
    },
    rows::encoder::RowArrays,
};

/// The metadata block as a shader reads it back out of a texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedBlock {
    pub width: u32,
    pub height: u32,
    pub fields: Vec<(&'static str, Vec<Cell>)>,
    pub rows: RowArrays,
}

/// Decode the metadata block in the top-right corner of `img`.
///
/// Pixels pass through the host sampling model first, so this reads what the shader would.
#[tracing::instrument(skip(img), fields(w = img.width(), h = img.height()))]
pub fn read_block(img: &RgbaImage) -> ScrollcalResult<DecodedBlock> {
    let (img_w, img_h) = img.dimensions();
    if img_w == 0 || img_h == 0 {
        return Err(ScrollcalError::asset("image too small to hold a metadata block"));
    }
    let width = pixel::decode(*img.get_pixel(img_w - 1, 0), COORD_BITS)?;
    if width == 0 || width > img_w {
        return Err(ScrollcalError::asset(format!(
            "metadata block claims width {width} in a {img_w}x{img_h} image"
        )));
    }
    // A one-pixel-wide block stores its height on the next row.
    let (hx, hy) = traversal_xy(img_w, width, 1);
    if hy >= img_h {
        return Err(ScrollcalError::asset("image too small to hold a metadata block"));
    }
    let height = pixel::decode(*img.get_pixel(hx, hy), COORD_BITS)?;
    if height > img_h {
        return Err(ScrollcalError::asset(format!(
            "metadata block claims {width}x{height} in a {img_w}x{img_h} image"
        )));
    }

    let capacity = width as usize * height as usize;
    let at = |i: usize| -> ScrollcalResult<image::Rgba<u8>> {
        if i >= capacity {
            return Err(ScrollcalError::configuration(format!(
                "read past the end of the {width}x{height} metadata block"
            )));
        }
        let (x, y) = traversal_xy(img_w, width, i);
        Ok(*img.get_pixel(x, y))
    };

    let mut index = 0;
    let mut fields = Vec::with_capacity(FIXED_FIELDS.len());
    for field in FIXED_FIELDS {
        let mut cells = Vec::with_capacity(field.count);
        for _ in 0..field.count {
            let px = at(index)?;
            index += 1;
            cells.push(match field.kind {
                FieldKind::Value { bits } => Cell::Value(pixel::decode(px, bits)?),
                FieldKind::Color => Cell::Color(Rgb([px[0], px[1], px[2]])),
            });
        }
        fields.push((field.name, cells));
    }

    let mut block = DecodedBlock {
        width,
        height,
        fields,
        rows: RowArrays::default(),
    };
    let row_count = block.value("row_count")? as usize;

    let tail = fixed_len().div_ceil(width as usize) * width as usize;
    let read_array = |start: usize| -> ScrollcalResult<Vec<u32>> {
        (start..start + row_count)
            .map(|i| pixel::decode(at(i)?, ROW_BITS))
            .collect()
    };
    let prior = read_array(tail)?;
    let info = read_array(tail + row_count)?;
    block.rows = RowArrays::from_wire(&prior, &info)?;

    tracing::debug!(width, height, rows = row_count, "decoded metadata block");
    Ok(block)
}

impl DecodedBlock {
    fn cells(&self, name: &str) -> ScrollcalResult<&[Cell]> {
        self.fields
            .iter()
            .find_map(|(n, c)| (*n == name).then_some(c.as_slice()))
            .ok_or_else(|| ScrollcalError::configuration(format!("no field '{name}'")))
    }

    /// Integer entries of a field.
    pub fn values(&self, name: &str) -> ScrollcalResult<Vec<u32>> {
        self.cells(name)?
            .iter()
            .map(|c| match c {
                Cell::Value(v) => Ok(*v),
                Cell::Color(_) => Err(ScrollcalError::configuration(format!(
                    "field '{name}' holds colors"
                ))),
            })
            .collect()
    }

    /// The single integer of a scalar field.
    pub fn value(&self, name: &str) -> ScrollcalResult<u32> {
        self.values(name)?
            .first()
            .copied()
            .ok_or_else(|| ScrollcalError::configuration(format!("field '{name}' is empty")))
    }

    pub fn palette(&self) -> ScrollcalResult<[Rgb<u8>; PALETTE_LEN]> {
        let mut out = [Rgb([0; 3]); PALETTE_LEN];
        let cells = self.cells("palette")?;
        if cells.len() != PALETTE_LEN {
            return Err(ScrollcalError::configuration("palette has the wrong length"));
        }
        for (slot, cell) in out.iter_mut().zip(cells) {
            let Cell::Color(c) = cell else {
                return Err(ScrollcalError::configuration("palette holds non-colors"));
            };
            *slot = *c;
        }
        Ok(out)
    }

    /// Rebuild the render configuration. The unscaled template size is not stored and is
    /// reported as the viewport size.
    pub fn config(&self) -> ScrollcalResult<Config> {
        let v = |name: &str| self.value(name);
        let col_divs = self.values("col_divs")?;
        let col_divs: [u32; 3] = col_divs
            .try_into()
            .map_err(|_| ScrollcalError::configuration("col_divs has the wrong length"))?;
        Ok(Config {
            template_size: (v("viewport_w")?, v("viewport_h")?),
            viewport_w: v("viewport_w")?,
            viewport_h: v("viewport_h")?,
            header_h: v("header_h")?,
            footer_h: v("footer_h")?,
            border_l: v("border_l")?,
            border_r: v("border_r")?,
            day_header_height: v("day_header_height")?,
            header_blend_start: v("header_blend_start")?,
            header_blend_end: v("header_blend_end")?,
            scroll_split_point: v("scroll_split_point")?,
            col_divs,
            palette: self.palette()?,
            section_pad: v("section_pad")?,
            scroll_height: v("scroll_height")?,
            scroll_tex_y: v("scroll_tex_y")?,
            bg_sample_y: v("bg_sample_y")?,
            bg_sample_h: v("bg_sample_h")?,
            header_tex_y: v("header_tex_y")?,
            footer_tex_y: v("footer_tex_y")?,
            day_header_tex_x: v("day_header_tex_x")?,
            day_header_tex_alpha_x: v("day_header_tex_alpha_x")?,
            day_header_tex_y: v("day_header_tex_y")?,
            day_header_side_width: v("day_header_side_width")?,
            day_header_mid_width: v("day_header_mid_width")?,
            day_header_true_width: v("day_header_true_width")?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/inspect.rs"]
mod tests;
