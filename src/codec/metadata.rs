use image::{Rgba, RgbaImage};

use crate::{
    codec::{
        pixel,
        schema::{self, Cell, FIXED_FIELDS, FieldKind, PREV_DAY_HEADER, ROW_BITS, ROW_INFO},
    },
    foundation::{
        config::Config,
        error::{ScrollcalError, ScrollcalResult},
    },
    rows::encoder::RowArrays,
};

/// Pixels between the end of a section and the next block row.
const FILLER: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The encoded metadata block, in traversal order.
///
/// Index `i` lives at column `i % width` counted from the right edge of the image and row
/// `i / width` counted from the top. The block is anchored at the top-right corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataBlock {
    width: u32,
    height: u32,
    cells: Vec<Rgba<u8>>,
    offsets: Vec<(&'static str, usize)>,
}

impl MetadataBlock {
    /// Lay out `config` and `rows` into a block `width` pixels wide.
    ///
    /// The fixed fields come first; the row tail starts on the next block row and holds the
    /// `prev_day_header` array followed by the `row_info` array. Fails if the block would be taller
    /// than `max_height` or if any value overflows its field.
    #[tracing::instrument(skip(config, rows), fields(rows = rows.len()))]
    pub fn build(
        config: &Config,
        rows: &RowArrays,
        width: u32,
        max_height: u32,
    ) -> ScrollcalResult<Self> {
        if width == 0 {
            return Err(ScrollcalError::configuration(
                "metadata block has no room left of the day-header sprites",
            ));
        }
        if rows.len() != config.scroll_height as usize {
            return Err(ScrollcalError::configuration(format!(
                "row data has {} rows but the text section is {} rows tall",
                rows.len(),
                config.scroll_height
            )));
        }

        let w = width as usize;
        let fixed_rows = schema::fixed_len().div_ceil(w);
        let tail_rows = (rows.len() * 2).div_ceil(w);
        let height = u32::try_from(fixed_rows + tail_rows)
            .map_err(|_| ScrollcalError::configuration("metadata block height overflows"))?;
        if height > max_height {
            return Err(ScrollcalError::configuration(format!(
                "metadata block needs {height} rows but only {max_height} are reserved"
            )));
        }

        let row_count = u32::try_from(rows.len())
            .map_err(|_| ScrollcalError::configuration("row count overflows"))?;
        let mut block = Self {
            width,
            height,
            cells: Vec::with_capacity(w * height as usize),
            offsets: Vec::with_capacity(FIXED_FIELDS.len() + 2),
        };

        for field in FIXED_FIELDS {
            block.mark(field.name);
            for cell in schema::bind(field, config, (width, height), row_count)? {
                let px = match (cell, field.kind) {
                    (Cell::Value(v), FieldKind::Value { bits }) => {
                        pixel::encode(v, bits).map_err(|e| {
                            ScrollcalError::configuration(format!("field '{}': {e}", field.name))
                        })?
                    }
                    (Cell::Color(c), FieldKind::Color) => Rgba([c[0], c[1], c[2], 255]),
                    _ => {
                        return Err(ScrollcalError::configuration(format!(
                            "field '{}' bound to the wrong kind of value",
                            field.name
                        )));
                    }
                };
                block.cells.push(px);
            }
        }
        block.pad_to(fixed_rows * w);

        block.mark(PREV_DAY_HEADER);
        for word in rows.prior_header_words()? {
            block.cells.push(pixel::encode(word, ROW_BITS)?);
        }
        block.mark(ROW_INFO);
        for word in rows.row_info_words()? {
            block.cells.push(pixel::encode(word, ROW_BITS)?);
        }
        block.pad_to(w * height as usize);

        tracing::debug!(width, height, "metadata block laid out");
        Ok(block)
    }

    fn mark(&mut self, name: &'static str) {
        let offset = self.cells.len();
        tracing::trace!("#define SCROLLCAL_DSOFF_{} {offset}", name.to_ascii_uppercase());
        self.offsets.push((name, offset));
    }

    fn pad_to(&mut self, len: usize) {
        self.cells.resize(len, FILLER);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel offset of a field or row array from the start of the block.
    pub fn offset(&self, name: &str) -> Option<usize> {
        self.offsets
            .iter()
            .find_map(|&(n, o)| (n == name).then_some(o))
    }

    /// All field offsets, in block order.
    pub fn offsets(&self) -> &[(&'static str, usize)] {
        &self.offsets
    }

    /// Pixel at traversal index `i`.
    pub fn cell(&self, i: usize) -> Option<Rgba<u8>> {
        self.cells.get(i).copied()
    }

    /// Copy the block into the top-right corner of `img`, replacing what is there.
    pub fn write_into(&self, img: &mut RgbaImage) -> ScrollcalResult<()> {
        if img.width() < self.width || img.height() < self.height {
            return Err(ScrollcalError::layout(format!(
                "metadata block {}x{} does not fit in {}x{} image",
                self.width,
                self.height,
                img.width(),
                img.height()
            )));
        }
        for (i, px) in self.cells.iter().enumerate() {
            let (x, y) = traversal_xy(img.width(), self.width, i);
            img.put_pixel(x, y, *px);
        }
        Ok(())
    }
}

/// Image coordinates of traversal index `i` for a block `block_width` wide.
pub fn traversal_xy(image_width: u32, block_width: u32, i: usize) -> (u32, u32) {
    let col = (i % block_width as usize) as u32;
    let row = (i / block_width as usize) as u32;
    (image_width - 1 - col, row)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/metadata.rs"]
mod tests;
