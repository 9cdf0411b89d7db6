use image::RgbaImage;

use crate::{
    codec::pixel,
    foundation::error::{ScrollcalError, ScrollcalResult},
};

/// Cells per side of the calibration grid.
pub const GRID: u32 = 16;

/// 16x16 grid of encoded values `0..256` for checking a host's sampler.
///
/// Value `x + 16 * row` sits in column `x`, with rows counted from the bottom to match texture UVs.
pub fn test_pattern(cell: u32) -> ScrollcalResult<RgbaImage> {
    if cell == 0 {
        return Err(ScrollcalError::configuration("cell size must be > 0"));
    }
    let dim = GRID * cell;
    let mut img = RgbaImage::new(dim, dim);
    for gy in 0..GRID {
        for gx in 0..GRID {
            let value = expected_value(gx, gy);
            let px = pixel::encode(value, 8)?;
            for y in gy * cell..(gy + 1) * cell {
                for x in gx * cell..(gx + 1) * cell {
                    img.put_pixel(x, y, px);
                }
            }
        }
    }
    Ok(img)
}

/// Value a pattern cell is expected to decode to.
pub fn expected_value(gx: u32, gy: u32) -> u32 {
    gx + ((GRID - 1 - gy) << 4)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/pattern.rs"]
mod tests;
