use image::{Rgba, RgbaImage};
use vello_cpu::{RenderContext, kurbo, peniko};

use crate::foundation::error::{ScrollcalError, ScrollcalResult};

/// Monochrome coverage canvas for calendar text and shapes.
pub struct MaskCanvas {
    ctx: RenderContext,
    width: u16,
    height: u16,
}

impl MaskCanvas {
    pub fn new(width: u32, height: u32) -> ScrollcalResult<Self> {
        let to_u16 = |v: u32, what: &str| {
            u16::try_from(v)
                .ok()
                .filter(|&v| v > 0)
                .ok_or_else(|| ScrollcalError::layout(format!("mask {what} {v} out of range")))
        };
        let width = to_u16(width, "width")?;
        let height = to_u16(height, "height")?;

        let mut ctx = RenderContext::new(width, height);
        ctx.set_paint(peniko::Color::from_rgba8(255, 255, 255, 255));
        Ok(Self { ctx, width, height })
    }

    /// Drawing context; paint is preset to full coverage.
    pub fn context(&mut self) -> &mut RenderContext {
        &mut self.ctx
    }

    pub fn fill_rect(&mut self, rect: kurbo::Rect) {
        self.ctx.set_transform(kurbo::Affine::IDENTITY);
        self.ctx.fill_rect(&rect);
    }

    pub fn fill_polygon(&mut self, points: &[(f64, f64)]) {
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        let mut path = kurbo::BezPath::new();
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }
        path.close_path();
        self.ctx.set_transform(kurbo::Affine::IDENTITY);
        self.ctx.fill_path(&path);
    }

    /// Rasterize and return one coverage byte per pixel, row-major.
    pub fn finish(mut self) -> Vec<u8> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect()
    }
}

/// Fold a coverage mask into a third of its height, one third per color channel.
///
/// Rows `[0, n)` land in blue, `[n, 2n)` in green and `[2n, 3n)` in red, where `n = rows / 3`.
pub fn squash_rgb(coverage: &[u8], width: u32, rows: u32) -> ScrollcalResult<RgbaImage> {
    if rows % 3 != 0 {
        return Err(ScrollcalError::layout(format!(
            "text rows ({rows}) must be a multiple of 3"
        )));
    }
    if coverage.len() != width as usize * rows as usize {
        return Err(ScrollcalError::layout(format!(
            "coverage has {} bytes; expected {width}x{rows}",
            coverage.len()
        )));
    }
    let third = rows / 3;
    let at = |x: u32, y: u32| coverage[y as usize * width as usize + x as usize];
    Ok(RgbaImage::from_fn(width, third, |x, y| {
        Rgba([at(x, y + 2 * third), at(x, y + third), at(x, y), 255])
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
