use image::{Rgba, RgbaImage};

use crate::foundation::error::{ScrollcalError, ScrollcalResult};

/// A day-header banner cut into two end caps and a repeatable middle.
///
/// Color and coverage are kept in separate sprites, both laid out as
/// `[left cap | middle | right cap]`. The color sprite holds straight (unpremultiplied) RGB with
/// full alpha; the alpha sprite holds coverage replicated in RGB. The shader recombines them, which
/// keeps filtering from darkening edges the way premultiplied data would.
#[derive(Clone, Debug)]
pub struct SlicedHeader {
    color: RgbaImage,
    alpha: RgbaImage,
    cap_width: u32,
    mid_width: u32,
    true_width: u32,
}

impl SlicedHeader {
    /// Cut `src` into caps of `cap_width` and a middle of `mid_width` taken from its center.
    pub fn slice(src: &RgbaImage, cap_width: u32, mid_width: u32) -> ScrollcalResult<Self> {
        let (w, h) = src.dimensions();
        if h == 0 {
            return Err(ScrollcalError::asset("day header image is empty"));
        }
        let sprite_w = cap_width
            .checked_mul(2)
            .and_then(|caps| caps.checked_add(mid_width))
            .ok_or_else(|| {
                ScrollcalError::configuration(format!(
                    "{cap_width}px caps and a {mid_width}px middle overflow the sprite width"
                ))
            })?;
        if mid_width == 0 || sprite_w > w {
            return Err(ScrollcalError::asset(format!(
                "day header is {w} wide; needs at least {sprite_w} for {cap_width}px caps and a \
                 {mid_width}px middle"
            )));
        }

        let mid_src = (w - mid_width) / 2;
        let source_x = |x: u32| {
            if x < cap_width {
                x
            } else if x < cap_width + mid_width {
                mid_src + (x - cap_width)
            } else {
                w - sprite_w + x
            }
        };

        let mut color = RgbaImage::new(sprite_w, h);
        let mut alpha = RgbaImage::new(sprite_w, h);
        for y in 0..h {
            for x in 0..sprite_w {
                let [r, g, b, a] = src.get_pixel(source_x(x), y).0;
                color.put_pixel(x, y, Rgba([r, g, b, 255]));
                alpha.put_pixel(x, y, Rgba([a, a, a, 255]));
            }
        }

        tracing::debug!(sprite_w, height = h, "sliced day header");
        Ok(Self {
            color,
            alpha,
            cap_width,
            mid_width,
            true_width: w,
        })
    }

    pub fn color(&self) -> &RgbaImage {
        &self.color
    }

    pub fn alpha(&self) -> &RgbaImage {
        &self.alpha
    }

    pub fn cap_width(&self) -> u32 {
        self.cap_width
    }

    pub fn mid_width(&self) -> u32 {
        self.mid_width
    }

    /// Width of the source banner, which is the width it is shown at.
    pub fn true_width(&self) -> u32 {
        self.true_width
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    /// Width of each sprite.
    pub fn sprite_width(&self) -> u32 {
        self.color.width()
    }

    /// Rebuild a straight-alpha banner `width` wide by tiling the middle between the caps.
    pub fn expand(&self, width: u32) -> ScrollcalResult<RgbaImage> {
        let caps = self.cap_width * 2;
        if width < caps {
            return Err(ScrollcalError::configuration(format!(
                "cannot expand day header to {width}; caps alone are {caps} wide"
            )));
        }
        let sprite_w = self.sprite_width();
        let mut out = RgbaImage::new(width, self.height());
        for y in 0..self.height() {
            for x in 0..width {
                let sx = if x < self.cap_width {
                    x
                } else if x >= width - self.cap_width {
                    sprite_w - (width - x)
                } else {
                    self.cap_width + (x - self.cap_width) % self.mid_width
                };
                let [r, g, b, _] = self.color.get_pixel(sx, y).0;
                let a = self.alpha.get_pixel(sx, y).0[0];
                out.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
        Ok(out)
    }

    /// Largest channel difference across the wrap-around seam of the middle slice.
    pub fn seam_error(&self) -> u8 {
        let first = self.cap_width;
        let last = self.cap_width + self.mid_width - 1;
        let mut worst = 0u8;
        for sprite in [&self.color, &self.alpha] {
            for y in 0..sprite.height() {
                let a = sprite.get_pixel(first, y).0;
                let b = sprite.get_pixel(last, y).0;
                for (ca, cb) in a.iter().zip(b.iter()) {
                    worst = worst.max(ca.abs_diff(*cb));
                }
            }
        }
        worst
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slicer/day_header.rs"]
mod tests;
