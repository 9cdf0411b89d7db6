use anyhow::Context;
use image::{Rgba, RgbaImage, imageops::FilterType};

use crate::foundation::{
    error::{ScrollcalError, ScrollcalResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Decode an encoded image (PNG and friends) to straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> ScrollcalResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Resample to `width`, keeping the aspect ratio.
pub fn scale_to_width(img: &RgbaImage, width: u32) -> RgbaImage {
    if img.width() == width || img.width() == 0 {
        return img.clone();
    }
    let height = (u64::from(img.height()) * u64::from(width))
        .div_ceil(u64::from(img.width()))
        .max(1) as u32;
    image::imageops::resize(img, width, height, FilterType::Triangle)
}

pub fn premultiply(px: Rgba<u8>) -> PremulRgba8 {
    let [r, g, b, a] = px.0;
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Blend straight-alpha `src` over `dst` with its top-left corner at `(x, y)`.
///
/// `dst` is treated as premultiplied, which holds for the opaque canvas it is used on.
/// Parts of `src` outside `dst` are dropped.
pub fn over_at(dst: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, px) in src.enumerate_pixels() {
        let (dx, dy) = (x + sx, y + sy);
        if dx >= dst.width() || dy >= dst.height() {
            continue;
        }
        let d = dst.get_pixel_mut(dx, dy);
        *d = Rgba(over(d.0, premultiply(*px)));
    }
}

/// Copy `src` into `dst` verbatim, alpha included.
pub fn copy_at(dst: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) -> ScrollcalResult<()> {
    if x + src.width() > dst.width() || y + src.height() > dst.height() {
        return Err(ScrollcalError::layout(format!(
            "{}x{} element at ({x}, {y}) overflows {}x{} texture",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    for (sx, sy, px) in src.enumerate_pixels() {
        dst.put_pixel(x + sx, y + sy, *px);
    }
    Ok(())
}

/// Cut a region, failing if it leaves the image.
pub fn crop(img: &RgbaImage, x: u32, y: u32, w: u32, h: u32) -> ScrollcalResult<RgbaImage> {
    if x + w > img.width() || y + h > img.height() {
        return Err(ScrollcalError::asset(format!(
            "region {w}x{h} at ({x}, {y}) lies outside {}x{} image",
            img.width(),
            img.height()
        )));
    }
    Ok(image::imageops::crop_imm(img, x, y, w, h).to_image())
}

/// Swap axes.
pub fn transpose(img: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(img.height(), img.width(), |x, y| *img.get_pixel(y, x))
}

/// Grow an image by repeating its edge pixels outward.
pub fn extend_edges(img: &RgbaImage, top: u32, bottom: u32, left: u32, right: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return RgbaImage::new(w + left + right, h + top + bottom);
    }
    RgbaImage::from_fn(w + left + right, h + top + bottom, |x, y| {
        let sx = x.saturating_sub(left).min(w - 1);
        let sy = y.saturating_sub(top).min(h - 1);
        *img.get_pixel(sx, sy)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
