use chrono::{DateTime, FixedOffset};
use image::{Rgba, RgbaImage};

use crate::{
    calendar::model::CalendarDay,
    codec::{metadata::MetadataBlock, schema},
    foundation::{
        config::Config,
        error::{ScrollcalError, ScrollcalResult},
        math::Fnv1a64,
        style::{PAL_TEXT, Style},
    },
    layout::{calendar::layout_calendar, text::TextShaper},
    render::{
        mask::{MaskCanvas, squash_rgb},
        raster::{copy_at, crop, extend_edges, over_at, scale_to_width, transpose},
    },
    rows::encoder::{RowArrays, encode_rows},
    slicer::day_header::SlicedHeader,
};

/// Caller-supplied material for one texture.
#[derive(Clone, Copy, Debug)]
pub struct GenerateInputs<'a> {
    /// Full-screen template the calendar is drawn on.
    pub template: &'a RgbaImage,
    /// Transparent day-header banner.
    pub day_header: &'a RgbaImage,
    pub days: &'a [CalendarDay],
    /// Reference time for "ended" styling and the footer stamp.
    pub generated_at: DateTime<FixedOffset>,
    /// Identifier printed in the footer.
    pub branch: &'a str,
}

/// A finished texture and everything encoded into it.
#[derive(Clone, Debug)]
pub struct GeneratedTexture {
    pub image: RgbaImage,
    pub config: Config,
    pub rows: RowArrays,
    pub block: MetadataBlock,
    /// FNV-1a over the image dimensions and pixels.
    pub fingerprint: u64,
}

/// Top band holding the transposed side borders and both day-header sprites.
struct ReservedBand {
    image: RgbaImage,
    color_x: u32,
    alpha_x: u32,
}

/// Build the calendar texture.
///
/// Elements are stacked top to bottom: the reserved band (side borders, day-header sprites and
/// the metadata block in the top-right corner), then the header, footer and background-sample
/// strips, then the text section. Every strip is edge-extended by the section padding.
#[tracing::instrument(skip(inputs, style, shaper), fields(days = inputs.days.len()))]
pub fn generate(
    inputs: &GenerateInputs<'_>,
    style: &Style,
    shaper: &mut dyn TextShaper,
) -> ScrollcalResult<GeneratedTexture> {
    style.validate()?;
    let pad = style.section_pad;
    let vw = style.viewport_width;

    let (src_w, src_h) = inputs.template.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(ScrollcalError::asset("template image is empty"));
    }
    let template = scale_to_width(inputs.template, vw);
    let day_header = if src_w == vw {
        inputs.day_header.clone()
    } else {
        let w = (u64::from(inputs.day_header.width()) * u64::from(vw) / u64::from(src_w)) as u32;
        scale_to_width(inputs.day_header, w.max(1))
    };
    check_template(&template, style)?;

    let header = SlicedHeader::slice(&day_header, style.header_cap_width, style.header_mid_width)?;
    if header.seam_error() > 0 {
        tracing::warn!(
            seam_error = header.seam_error(),
            "day header middle slice does not tile seamlessly"
        );
    }
    if header.height() > header.true_width() {
        return Err(ScrollcalError::configuration(format!(
            "day header is {} tall but only {} wide",
            header.height(),
            header.true_width()
        )));
    }
    if header.true_width() + style.border_left > vw {
        return Err(ScrollcalError::asset(format!(
            "day header ({} wide) does not fit beside the left border",
            header.true_width()
        )));
    }

    let band = reserved_band(&template, &header, style)?;
    let band_w = band.image.width();
    let band_h = band.image.height();
    if band_w >= vw {
        return Err(ScrollcalError::configuration(format!(
            "reserved band is {band_w} wide; no room for the metadata block"
        )));
    }
    let block_w = vw - band_w;

    let mut y = band_h;
    let header_strip = header_strip(&template, &header, style)?;
    let header_tex_y = y + pad;
    y += header_strip.height();

    let footer_strip = footer_strip(&template, inputs, style, shaper)?;
    let footer_tex_y = y + pad;
    y += footer_strip.height();

    let bg_strip = crop(
        &template,
        0,
        style.template_sample_top,
        vw,
        style.bg_sample_height,
    )?;
    let bg_sample_y = y + pad;
    let bg_strip = extend_edges(&bg_strip, pad, pad, 0, 0);
    y += bg_strip.height();

    let scroll_tex_y = y + pad;
    if scroll_tex_y >= style.texture_max_height {
        return Err(ScrollcalError::configuration(format!(
            "template strips end at {scroll_tex_y}, past the {} texture limit",
            style.texture_max_height
        )));
    }

    // Rows are bounded by the texture and by what the metadata block can index.
    let fixed_rows = schema::fixed_len().div_ceil(block_w as usize) as u32;
    if fixed_rows > band_h {
        return Err(ScrollcalError::configuration(
            "metadata block does not fit in the reserved band",
        ));
    }
    let by_texture = (style.texture_max_height - scroll_tex_y) * 3;
    let by_block = ((band_h - fixed_rows) as usize * block_w as usize / 2) as u32;
    let layout = layout_calendar(
        inputs.days,
        style,
        header.height(),
        inputs.generated_at,
        shaper,
    )?;
    let rows = layout.rows(by_texture.min(by_block));
    let coverage = layout.rasterize(vw, rows)?;
    let text = squash_rgb(&coverage, vw, rows)?;
    let row_arrays = encode_rows(&layout.timeline(), rows, header.height())?;

    let config = Config {
        template_size: (src_w, src_h),
        viewport_w: vw,
        viewport_h: template.height(),
        header_h: style.variable_top,
        footer_h: template.height() - style.variable_bottom,
        border_l: style.border_left,
        border_r: style.border_right,
        day_header_height: header.height(),
        header_blend_start: style.header_blend_start,
        header_blend_end: style.header_blend_end,
        scroll_split_point: style.variable_bottom,
        col_divs: style.col_divs(),
        palette: style.palette,
        section_pad: pad,
        scroll_height: rows,
        scroll_tex_y,
        bg_sample_y,
        bg_sample_h: style.bg_sample_height,
        header_tex_y,
        footer_tex_y,
        day_header_tex_x: band.color_x,
        day_header_tex_alpha_x: band.alpha_x,
        day_header_tex_y: 0,
        day_header_side_width: header.cap_width(),
        day_header_mid_width: header.mid_width(),
        day_header_true_width: header.true_width(),
    };
    let block = MetadataBlock::build(&config, &row_arrays, block_w, band_h)?;

    let tex_w = vw.next_power_of_two();
    let tex_h = (scroll_tex_y + text.height())
        .next_power_of_two()
        .min(style.texture_max_height);
    let mut image = RgbaImage::from_pixel(tex_w, tex_h, Rgba(style.background_rgba));

    over_at(&mut image, &header_strip, 0, band_h);
    over_at(&mut image, &footer_strip, 0, footer_tex_y - pad);
    over_at(&mut image, &bg_strip, 0, bg_sample_y - pad);
    copy_at(&mut image, &text, 0, scroll_tex_y)?;

    // Reserved region last, unblended.
    copy_at(&mut image, &band.image, 0, 0)?;
    block.write_into(&mut image)?;

    let fingerprint = fingerprint(&image);
    tracing::info!(
        width = tex_w,
        height = tex_h,
        rows,
        block_w,
        block_h = block.height(),
        fingerprint = %format!("{fingerprint:016x}"),
        "generated texture"
    );

    Ok(GeneratedTexture {
        image,
        config,
        rows: row_arrays,
        block,
        fingerprint,
    })
}

fn check_template(template: &RgbaImage, style: &Style) -> ScrollcalResult<()> {
    let h = template.height();
    if style.variable_bottom >= h || style.template_sample_top + style.bg_sample_height > h {
        return Err(ScrollcalError::asset(format!(
            "template is {}x{h} after scaling; scroll section ends at {} and background sample at {}",
            template.width(),
            style.variable_bottom,
            style.template_sample_top + style.bg_sample_height
        )));
    }
    Ok(())
}

/// Side borders transposed and stacked, followed by the color and alpha day-header sprites.
fn reserved_band(
    template: &RgbaImage,
    header: &SlicedHeader,
    style: &Style,
) -> ScrollcalResult<ReservedBand> {
    let pad = style.section_pad;
    let scroll_h = style.variable_bottom - style.variable_top;

    let left = crop(template, 0, style.variable_top, style.border_left, scroll_h)?;
    let right = crop(
        template,
        style.outer_right,
        style.variable_top,
        style.border_right,
        scroll_h,
    )?;
    let left = extend_edges(&transpose(&left), pad, pad, 0, pad);
    let right = extend_edges(&transpose(&right), pad, pad, 0, pad);
    let side_w = left.width();

    let color = extend_edges(header.color(), 0, pad, pad, pad);
    let alpha = extend_edges(header.alpha(), 0, pad, pad, pad);
    let sprite_w = color.width();

    let width = side_w + sprite_w * 2;
    let height = (left.height() + right.height()).max(color.height());
    let mut image = RgbaImage::from_pixel(width, height, Rgba(style.background_rgba));
    copy_at(&mut image, &left, 0, 0)?;
    copy_at(&mut image, &right, 0, left.height())?;
    copy_at(&mut image, &color, side_w, 0)?;
    copy_at(&mut image, &alpha, side_w + sprite_w, 0)?;

    Ok(ReservedBand {
        image,
        color_x: side_w + pad,
        alpha_x: side_w + sprite_w + pad,
    })
}

/// Template above the scroll section with the top edge of the first day header drawn in.
fn header_strip(
    template: &RgbaImage,
    header: &SlicedHeader,
    style: &Style,
) -> ScrollcalResult<RgbaImage> {
    let corner = header.cap_width().min(header.height());
    let mut strip = crop(
        template,
        0,
        0,
        template.width(),
        style.variable_top + corner,
    )?;
    let banner = header.expand(header.true_width())?;
    let edge = crop(&banner, 0, 0, banner.width(), corner)?;
    over_at(&mut strip, &edge, style.border_left, style.variable_top);
    Ok(extend_edges(&strip, style.section_pad, style.section_pad, 0, 0))
}

/// Template below the scroll section with the generation stamp along its bottom edge.
fn footer_strip(
    template: &RgbaImage,
    inputs: &GenerateInputs<'_>,
    style: &Style,
    shaper: &mut dyn TextShaper,
) -> ScrollcalResult<RgbaImage> {
    let (w, h) = template.dimensions();
    let footer_h = h - style.variable_bottom;
    let mut strip = crop(template, 0, style.variable_bottom, w, footer_h)?;

    let stamp = format!("{} {}", inputs.generated_at.to_rfc3339(), inputs.branch);
    let text = shaper.shape(&stamp, style.font_config_info_px, w as f32, 1)?;
    let mut canvas = MaskCanvas::new(w, footer_h)?;
    text.draw(
        canvas.context(),
        0.0,
        f64::from(footer_h as f32 - text.height),
    );
    let [r, g, b] = style.palette[usize::from(PAL_TEXT)].0;
    let coverage = canvas.finish();
    let ink = RgbaImage::from_fn(w, footer_h, |x, y| {
        Rgba([r, g, b, coverage[(y * w + x) as usize]])
    });
    over_at(&mut strip, &ink, 0, 0);

    Ok(extend_edges(&strip, style.section_pad, style.section_pad, 0, 0))
}

fn fingerprint(image: &RgbaImage) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u32(image.width());
    h.write_u32(image.height());
    h.write_bytes(image.as_raw());
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
