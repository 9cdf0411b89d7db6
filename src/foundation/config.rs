use image::Rgb;

/// Per-render geometry and palette read by the shader.
///
/// Texture coordinates place the origin at the upper left and are expressed in texels. Viewport
/// coordinates are relative to the unscaled-on-screen display, which is the template scaled to the
/// viewport width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Template canvas size as supplied, before scaling to the viewport width.
    pub template_size: (u32, u32),

    /// Overall display width.
    pub viewport_w: u32,
    /// Overall display height.
    pub viewport_h: u32,

    /// Height of the unscrolled header strip above the scrollable section.
    pub header_h: u32,
    /// Height of the unscrolled footer strip below the scrollable section.
    pub footer_h: u32,
    /// Width of the unscrolled left side border.
    pub border_l: u32,
    /// Width of the unscrolled right side border.
    pub border_r: u32,

    /// Height of a day header.
    pub day_header_height: u32,

    /// Band at the top of the first header which never scrolls.
    pub header_blend_start: u32,
    /// End of the band blended over to the scrollable part of the header.
    pub header_blend_end: u32,
    /// Y-position at which the side borders split when scrolling off the header.
    pub scroll_split_point: u32,

    /// X-coordinates of the dividers between the four color columns.
    pub col_divs: [u32; 3],

    /// Text palette. Index 0 is reserved for date-header text.
    pub palette: [Rgb<u8>; 8],

    /// Padding between texture elements, guarding against mipmap bleed.
    pub section_pad: u32,

    /// Height of the text section in layout rows (three rows per texel row).
    pub scroll_height: u32,
    /// Texture y at which the text section begins.
    pub scroll_tex_y: u32,

    /// Texture y of the background sample strip.
    pub bg_sample_y: u32,
    /// Height of the background sample strip.
    pub bg_sample_h: u32,

    /// Texture y of the header strip.
    pub header_tex_y: u32,
    /// Texture y of the footer strip.
    pub footer_tex_y: u32,

    /// Texture x of the sliced day-header color sprite.
    pub day_header_tex_x: u32,
    /// Texture x of the sliced day-header alpha sprite.
    pub day_header_tex_alpha_x: u32,
    /// Texture y shared by both day-header sprites.
    pub day_header_tex_y: u32,
    /// Width of each end cap.
    pub day_header_side_width: u32,
    /// Width of the repeatable middle slice.
    pub day_header_mid_width: u32,
    /// Width the day header is stretched to on screen.
    pub day_header_true_width: u32,
}

impl Config {
    /// Width of one day-header sprite (both caps plus the middle slice).
    pub fn day_header_sprite_width(&self) -> u32 {
        self.day_header_side_width * 2 + self.day_header_mid_width
    }
}

#[cfg(test)]
impl Config {
    /// Geometry of the reference template with an empty text section.
    pub(crate) fn fixture() -> Self {
        use crate::foundation::style::Style;

        let style = Style::default();
        Self {
            template_size: (1024, 1447),
            viewport_w: 1024,
            viewport_h: 1447,
            header_h: 585,
            footer_h: 134,
            border_l: 23,
            border_r: 71,
            day_header_height: 95,
            header_blend_start: 8,
            header_blend_end: 16,
            scroll_split_point: 1313,
            col_divs: style.col_divs(),
            palette: style.palette,
            section_pad: 32,
            scroll_height: 0,
            scroll_tex_y: 1000,
            bg_sample_y: 900,
            bg_sample_h: 32,
            header_tex_y: 200,
            footer_tex_y: 820,
            day_header_tex_x: 200,
            day_header_tex_alpha_x: 250,
            day_header_tex_y: 0,
            day_header_side_width: 8,
            day_header_mid_width: 1,
            day_header_true_width: 930,
        }
    }
}
