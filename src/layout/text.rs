use vello_cpu::{RenderContext, kurbo};

use crate::foundation::error::{ScrollcalError, ScrollcalResult};

/// How shaped text puts ink on the mask.
#[derive(Clone, Debug)]
pub enum TextInk {
    /// Glyph run from a real font, positioned relative to the text box origin.
    Glyphs {
        font: vello_cpu::peniko::FontData,
        size: f32,
        glyphs: Vec<vello_cpu::Glyph>,
    },
    /// Solid boxes standing in for glyphs.
    Blocks(Vec<kurbo::Rect>),
}

/// A laid out text box. Coordinates are relative to its top-left corner.
#[derive(Clone, Debug)]
pub struct ShapedText {
    pub width: f32,
    pub height: f32,
    /// Baseline of the first line.
    pub baseline: f32,
    pub lines: usize,
    ink: Vec<TextInk>,
}

impl ShapedText {
    /// An empty box with no ink.
    pub fn empty() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            baseline: 0.0,
            lines: 0,
            ink: Vec::new(),
        }
    }

    pub fn ink(&self) -> &[TextInk] {
        &self.ink
    }

    /// Draw with the box's top-left corner at `(x, y)`, using the context's current paint.
    pub fn draw(&self, ctx: &mut RenderContext, x: f64, y: f64) {
        ctx.set_transform(kurbo::Affine::translate((x, y)));
        for ink in &self.ink {
            match ink {
                TextInk::Glyphs { font, size, glyphs } => {
                    ctx.glyph_run(font)
                        .font_size(*size)
                        .fill_glyphs(glyphs.iter().copied());
                }
                TextInk::Blocks(rects) => {
                    for r in rects {
                        ctx.fill_rect(r);
                    }
                }
            }
        }
        ctx.set_transform(kurbo::Affine::IDENTITY);
    }
}

/// Turns strings into positioned ink.
pub trait TextShaper {
    /// Lay out `text` at `size_px`, wrapping at `max_width` and keeping at most `max_lines` lines.
    fn shape(
        &mut self,
        text: &str,
        size_px: f32,
        max_width: f32,
        max_lines: usize,
    ) -> ScrollcalResult<ShapedText>;
}

fn check_size(size_px: f32) -> ScrollcalResult<()> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(ScrollcalError::layout("text size_px must be finite and > 0"));
    }
    Ok(())
}

/// Shapes with `parley` against a single caller-supplied font.
pub struct ParleyShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl ParleyShaper {
    /// Register `font_bytes` and shape everything with its first family.
    pub fn new(font_bytes: Vec<u8>) -> ScrollcalResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ScrollcalError::asset("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ScrollcalError::asset("registered font family has no name"))?
            .to_string();

        tracing::info!(family = %family_name, "loaded font");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }
}

impl TextShaper for ParleyShaper {
    fn shape(
        &mut self,
        text: &str,
        size_px: f32,
        max_width: f32,
        max_lines: usize,
    ) -> ScrollcalResult<ShapedText> {
        check_size(size_px)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(Some(max_width));
        layout.align(
            Some(max_width),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let mut shaped = ShapedText::empty();
        for line in layout.lines().take(max_lines) {
            let m = line.metrics();
            if shaped.lines == 0 {
                shaped.baseline = m.baseline;
            }
            shaped.lines += 1;
            shaped.width = shaped.width.max(m.advance - m.trailing_whitespace);
            shaped.height = m.baseline + m.descent;

            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                shaped.ink.push(TextInk::Glyphs {
                    font: self.font.clone(),
                    size: run.run().font_size(),
                    glyphs,
                });
            }
        }
        Ok(shaped)
    }
}

/// Draws one box per character; used when no font is available.
///
/// ASCII advances by 0.6 em, everything else by a full em. Lines are 1.25 em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderShaper;

impl PlaceholderShaper {
    fn advance(c: char, size_px: f32) -> f32 {
        if c.is_ascii() { size_px * 0.6 } else { size_px }
    }
}

impl TextShaper for PlaceholderShaper {
    fn shape(
        &mut self,
        text: &str,
        size_px: f32,
        max_width: f32,
        max_lines: usize,
    ) -> ScrollcalResult<ShapedText> {
        check_size(size_px)?;

        let line_h = size_px * 1.25;
        let ascent = size_px * 0.8;
        let mut shaped = ShapedText::empty();
        let mut rects = Vec::new();
        let mut x = 0.0f32;
        let mut line = 0usize;

        for c in text.chars() {
            let adv = Self::advance(c, size_px);
            if x > 0.0 && x + adv > max_width {
                line += 1;
                x = 0.0;
            }
            if line >= max_lines {
                break;
            }
            if !c.is_whitespace() {
                let top = line as f32 * line_h + (line_h - ascent) / 2.0;
                rects.push(kurbo::Rect::new(
                    f64::from(x + adv * 0.1),
                    f64::from(top),
                    f64::from(x + adv * 0.9),
                    f64::from(top + ascent),
                ));
            }
            x += adv;
            shaped.width = shaped.width.max(x);
            shaped.lines = line + 1;
        }

        shaped.height = shaped.lines as f32 * line_h;
        shaped.baseline = if shaped.lines > 0 {
            (line_h + ascent) / 2.0
        } else {
            0.0
        };
        shaped.ink.push(TextInk::Blocks(rects));
        Ok(shaped)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
