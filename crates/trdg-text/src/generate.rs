//! Single-call entry point: wrap, reshape, lay out, composite and label.

use image::{RgbImage, RgbaImage};
use rand::Rng;

use crate::bidi::{ReshapeOptions, to_visual};
use crate::error::Result;
use crate::font::FontSet;
use crate::label::build_label;
use crate::layout::{
    Alignment, LayoutOptions, Orientation, TextBlock, effective_alignment, wrap_text,
};
use crate::raster::{BoundingBox, ColorSpec, Compositor, Palette, char_bounding_boxes};

/// Everything one generation call needs besides the text and fonts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub orientation: Orientation,
    pub space_width: f32,
    pub character_spacing: u32,
    pub alignment: Alignment,
    pub word_split: bool,
    /// Crop the result to its inked bounds.
    pub fit: bool,
    pub stroke_width: u32,
    pub text_color: ColorSpec,
    pub stroke_fill: ColorSpec,
    /// Treat the input as right-to-left: reshape and reorder before layout.
    pub rtl: bool,
    /// Language code; `ckb` removes harakat while reshaping.
    pub language: String,
    /// Wrap width in characters; 0 disables wrapping.
    pub max_line_length: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            space_width: 1.0,
            character_spacing: 0,
            alignment: Alignment::Center,
            word_split: false,
            fit: false,
            stroke_width: 0,
            text_color: ColorSpec::default(),
            stroke_fill: ColorSpec::default(),
            rtl: false,
            language: "en".to_string(),
            max_line_length: 0,
        }
    }
}

impl RenderOptions {
    /// Alignment after the right-to-left adjustment.
    pub fn effective_alignment(&self) -> Alignment {
        effective_alignment(self.rtl, self.alignment)
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            orientation: self.orientation,
            space_width: self.space_width,
            character_spacing: self.character_spacing,
            word_split: self.word_split,
            alignment: self.effective_alignment(),
        }
    }
}

/// Output of one generation call.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    /// Instance mask, pixel-aligned with `image`.
    pub mask: RgbImage,
    /// Logical text of the characters that were drawn.
    pub label: String,
    /// Glyphs drawn, spaces included; mask indices run `1..=glyph_count`.
    pub glyph_count: u32,
}

impl Rendered {
    pub fn char_bounding_boxes(&self) -> Vec<Option<BoundingBox>> {
        char_bounding_boxes(&self.mask, self.glyph_count as usize)
    }
}

/// Render `text` with colors sampled from `rng`.
///
/// The fill color is sampled first, then the stroke color, once per call.
pub fn generate<R: Rng + ?Sized>(
    text: &str,
    fonts: &FontSet<'_>,
    options: &RenderOptions,
    rng: &mut R,
) -> Result<Rendered> {
    let palette = Palette::sample(&options.text_color, &options.stroke_fill, rng);
    generate_with_palette(text, fonts, options, palette)
}

/// Render `text` with fixed colors. Deterministic for the same inputs.
pub fn generate_with_palette(
    text: &str,
    fonts: &FontSet<'_>,
    options: &RenderOptions,
    palette: Palette,
) -> Result<Rendered> {
    let logical = wrap_text(text, options.max_line_length);
    let visual = if options.rtl {
        to_visual(&logical, &ReshapeOptions::for_language(&options.language))
    } else {
        logical.clone()
    };

    let block = TextBlock::layout(&visual, fonts, &options.layout_options());
    let mut compositor = Compositor::new(block.width, block.height, palette, options.stroke_width);
    compositor.draw_all(&block.glyphs)?;
    let glyph_count = compositor.drawn();
    let (image, mask) = compositor.finish(options.fit);

    Ok(Rendered {
        image,
        mask,
        label: build_label(&logical, fonts),
        glyph_count,
    })
}
