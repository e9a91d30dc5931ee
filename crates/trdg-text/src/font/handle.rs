use core::fmt;
use std::sync::Arc;

use swash::scale::image::{Content, Image};

use crate::font::{FontFace, ScaledFontMetrics};
use crate::shaping::TextShaper;

/// A size-bound font the layout engine measures with and the compositor
/// draws with.
///
/// Implementations are read-only for the duration of a generation call.
pub trait FontHandle: fmt::Debug {
    /// Whether this font provides a renderable glyph for `ch`.
    fn has_glyph(&self, ch: char) -> bool;

    /// Advance width of `text` in pixels.
    fn advance_width(&self, text: &str) -> f32;

    /// Height of the rendered ink box of `text`, measured from the
    /// ascender line (the top of the draw position) to the lowest ink.
    fn text_height(&self, text: &str) -> u32;

    /// Rasterize `ch` relative to a draw origin at the ascender line.
    ///
    /// `stroke_width` is the outward dilation in pixels; 0 disables the
    /// stroke coverage.
    fn rasterize(&self, ch: char, stroke_width: u32) -> GlyphBitmap;
}

/// Alpha coverage positioned relative to a glyph's draw origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major, one byte per pixel.
    pub data: Vec<u8>,
}

impl Coverage {
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.width + x) as usize]
    }

    /// Distance from the draw origin's top to the bottom edge of the ink.
    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }
}

/// Fill and optional stroke coverage for one glyph.
#[derive(Debug, Clone, Default)]
pub struct GlyphBitmap {
    pub fill: Option<Coverage>,
    pub stroke: Option<Coverage>,
}

/// A [`FontFace`] bound to a pixel size.
#[derive(Debug, Clone)]
pub struct ScaledFont {
    face: Arc<FontFace>,
    size: f32,
    metrics: ScaledFontMetrics,
}

impl ScaledFont {
    pub fn new(face: Arc<FontFace>, size: f32) -> Self {
        let size = size.max(1.0);
        let metrics = face.scaled_metrics(size);
        Self {
            face,
            size,
            metrics,
        }
    }

    fn ascent_px(&self) -> i32 {
        self.metrics.ascent.round() as i32
    }

    fn coverage(&self, image: Image) -> Option<Coverage> {
        let placement = image.placement;
        let (width, height) = (placement.width, placement.height);
        if width == 0 || height == 0 {
            return None;
        }
        let data = match image.content {
            Content::Mask => image.data,
            // Derive coverage from the alpha channel.
            Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
            Content::SubpixelMask => image
                .data
                .chunks_exact(4)
                .map(|px| px[0].max(px[1]).max(px[2]))
                .collect(),
        };
        Some(Coverage {
            left: placement.left,
            top: self.ascent_px() - placement.top,
            width,
            height,
            data,
        })
    }

    fn fill_coverage(&self, ch: char) -> Option<Coverage> {
        let glyph_id = self.face.glyph_id(ch)?;
        let image = self.face.render_glyph(glyph_id, self.size, None)?;
        self.coverage(image)
    }
}

impl FontHandle for ScaledFont {
    fn has_glyph(&self, ch: char) -> bool {
        self.face.has_glyph(ch)
    }

    fn advance_width(&self, text: &str) -> f32 {
        if let Some(run) = TextShaper::shape_ltr(text, &self.face, self.size) {
            return run.width;
        }
        text.chars()
            .filter_map(|ch| self.face.glyph_id(ch))
            .map(|gid| self.face.advance(gid, self.size))
            .sum()
    }

    fn text_height(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|ch| self.fill_coverage(ch))
            .map(|cov| cov.bottom().max(0) as u32)
            .max()
            .unwrap_or_else(|| self.metrics.ink_band())
    }

    fn rasterize(&self, ch: char, stroke_width: u32) -> GlyphBitmap {
        let Some(glyph_id) = self.face.glyph_id(ch) else {
            return GlyphBitmap::default();
        };
        let fill = self
            .face
            .render_glyph(glyph_id, self.size, None)
            .and_then(|image| self.coverage(image));
        // A centered pen of twice the width dilates the outline outward by
        // `stroke_width` pixels.
        let stroke = (stroke_width > 0)
            .then(|| {
                self.face
                    .render_glyph(glyph_id, self.size, Some(2.0 * stroke_width as f32))
            })
            .flatten()
            .and_then(|image| self.coverage(image));
        GlyphBitmap { fill, stroke }
    }
}
