use std::path::Path;
use std::sync::Arc;

use swash::scale::image::Image;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Stroke;
use swash::{FontRef, GlyphId, Metrics};

use crate::font::{FontError, FontMetrics, Result, ScaledFontMetrics};

/// Loaded font face backed by a font file (TTF/OTF/TTC).
///
/// This is a thin wrapper around `swash::FontRef` that owns the
/// underlying font data and exposes the character map, metrics and
/// glyph rasterization helpers the layout engine and compositor need.
#[derive(Debug, Clone)]
pub struct FontFace {
    /// Full font data.
    data: Arc<[u8]>,
    /// Index of this face within the file (collections).
    index: u32,
    /// Offset to the table directory for this font.
    offset: u32,
    /// Cache key used internally by swash.
    key: swash::CacheKey,
    /// Extracted font metrics in font units.
    metrics: FontMetrics,
}

impl FontFace {
    /// Create a font face from raw bytes and a font index within the file.
    pub fn from_bytes(data: Arc<[u8]>, index: usize) -> Result<Self> {
        let font =
            FontRef::from_index(&data, index).ok_or(FontError::InvalidFont { path: None })?;
        let metrics = Self::metrics_from_swash(&font);
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            index: index as u32,
            offset,
            key,
            metrics,
        })
    }

    /// Create a font face from raw bytes owned by a `Vec<u8>`.
    pub fn from_vec(data: Vec<u8>, index: usize) -> Result<Self> {
        Self::from_bytes(Arc::from(data), index)
    }

    /// Create a font face from a font file on disk.
    pub fn from_path(path: impl AsRef<Path>, index: usize) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_vec(data, index).map_err(|err| err.with_path(path))
    }

    /// Expose the raw font bytes for integration with other libraries
    /// that parse the font themselves (e.g. harfrust).
    pub fn as_bytes(&self) -> Arc<[u8]> {
        self.data.clone()
    }

    /// Face index within the font file.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Return a transient `FontRef` for interacting with swash APIs.
    fn as_swash_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    fn metrics_from_swash(font: &FontRef<'_>) -> FontMetrics {
        // Use default (no variation) coordinates.
        let Metrics {
            units_per_em,
            ascent,
            descent,
            leading,
            ..
        } = font.metrics(&[]);

        FontMetrics {
            ascent,
            descent,
            line_gap: leading,
            units_per_em,
        }
    }

    /// Font metrics in font units.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Font metrics scaled to the requested pixel size (px per em).
    pub fn scaled_metrics(&self, font_size: f32) -> ScaledFontMetrics {
        self.metrics.scale_to_pixels(font_size)
    }

    /// Glyph mapped to `ch` by the character map, or `None` when the
    /// font maps it to `.notdef`.
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        match self.as_swash_ref().charmap().map(ch) {
            0 => None,
            gid => Some(gid),
        }
    }

    /// Whether the character map provides a glyph for `ch`.
    pub fn has_glyph(&self, ch: char) -> bool {
        self.glyph_id(ch).is_some()
    }

    /// Horizontal advance of a glyph in pixels at `font_size`.
    pub fn advance(&self, glyph_id: GlyphId, font_size: f32) -> f32 {
        self.as_swash_ref()
            .glyph_metrics(&[])
            .scale(font_size)
            .advance_width(glyph_id)
    }

    /// Rasterize a glyph into an alpha coverage image.
    ///
    /// With `stroke` set, the outline is stroked with a pen of that width
    /// instead of filled. Scalable outlines are preferred; embedded bitmaps
    /// are used for fills when a font has no outline for the glyph.
    pub fn render_glyph(
        &self,
        glyph_id: GlyphId,
        font_size: f32,
        stroke: Option<f32>,
    ) -> Option<Image> {
        let mut context = ScaleContext::new();
        let font = self.as_swash_ref();
        let mut scaler = context.builder(font).size(font_size).hint(true).build();
        match stroke {
            Some(width) => Render::new(&[Source::Outline])
                .style(Stroke::new(width))
                .render(&mut scaler, glyph_id),
            None => Render::new(&[
                Source::Outline,
                Source::Bitmap(StrikeWith::BestFit),
                Source::ColorBitmap(StrikeWith::BestFit),
            ])
            .render(&mut scaler, glyph_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_bytes() {
        let err = FontFace::from_vec(b"definitely not a font".to_vec(), 0).unwrap_err();
        assert!(matches!(err, FontError::InvalidFont { path: None }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FontFace::from_path("/nonexistent/trdg/font.ttf", 0).unwrap_err();
        match err {
            FontError::Io { path, .. } => {
                assert!(path.ends_with("font.ttf"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
