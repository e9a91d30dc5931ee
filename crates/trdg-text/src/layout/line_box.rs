use crate::font::{FontHandle, GlyphSource};

/// A character that survived font resolution, with its measurements.
#[derive(Debug, Clone, Copy)]
pub struct GlyphInfo<'a> {
    pub ch: char,
    /// Pen advance in pixels (horizontal) or column width (vertical).
    pub advance: u32,
    /// Rendered height measured with the glyph's own font.
    pub height: u32,
    pub font: &'a dyn FontHandle,
    pub source: GlyphSource,
}

/// A single output line in horizontal layout, or the whole column in
/// vertical layout.
#[derive(Debug, Clone, Default)]
pub struct Line<'a> {
    pub glyphs: Vec<GlyphInfo<'a>>,
    /// Sum of advances plus inter-character spacing.
    pub width: u32,
    /// Tallest glyph, or the primary font's space height when empty.
    pub height: u32,
}

/// A glyph at its final draw position.
///
/// `(x, y)` is the top-left of the glyph's em box: the pen position on the
/// ascender line.
#[derive(Debug, Clone, Copy)]
pub struct PlacedGlyph<'a> {
    pub ch: char,
    pub x: i32,
    pub y: i32,
    pub font: &'a dyn FontHandle,
}
