//! Synthetic fonts for unit tests.

use hashbrown::HashMap;

use crate::font::{Coverage, FontHandle, GlyphBitmap};

/// A font whose covered glyphs are solid rectangles.
///
/// Every character (covered or not) advances by `advance`; covered
/// non-space glyphs are `advance` wide and `height` tall unless overridden.
/// Inkless text measures `height`.
#[derive(Debug, Clone)]
pub struct BlockFont {
    covered: String,
    advance: u32,
    height: u32,
    heights: HashMap<char, u32>,
}

impl BlockFont {
    pub fn new(covered: &str, advance: u32, height: u32) -> Self {
        Self {
            covered: covered.to_string(),
            advance,
            height,
            heights: HashMap::new(),
        }
    }

    pub fn with_glyph_height(mut self, ch: char, height: u32) -> Self {
        self.heights.insert(ch, height);
        self
    }

    fn glyph_height(&self, ch: char) -> u32 {
        self.heights.get(&ch).copied().unwrap_or(self.height)
    }

    fn inked(&self, ch: char) -> bool {
        ch != ' ' && self.covered.contains(ch)
    }

    fn block(&self, left: i32, top: i32, width: u32, height: u32) -> Coverage {
        Coverage {
            left,
            top,
            width,
            height,
            data: vec![255; (width * height) as usize],
        }
    }
}

impl FontHandle for BlockFont {
    fn has_glyph(&self, ch: char) -> bool {
        self.covered.contains(ch)
    }

    fn advance_width(&self, text: &str) -> f32 {
        (text.chars().count() as u32 * self.advance) as f32
    }

    fn text_height(&self, text: &str) -> u32 {
        text.chars()
            .filter(|&ch| self.inked(ch))
            .map(|ch| self.glyph_height(ch))
            .max()
            .unwrap_or(self.height)
    }

    fn rasterize(&self, ch: char, stroke_width: u32) -> GlyphBitmap {
        if !self.inked(ch) {
            return GlyphBitmap::default();
        }
        let height = self.glyph_height(ch);
        let fill = self.block(0, 0, self.advance, height);
        let stroke = (stroke_width > 0).then(|| {
            let s = stroke_width as i32;
            self.block(
                -s,
                -s,
                self.advance + 2 * stroke_width,
                height + 2 * stroke_width,
            )
        });
        GlyphBitmap {
            fill: Some(fill),
            stroke,
        }
    }
}
