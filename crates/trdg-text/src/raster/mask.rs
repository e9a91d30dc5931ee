//! Instance mask color code.
//!
//! Glyph `i` (1-based, in draw order) is painted with the base-255
//! big-endian digits of `i` as its RGB triple. Black (0) is background.

use image::{Rgb, RgbImage};

/// Largest glyph index the three base-255 digits can hold.
pub const MAX_GLYPH_INDEX: u32 = 255 * 255 * 255 - 1;

/// Mask color of the 1-based glyph index `index`.
///
/// Indices above [`MAX_GLYPH_INDEX`] wrap; callers check the bound first.
pub fn encode_index(index: u32) -> Rgb<u8> {
    Rgb([
        (index / (255 * 255) % 255) as u8,
        (index / 255 % 255) as u8,
        (index % 255) as u8,
    ])
}

/// Glyph index painted at a mask pixel; 0 means no glyph.
pub fn decode_index(color: Rgb<u8>) -> u32 {
    let [r, g, b] = color.0;
    r as u32 * 255 * 255 + g as u32 * 255 + b as u32
}

/// Pixel box of one glyph in mask coordinates; `x1`/`y1` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl BoundingBox {
    fn point(x: u32, y: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + 1,
            y1: y + 1,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x + 1);
        self.y1 = self.y1.max(y + 1);
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Tight boxes for glyphs `1..=count`; entry `i - 1` is `None` when glyph
/// `i` left no pixels (a space, or a glyph fully painted over).
pub fn char_bounding_boxes(mask: &RgbImage, count: usize) -> Vec<Option<BoundingBox>> {
    let mut boxes: Vec<Option<BoundingBox>> = vec![None; count];
    for (x, y, pixel) in mask.enumerate_pixels() {
        let index = decode_index(*pixel) as usize;
        if index == 0 || index > count {
            continue;
        }
        match &mut boxes[index - 1] {
            Some(bbox) => bbox.include(x, y),
            slot => *slot = Some(BoundingBox::point(x, y)),
        }
    }
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_matches_documented_digits() {
        assert_eq!(encode_index(1), Rgb([0, 0, 1]));
        assert_eq!(encode_index(255), Rgb([0, 1, 0]));
        assert_eq!(encode_index(65025), Rgb([1, 0, 0]));
        assert_eq!(encode_index(65025 + 255 * 3 + 7), Rgb([1, 3, 7]));
        assert_eq!(encode_index(MAX_GLYPH_INDEX), Rgb([254, 254, 254]));
    }

    #[test]
    fn code_is_a_bijection_over_sampled_indices() {
        let mut seen = std::collections::HashSet::new();
        let samples = (1..70_000u32).chain((MAX_GLYPH_INDEX - 1000)..=MAX_GLYPH_INDEX);
        for index in samples {
            let color = encode_index(index);
            assert_ne!(color, Rgb([0, 0, 0]));
            assert_eq!(decode_index(color), index);
            assert!(seen.insert(color), "collision at {index}");
        }
    }

    #[test]
    fn boxes_cover_each_glyph() {
        let mut mask = RgbImage::new(8, 4);
        for (x, y) in [(1, 1), (2, 2)] {
            mask.put_pixel(x, y, encode_index(1));
        }
        mask.put_pixel(6, 3, encode_index(3));

        let boxes = char_bounding_boxes(&mask, 3);
        assert_eq!(
            boxes[0],
            Some(BoundingBox {
                x0: 1,
                y0: 1,
                x1: 3,
                y1: 3
            })
        );
        assert_eq!(boxes[1], None);
        assert_eq!(boxes[2].map(|b| (b.width(), b.height())), Some((1, 1)));
    }
}
