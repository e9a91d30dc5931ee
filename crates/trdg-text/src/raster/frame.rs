use image::{RgbImage, RgbaImage, imageops};

use crate::layout::Alignment;

/// Blank space around the text image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl Margins {
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(5)
    }
}

impl From<(u32, u32, u32, u32)> for Margins {
    /// `(top, left, bottom, right)`
    fn from((top, left, bottom, right): (u32, u32, u32, u32)) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOptions {
    /// Fixed frame width; `None` fits the text plus horizontal margins.
    pub width: Option<u32>,
    pub margins: Margins,
    /// Already adjusted for right-to-left text.
    pub alignment: Alignment,
}

/// Pad a rendered image and its mask into a frame.
///
/// The frame is transparent in the color image and black (background) in
/// the mask; both get the same offset.
pub fn place(image: &RgbaImage, mask: &RgbImage, options: &FrameOptions) -> (RgbaImage, RgbImage) {
    let (text_w, text_h) = image.dimensions();
    let m = options.margins;
    let width = options
        .width
        .filter(|&w| w > 0)
        .unwrap_or(text_w + m.left + m.right);
    let height = text_h + m.top + m.bottom;

    let x = match options.alignment {
        Alignment::Start => m.left as i64,
        Alignment::Center => (width as i64 - text_w as i64) / 2,
        Alignment::End => width as i64 - text_w as i64 - m.right as i64,
    };
    let y = m.top as i64;

    let mut framed = RgbaImage::new(width, height);
    imageops::replace(&mut framed, image, x, y);
    let mut framed_mask = RgbImage::new(width, height);
    imageops::replace(&mut framed_mask, mask, x, y);
    (framed, framed_mask)
}
