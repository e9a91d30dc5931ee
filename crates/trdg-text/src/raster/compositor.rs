use image::{Rgb, RgbImage, Rgba, RgbaImage, imageops};

use crate::error::{RenderError, Result};
use crate::font::Coverage;
use crate::layout::PlacedGlyph;
use crate::raster::color::Palette;
use crate::raster::mask::{MAX_GLYPH_INDEX, encode_index};

/// Coverage at or above this value marks a mask pixel.
const MASK_THRESHOLD: u8 = 128;

/// Draws glyphs onto a color image and an instance mask in lockstep.
///
/// The color image starts fully transparent, the mask solid black. Every
/// drawn glyph takes the next 1-based index, spaces included, so mask
/// indices line up with the glyph order of the layout.
pub struct Compositor {
    image: RgbaImage,
    mask: RgbImage,
    palette: Palette,
    stroke_width: u32,
    drawn: u32,
}

impl Compositor {
    pub fn new(width: u32, height: u32, palette: Palette, stroke_width: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            mask: RgbImage::new(width, height),
            palette,
            stroke_width,
            drawn: 0,
        }
    }

    /// Number of glyphs drawn so far.
    pub fn drawn(&self) -> u32 {
        self.drawn
    }

    pub fn draw_all(&mut self, glyphs: &[PlacedGlyph<'_>]) -> Result<()> {
        let total = u32::try_from(glyphs.len()).unwrap_or(u32::MAX);
        if total > MAX_GLYPH_INDEX {
            return Err(RenderError::MaskOverflow(total));
        }
        glyphs.iter().try_for_each(|glyph| self.draw(glyph))
    }

    /// Draw one glyph with the next index.
    pub fn draw(&mut self, glyph: &PlacedGlyph<'_>) -> Result<()> {
        let index = self.drawn + 1;
        if index > MAX_GLYPH_INDEX {
            return Err(RenderError::MaskOverflow(index));
        }
        self.drawn = index;

        let bitmap = glyph.font.rasterize(glyph.ch, self.stroke_width);
        let code = encode_index(index);
        let origin = (glyph.x, glyph.y);
        // Stroke goes under the fill, both shapes carry the same index.
        if let Some(stroke) = &bitmap.stroke {
            paint(&mut self.image, stroke, origin, self.palette.stroke);
            stamp(&mut self.mask, stroke, origin, code);
        }
        if let Some(fill) = &bitmap.fill {
            paint(&mut self.image, fill, origin, self.palette.fill);
            stamp(&mut self.mask, fill, origin, code);
        }
        Ok(())
    }

    /// Finish drawing. With `fit`, both images are cropped to the color
    /// image's non-transparent bounds; nothing is cropped when no pixel
    /// was inked.
    pub fn finish(self, fit: bool) -> (RgbaImage, RgbImage) {
        let Self { image, mask, .. } = self;
        if !fit {
            return (image, mask);
        }
        match opaque_bounds(&image) {
            Some((x, y, w, h)) => (
                imageops::crop_imm(&image, x, y, w, h).to_image(),
                imageops::crop_imm(&mask, x, y, w, h).to_image(),
            ),
            None => (image, mask),
        }
    }
}

/// Bounding box `(x, y, width, height)` of pixels with non-zero alpha.
pub fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Visit every in-bounds pixel of `coverage` drawn at `origin`.
fn for_each_covered(
    coverage: &Coverage,
    origin: (i32, i32),
    bounds: (u32, u32),
    mut f: impl FnMut(u32, u32, u8),
) {
    for cy in 0..coverage.height {
        let y = origin.1 + coverage.top + cy as i32;
        if y < 0 || y >= bounds.1 as i32 {
            continue;
        }
        for cx in 0..coverage.width {
            let x = origin.0 + coverage.left + cx as i32;
            if x < 0 || x >= bounds.0 as i32 {
                continue;
            }
            let alpha = coverage.alpha(cx, cy);
            if alpha > 0 {
                f(x as u32, y as u32, alpha);
            }
        }
    }
}

fn paint(image: &mut RgbaImage, coverage: &Coverage, origin: (i32, i32), color: Rgb<u8>) {
    let bounds = image.dimensions();
    for_each_covered(coverage, origin, bounds, |x, y, alpha| {
        let dst = image.get_pixel_mut(x, y);
        *dst = source_over(*dst, color, alpha);
    });
}

fn stamp(mask: &mut RgbImage, coverage: &Coverage, origin: (i32, i32), code: Rgb<u8>) {
    let bounds = mask.dimensions();
    for_each_covered(coverage, origin, bounds, |x, y, alpha| {
        if alpha >= MASK_THRESHOLD {
            mask.put_pixel(x, y, code);
        }
    });
}

/// Straight-alpha source-over of an opaque color at `alpha` coverage.
fn source_over(dst: Rgba<u8>, color: Rgb<u8>, alpha: u8) -> Rgba<u8> {
    let sa = alpha as f32 / 255.0;
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for channel in 0..3 {
        let s = color.0[channel] as f32;
        let d = dst.0[channel] as f32;
        let v = (s * sa + d * da * (1.0 - sa)) / out_a;
        out[channel] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}
