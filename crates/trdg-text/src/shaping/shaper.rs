use harfrust::{
    Direction as HbDirection, FontRef as HbFontRef, ShaperData, ShaperInstance,
    UnicodeBuffer as HbUnicodeBuffer,
};

use crate::font::FontFace;

use super::ShapedRun;

/// Measuring shaper built on harfrust (pure-Rust HarfBuzz port).
///
/// Text reaching the layout engine is already in visual order, so runs are
/// always shaped left-to-right; the script is guessed from the content.
pub struct TextShaper;

impl TextShaper {
    /// Shape `text` with the given font and size.
    ///
    /// Returns `None` when harfrust cannot parse the font data.
    pub fn shape_ltr(text: &str, font: &FontFace, font_size: f32) -> Option<ShapedRun> {
        let font_data = font.as_bytes();
        let font_ref = HbFontRef::from_index(&font_data, font.index()).ok()?;

        // Shaper configuration with default (no variations) instance.
        let data = ShaperData::new(&font_ref);
        let instance = ShaperInstance::from_variations(
            &font_ref,
            core::iter::empty::<harfrust::Variation>(),
        );
        let shaper = data
            .shaper(&font_ref)
            .instance(Some(&instance))
            .point_size(None)
            .build();

        let mut buffer = HbUnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(HbDirection::LeftToRight);
        buffer.guess_segment_properties();

        let glyph_buffer = shaper.shape(buffer, &[]);
        let positions = glyph_buffer.glyph_positions();

        // harfrust uses design units; convert to pixels using the font's
        // units-per-em and requested size.
        let metrics = font.metrics();
        let scale = if metrics.units_per_em != 0 {
            font_size / metrics.units_per_em as f32
        } else {
            1.0
        };

        let width = positions
            .iter()
            .map(|pos| pos.x_advance as f32 * scale)
            .sum::<f32>();

        Some(ShapedRun { width })
    }
}
