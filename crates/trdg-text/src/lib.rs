//! trdg-text: renders Unicode strings into labeled images for text
//! recognition training.
//!
//! - font: coverage oracle, font handles and primary/fallback resolution
//! - layout: line wrapping plus horizontal and vertical layout
//! - bidi: Arabic-script reshaping and visual reordering for RTL input
//! - raster: glyph compositing, the instance-mask code and framing
//! - generate: the single-call pipeline tying it together

pub mod bidi;
pub mod error;
pub mod font;
pub mod generate;
pub mod label;
pub mod layout;
pub mod raster;
pub mod shaping;
pub mod unicode;

#[cfg(test)]
mod testing;

pub use error::{RenderError, Result};
pub use font::{
    FontCache, FontError, FontFace, FontHandle, FontSet, GlyphSource, MissingGlyphStrategy,
    ScaledFont, filter_fonts_for_text, find_system_font, has_glyph,
};
pub use generate::{RenderOptions, Rendered, generate, generate_with_palette};
pub use label::build_label;
pub use layout::{Alignment, Orientation, TextBlock, effective_alignment, wrap_text};
pub use raster::{
    BoundingBox, ColorSpec, FrameOptions, Margins, Palette, char_bounding_boxes, place,
};
