//! Right-to-left support: contextual reshaping followed by visual
//! reordering (UAX-9 via `unicode-bidi`).
//!
//! The output is only used for layout. Labels are always built from the
//! logical text.

pub mod mirror;
pub mod reorder;
pub mod reshape;

pub use mirror::mirrored;
pub use reorder::{BaseDirection, visual_line, visual_text};
pub use reshape::{ReshapeOptions, is_harakah, reshape};

/// Reshape logical right-to-left `text` and reorder each line into visual
/// order.
pub fn to_visual(text: &str, options: &ReshapeOptions) -> String {
    visual_text(&reshape(text, options), BaseDirection::Auto)
}
