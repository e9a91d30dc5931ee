//! Error types for a generation call.

use thiserror::Error;

use crate::font::FontError;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that abort a generation call.
///
/// Characters that no font covers are not errors; they are dropped from
/// the layout and the label.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Orientation value outside horizontal (0) and vertical (1).
    #[error("unknown orientation {0}")]
    UnsupportedOrientation(i64),

    /// A font file could not be read or parsed.
    #[error(transparent)]
    Font(#[from] FontError),

    /// A color specification could not be parsed.
    #[error("invalid color specification: {0:?}")]
    InvalidColor(String),

    /// More glyphs than the mask color code can tell apart.
    #[error("{0} glyphs exceed the mask color code capacity")]
    MaskOverflow(u32),
}
