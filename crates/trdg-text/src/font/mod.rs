pub mod coverage;
pub mod face;
pub mod handle;
pub mod loader;
pub mod metrics;
pub mod resolver;

pub use coverage::{filter_fonts_for_text, has_glyph};
pub use face::FontFace;
pub use handle::{Coverage, FontHandle, GlyphBitmap, ScaledFont};
pub use loader::{FontCache, FontKey, find_system_font};
pub use metrics::{FontMetrics, ScaledFontMetrics};
pub use resolver::{FontSet, GlyphSource, MissingGlyphStrategy};

use core::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading fonts.
///
/// A font that fails to load is fatal for the generation call; only glyph
/// coverage misses are absorbed by the fallback/drop policy.
#[derive(Debug)]
pub enum FontError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidFont {
        path: Option<PathBuf>,
    },
}

impl FontError {
    /// Attach the originating file path to an error raised on raw bytes.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            FontError::InvalidFont { path: None } => FontError::InvalidFont {
                path: Some(path.into()),
            },
            other => other,
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Io { path, source } => {
                write!(f, "font I/O error for {}: {source}", path.display())
            }
            FontError::InvalidFont { path: Some(path) } => {
                write!(f, "invalid font data in {}", path.display())
            }
            FontError::InvalidFont { path: None } => write!(f, "invalid font data"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Io { source, .. } => Some(source),
            FontError::InvalidFont { .. } => None,
        }
    }
}

/// Convenient result alias for font-related operations.
pub type Result<T> = std::result::Result<T, FontError>;
