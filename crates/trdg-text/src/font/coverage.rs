//! Glyph coverage queries against font files.

use std::path::{Path, PathBuf};

use crate::font::{FontFace, Result};

/// Whether the font file at `path` has a glyph for `ch`.
///
/// The file is read and parsed on every call; an unreadable or unparsable
/// file is an error, never a coverage miss. Callers treat the space
/// character as covered without asking.
pub fn has_glyph(path: impl AsRef<Path>, ch: char) -> Result<bool> {
    Ok(FontFace::from_path(path, 0)?.has_glyph(ch))
}

/// Fonts from `fonts` that cover every non-whitespace character of
/// `text`, in input order.
pub fn filter_fonts_for_text<P: AsRef<Path>>(text: &str, fonts: &[P]) -> Result<Vec<PathBuf>> {
    let mut covering = Vec::new();
    for path in fonts {
        let face = FontFace::from_path(path, 0)?;
        if covers_text(text, |ch| face.has_glyph(ch)) {
            covering.push(path.as_ref().to_path_buf());
        }
    }
    Ok(covering)
}

/// Whether `has_glyph` accepts every non-whitespace character of `text`.
fn covers_text(text: &str, has_glyph: impl Fn(char) -> bool) -> bool {
    text.chars()
        .filter(|ch| !ch.is_whitespace())
        .all(has_glyph)
}
