use crate::font::{FontSet, GlyphSource};

/// Label for logical (pre-reshape) wrapped text: every space and newline,
/// plus each other character that resolves to a font.
///
/// Resolution goes through the same [`FontSet`] the layout used, so a
/// character drawn with the fallback font stays and a dropped one does not.
pub fn build_label(logical: &str, fonts: &FontSet<'_>) -> String {
    logical
        .chars()
        .filter(|&ch| ch == ' ' || ch == '\n' || fonts.resolve(ch) != GlyphSource::Dropped)
        .collect()
}
