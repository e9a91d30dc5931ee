//! Per-character font selection.

use core::convert::Infallible;
use core::str::FromStr;

use crate::font::FontHandle;

/// What to do when the primary font lacks a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingGlyphStrategy {
    /// Consult the fallback font, dropping the character if it misses too.
    #[default]
    Fallback,
    /// Drop the character.
    Drop,
}

impl FromStr for MissingGlyphStrategy {
    type Err = Infallible;

    /// Only `"fallback"` has a defined meaning; anything else drops on miss.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "fallback" {
            Ok(Self::Fallback)
        } else if s == "drop" {
            Ok(Self::Drop)
        } else {
            log::warn!("unknown missing-glyph strategy {s:?}; characters missing from the primary font will be dropped");
            Ok(Self::Drop)
        }
    }
}

/// Which font renders a character, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSource {
    Primary,
    Fallback,
    Dropped,
}

/// Primary and optional fallback font borrowed for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct FontSet<'a> {
    pub primary: &'a dyn FontHandle,
    pub fallback: Option<&'a dyn FontHandle>,
    pub strategy: MissingGlyphStrategy,
}

impl<'a> FontSet<'a> {
    pub fn new(primary: &'a dyn FontHandle) -> Self {
        Self {
            primary,
            fallback: None,
            strategy: MissingGlyphStrategy::Fallback,
        }
    }

    pub fn with_fallback(mut self, fallback: &'a dyn FontHandle) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_strategy(mut self, strategy: MissingGlyphStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Decide which font renders `ch`. A space always renders with the
    /// primary font without a coverage check.
    pub fn resolve(&self, ch: char) -> GlyphSource {
        if ch == ' ' || self.primary.has_glyph(ch) {
            return GlyphSource::Primary;
        }
        match (self.strategy, self.fallback) {
            (MissingGlyphStrategy::Fallback, Some(fallback)) if fallback.has_glyph(ch) => {
                GlyphSource::Fallback
            }
            _ => GlyphSource::Dropped,
        }
    }

    /// The font behind a resolution outcome.
    pub fn font(&self, source: GlyphSource) -> Option<&'a dyn FontHandle> {
        match source {
            GlyphSource::Primary => Some(self.primary),
            GlyphSource::Fallback => self.fallback,
            GlyphSource::Dropped => None,
        }
    }

    /// Resolve `ch` straight to the drawing font.
    pub fn select(&self, ch: char) -> Option<&'a dyn FontHandle> {
        self.font(self.resolve(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BlockFont;

    #[test]
    fn space_always_uses_primary() {
        let primary = BlockFont::new("", 10, 20);
        let fonts = FontSet::new(&primary);
        assert_eq!(fonts.resolve(' '), GlyphSource::Primary);
    }

    #[test]
    fn fallback_covers_primary_misses() {
        let primary = BlockFont::new("abc", 10, 20);
        let fallback = BlockFont::new("xyz", 12, 24);
        let fonts = FontSet::new(&primary).with_fallback(&fallback);
        assert_eq!(fonts.resolve('a'), GlyphSource::Primary);
        assert_eq!(fonts.resolve('x'), GlyphSource::Fallback);
        assert_eq!(fonts.resolve('q'), GlyphSource::Dropped);
        assert!(fonts.select('q').is_none());
        assert_eq!(fonts.select('x').map(|f| f.advance_width("x")), Some(12.0));
    }

    #[test]
    fn drop_strategy_ignores_fallback() {
        let primary = BlockFont::new("abc", 10, 20);
        let fallback = BlockFont::new("xyz", 12, 24);
        let fonts = FontSet::new(&primary)
            .with_fallback(&fallback)
            .with_strategy(MissingGlyphStrategy::Drop);
        assert_eq!(fonts.resolve('x'), GlyphSource::Dropped);
    }

    #[test]
    fn unknown_strategy_names_drop_on_miss() {
        assert_eq!("fallback".parse::<MissingGlyphStrategy>(), Ok(MissingGlyphStrategy::Fallback));
        assert_eq!("tofu".parse::<MissingGlyphStrategy>(), Ok(MissingGlyphStrategy::Drop));
    }
}
