use crate::font::{FontHandle, FontSet, GlyphSource};
use crate::layout::{Alignment, GlyphInfo, Line, Orientation, PlacedGlyph};
use crate::unicode::is_zero_advance_mark;

/// Knobs of the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub orientation: Orientation,
    /// Multiplier applied to the primary font's space advance (horizontal)
    /// or space height (vertical).
    pub space_width: f32,
    /// Extra pixels after every character.
    pub character_spacing: u32,
    /// Disables per-character spacing in horizontal layout; gaps between
    /// words then come from the space width alone.
    pub word_split: bool,
    pub alignment: Alignment,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            space_width: 1.0,
            character_spacing: 0,
            word_split: false,
            alignment: Alignment::Start,
        }
    }
}

/// Laid-out text: measured lines plus every glyph at its draw position.
///
/// `width` and `height` are the canvas needed to draw all glyphs at their
/// positions. In vertical layout `lines` holds a single column.
#[derive(Debug, Clone)]
pub struct TextBlock<'a> {
    pub orientation: Orientation,
    pub lines: Vec<Line<'a>>,
    pub glyphs: Vec<PlacedGlyph<'a>>,
    pub width: u32,
    pub height: u32,
}

impl<'a> TextBlock<'a> {
    /// Lay out visual-order `text` with the given fonts.
    pub fn layout(text: &str, fonts: &FontSet<'a>, options: &LayoutOptions) -> Self {
        let block = match options.orientation {
            Orientation::Horizontal => Self::horizontal(text, fonts, options),
            Orientation::Vertical => Self::vertical(text, fonts, options),
        };
        log::debug!(
            "laid out {} glyphs in {} line(s), canvas {}x{}",
            block.glyphs.len(),
            block.lines.len(),
            block.width,
            block.height
        );
        block
    }

    /// Number of glyphs that will be drawn.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn horizontal(text: &str, fonts: &FontSet<'a>, options: &LayoutOptions) -> Self {
        let primary = fonts.primary;
        let space_advance = (rounded(primary.advance_width(" ")) as f32 * options.space_width) as u32;
        let space_height = primary.text_height(" ");
        let spacing = if options.word_split {
            0
        } else {
            options.character_spacing
        };

        let lines: Vec<Line<'a>> = text
            .split('\n')
            .map(|line| {
                let glyphs: Vec<GlyphInfo<'a>> = line
                    .chars()
                    .filter_map(|ch| {
                        if ch == ' ' {
                            return Some(GlyphInfo {
                                ch,
                                advance: space_advance,
                                height: space_height,
                                font: primary,
                                source: GlyphSource::Primary,
                            });
                        }
                        let (source, font) = resolve(fonts, ch)?;
                        let advance = if is_zero_advance_mark(ch) {
                            0
                        } else {
                            rounded(font.advance_width(char_str(ch, &mut [0; 4])))
                        };
                        Some(GlyphInfo {
                            ch,
                            advance,
                            height: font.text_height(char_str(ch, &mut [0; 4])),
                            font,
                            source,
                        })
                    })
                    .collect();

                let gaps = glyphs.len().saturating_sub(1) as u32;
                let width = saturating_sum(glyphs.iter().map(|g| g.advance))
                    .saturating_add(gaps.saturating_mul(spacing));
                let height = glyphs
                    .iter()
                    .map(|g| g.height)
                    .max()
                    .unwrap_or(space_height);
                Line {
                    glyphs,
                    width,
                    height,
                }
            })
            .collect();

        let (width, height) = non_empty_canvas(
            primary,
            lines.iter().map(|l| l.width).max().unwrap_or(0),
            saturating_sum(lines.iter().map(|l| l.height)),
        );

        let mut glyphs = Vec::new();
        let mut y = 0u32;
        for line in &lines {
            let mut x = options.alignment.offset(width, line.width);
            for glyph in &line.glyphs {
                log::trace!("place {:?} at ({x}, {y})", glyph.ch);
                glyphs.push(PlacedGlyph {
                    ch: glyph.ch,
                    x: to_position(x),
                    y: to_position(y),
                    font: glyph.font,
                });
                x = x.saturating_add(glyph.advance).saturating_add(spacing);
            }
            y = y.saturating_add(line.height);
        }

        Self {
            orientation: Orientation::Horizontal,
            lines,
            glyphs,
            width,
            height,
        }
    }

    fn vertical(text: &str, fonts: &FontSet<'a>, options: &LayoutOptions) -> Self {
        let primary = fonts.primary;
        let space_advance = rounded(primary.advance_width(" "));
        let space_height = (primary.text_height(" ") as f32 * options.space_width) as u32;
        let spacing = options.character_spacing;

        let column: Vec<GlyphInfo<'a>> = text
            .chars()
            .filter(|&ch| ch != '\n')
            .filter_map(|ch| {
                if ch == ' ' {
                    return Some(GlyphInfo {
                        ch,
                        advance: space_advance,
                        height: space_height,
                        font: primary,
                        source: GlyphSource::Primary,
                    });
                }
                let (source, font) = resolve(fonts, ch)?;
                Some(GlyphInfo {
                    ch,
                    advance: rounded(font.advance_width(char_str(ch, &mut [0; 4]))),
                    height: font.text_height(char_str(ch, &mut [0; 4])),
                    font,
                    source,
                })
            })
            .collect();

        let column_width = column.iter().map(|g| g.advance).max().unwrap_or(0);
        let column_height = saturating_sum(column.iter().map(|g| g.height.saturating_add(spacing)));
        let (width, height) = non_empty_canvas(primary, column_width, column_height);

        let mut glyphs = Vec::with_capacity(column.len());
        let mut y = 0u32;
        for glyph in &column {
            glyphs.push(PlacedGlyph {
                ch: glyph.ch,
                x: 0,
                y: to_position(y),
                font: glyph.font,
            });
            y = y.saturating_add(glyph.height).saturating_add(spacing);
        }

        let line = Line {
            width: column_width,
            height: column_height,
            glyphs: column,
        };
        Self {
            orientation: Orientation::Vertical,
            lines: vec![line],
            glyphs,
            width,
            height,
        }
    }
}

fn resolve<'a>(fonts: &FontSet<'a>, ch: char) -> Option<(GlyphSource, &'a dyn FontHandle)> {
    let source = fonts.resolve(ch);
    match fonts.font(source) {
        Some(font) => Some((source, font)),
        None => {
            log::debug!("dropping {ch:?} (U+{:04X}): no font covers it", ch as u32);
            None
        }
    }
}

/// Degrade an empty block to a canvas the size of one space instead of a
/// zero-sized image.
fn non_empty_canvas(primary: &dyn FontHandle, width: u32, height: u32) -> (u32, u32) {
    let width = if width == 0 {
        rounded(primary.advance_width(" ")).max(1)
    } else {
        width
    };
    let height = if height == 0 {
        primary.text_height(" ").max(1)
    } else {
        height
    };
    (width, height)
}

fn saturating_sum(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0, u32::saturating_add)
}

fn to_position(px: u32) -> i32 {
    i32::try_from(px).unwrap_or(i32::MAX)
}

fn rounded(px: f32) -> u32 {
    px.round().max(0.0) as u32
}

fn char_str(ch: char, buf: &mut [u8; 4]) -> &str {
    ch.encode_utf8(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BlockFont;

    fn horizontal(alignment: Alignment) -> LayoutOptions {
        LayoutOptions {
            alignment,
            ..LayoutOptions::default()
        }
    }

    #[test]
    fn lines_measure_widths_and_heights() {
        let font = BlockFont::new("abcdef", 10, 20).with_glyph_height('f', 26);
        let fonts = FontSet::new(&font);
        let block = TextBlock::layout("ab c\ndef", &fonts, &horizontal(Alignment::Start));

        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.lines[0].width, 40);
        assert_eq!(block.lines[0].height, 20);
        assert_eq!(block.lines[1].width, 30);
        assert_eq!(block.lines[1].height, 26);
        assert_eq!((block.width, block.height), (40, 46));
        assert_eq!(block.glyph_count(), 7);
        let second_line: Vec<_> = block.glyphs[4..].iter().map(|g| (g.x, g.y)).collect();
        assert_eq!(second_line, vec![(0, 20), (10, 20), (20, 20)]);
    }

    #[test]
    fn alignment_offsets_short_lines() {
        let font = BlockFont::new("abcde", 10, 20);
        let fonts = FontSet::new(&font);

        let centered = TextBlock::layout("abcd\nab", &fonts, &horizontal(Alignment::Center));
        assert_eq!(centered.glyphs[4].x, 10);

        let end = TextBlock::layout("abcd\nab", &fonts, &horizontal(Alignment::End));
        assert_eq!(end.glyphs[4].x, 20);

        let start = TextBlock::layout("abcd\nab", &fonts, &horizontal(Alignment::Start));
        assert_eq!(start.glyphs[4].x, 0);
    }

    #[test]
    fn character_spacing_widens_lines() {
        let font = BlockFont::new("abc", 10, 20);
        let fonts = FontSet::new(&font);
        let options = LayoutOptions {
            character_spacing: 3,
            ..LayoutOptions::default()
        };
        let block = TextBlock::layout("abc", &fonts, &options);
        assert_eq!(block.width, 36);
        let xs: Vec<_> = block.glyphs.iter().map(|g| g.x).collect();
        assert_eq!(xs, vec![0, 13, 26]);

        let word_split = LayoutOptions {
            word_split: true,
            ..options
        };
        let block = TextBlock::layout("abc", &fonts, &word_split);
        assert_eq!(block.width, 30);
    }

    #[test]
    fn space_width_multiplier_truncates() {
        let font = BlockFont::new("ab", 10, 20);
        let fonts = FontSet::new(&font);
        let options = LayoutOptions {
            space_width: 1.55,
            ..LayoutOptions::default()
        };
        let block = TextBlock::layout("a b", &fonts, &options);
        assert_eq!(block.lines[0].glyphs[1].advance, 15);
        assert_eq!(block.width, 35);
    }

    #[test]
    fn dropped_characters_take_no_space() {
        let font = BlockFont::new("ab", 10, 20);
        let fonts = FontSet::new(&font);
        let block = TextBlock::layout("a?b", &fonts, &LayoutOptions::default());
        assert_eq!(block.width, 20);
        let chars: String = block.glyphs.iter().map(|g| g.ch).collect();
        assert_eq!(chars, "ab");
    }

    #[test]
    fn fallback_glyphs_use_their_own_metrics() {
        let primary = BlockFont::new("ab", 10, 20);
        let fallback = BlockFont::new("ж", 14, 30);
        let fonts = FontSet::new(&primary).with_fallback(&fallback);
        let block = TextBlock::layout("aж", &fonts, &LayoutOptions::default());
        assert_eq!(block.lines[0].glyphs[1].source, GlyphSource::Fallback);
        assert_eq!(block.width, 24);
        assert_eq!(block.height, 30);
    }

    #[test]
    fn thai_marks_do_not_advance() {
        let font = BlockFont::new("\u{0E01}\u{0E48}\u{0E32}", 10, 20);
        let fonts = FontSet::new(&font);
        let block = TextBlock::layout("\u{0E01}\u{0E48}\u{0E32}", &fonts, &LayoutOptions::default());
        let advances: Vec<_> = block.lines[0].glyphs.iter().map(|g| g.advance).collect();
        assert_eq!(advances, vec![10, 0, 10]);
        assert_eq!(block.glyphs[2].x, 10);
    }

    #[test]
    fn fully_dropped_text_degrades_to_a_space_canvas() {
        let font = BlockFont::new("ab", 10, 20);
        let fonts = FontSet::new(&font);
        let block = TextBlock::layout("???", &fonts, &LayoutOptions::default());
        assert_eq!(block.glyph_count(), 0);
        assert_eq!((block.width, block.height), (10, 20));

        let vertical = LayoutOptions {
            orientation: Orientation::Vertical,
            ..LayoutOptions::default()
        };
        let block = TextBlock::layout("", &fonts, &vertical);
        assert_eq!((block.width, block.height), (10, 20));
    }

    #[test]
    fn empty_lines_keep_space_height() {
        let font = BlockFont::new("ab", 10, 20);
        let fonts = FontSet::new(&font);
        let block = TextBlock::layout("a\n??\nb", &fonts, &LayoutOptions::default());
        assert_eq!(block.lines[1].height, 20);
        assert_eq!(block.height, 60);
        assert_eq!(block.glyphs[1].y, 40);
    }

    #[test]
    fn vertical_height_sums_each_glyph() {
        let font = BlockFont::new("abc", 10, 20)
            .with_glyph_height('b', 12)
            .with_glyph_height('c', 31);
        let fonts = FontSet::new(&font);
        let options = LayoutOptions {
            orientation: Orientation::Vertical,
            character_spacing: 2,
            space_width: 0.5,
            ..LayoutOptions::default()
        };
        let block = TextBlock::layout("ab c", &fonts, &options);
        // 20 + 12 + 10 (half a space) + 31, plus 2 after each of 4 glyphs
        assert_eq!(block.height, 20 + 12 + 10 + 31 + 4 * 2);
        assert_eq!(block.width, 10);
        let ys: Vec<_> = block.glyphs.iter().map(|g| g.y).collect();
        assert_eq!(ys, vec![0, 22, 36, 48]);
        assert!(block.glyphs.iter().all(|g| g.x == 0));
    }

    #[test]
    fn vertical_ignores_line_breaks() {
        let font = BlockFont::new("ab", 10, 20);
        let fonts = FontSet::new(&font);
        let options = LayoutOptions {
            orientation: Orientation::Vertical,
            ..LayoutOptions::default()
        };
        let block = TextBlock::layout("a\nb", &fonts, &options);
        assert_eq!(block.glyph_count(), 2);
        assert_eq!(block.height, 40);
    }

    #[test]
    fn huge_spacing_saturates_instead_of_overflowing() {
        let font = BlockFont::new("abc", 10, 20);
        let fonts = FontSet::new(&font);
        let options = LayoutOptions {
            character_spacing: u32::MAX,
            ..LayoutOptions::default()
        };
        let block = TextBlock::layout("abc", &fonts, &options);
        assert_eq!(block.width, u32::MAX);
        assert_eq!(block.glyphs[0].x, 0);
        assert_eq!(block.glyphs[2].x, i32::MAX);

        let vertical = LayoutOptions {
            orientation: Orientation::Vertical,
            ..options
        };
        let column = TextBlock::layout("abc", &fonts, &vertical);
        assert_eq!(column.height, u32::MAX);
        assert_eq!(column.glyphs[1].y, i32::MAX);
    }
}
