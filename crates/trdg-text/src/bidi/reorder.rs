use unicode_bidi::{BidiInfo, LTR_LEVEL, Level, RTL_LEVEL};

use crate::bidi::mirrored;

/// Base direction hint for paragraph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Detect paragraph base direction from text (first strong char).
    #[default]
    Auto,
    /// Force overall left-to-right base direction.
    Ltr,
    /// Force overall right-to-left base direction.
    Rtl,
}

impl BaseDirection {
    pub fn to_level(self) -> Option<Level> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(LTR_LEVEL),
            BaseDirection::Rtl => Some(RTL_LEVEL),
        }
    }
}

/// Reorder one line of logical text into left-to-right visual order
/// according to the Unicode BiDi algorithm (UAX-9).
///
/// Characters resolved to right-to-left levels come out reversed and
/// mirrored, so the result can be laid out by plain left-to-right advance
/// accumulation.
pub fn visual_line(line: &str, base_dir: BaseDirection) -> String {
    let info = BidiInfo::new(line, base_dir.to_level());
    let mut out = String::with_capacity(line.len());
    for para in &info.paragraphs {
        let (levels, runs) = info.visual_runs(para, para.range.clone());
        for run in runs {
            let segment = &line[run.clone()];
            if levels[run.start].is_rtl() {
                out.extend(segment.chars().rev().map(mirrored));
            } else {
                out.push_str(segment);
            }
        }
    }
    out
}

/// Reorder every line of `text` independently, keeping the line breaks.
pub fn visual_text(text: &str, base_dir: BaseDirection) -> String {
    text.split('\n')
        .map(|line| visual_line(line, base_dir))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtl_line_is_reversed() {
        assert_eq!(visual_line("אבג", BaseDirection::Auto), "גבא");
    }

    #[test]
    fn ltr_line_is_untouched() {
        assert_eq!(visual_line("hello (world)", BaseDirection::Auto), "hello (world)");
    }

    #[test]
    fn mixed_line_keeps_latin_runs_readable() {
        // RTL paragraph: the Latin run stays left-to-right internally and
        // lands to the left of the Hebrew.
        let visual = visual_line("אבג abc", BaseDirection::Auto);
        assert_eq!(visual, "abc גבא");
    }

    #[test]
    fn brackets_are_mirrored_in_rtl_runs() {
        assert_eq!(visual_line("א(ב)", BaseDirection::Auto), "(ב)א");
    }

    #[test]
    fn forced_direction_overrides_detection() {
        let visual = visual_line("abc אבג", BaseDirection::Rtl);
        assert_eq!(visual, "גבא abc");
    }

    #[test]
    fn lines_reorder_independently() {
        assert_eq!(visual_text("אב\nab\n", BaseDirection::Auto), "בא\nab\n");
    }
}
