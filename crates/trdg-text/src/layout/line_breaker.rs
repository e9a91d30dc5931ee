//! Logical line segmentation and greedy word wrapping.
//!
//! Wrapping is measured in characters, not pixels, because the wrapped
//! string is also the ground-truth label. Words are never broken, neither
//! inside nor at hyphens; a word longer than the budget gets a line of
//! its own.

const TAB_SIZE: usize = 8;

/// Replace the literal escape sequences `\n` (backslash, n) and `/n` with
/// real newlines.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\\n", "\n").replace("/n", "\n")
}

/// Split normalized text into logical lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

/// Normalize `text` and re-wrap every logical line to at most
/// `max_line_length` characters, joining the result with newlines.
///
/// A `max_line_length` of 0 disables wrapping; the text is only
/// normalized.
pub fn wrap_text(text: &str, max_line_length: usize) -> String {
    let text = normalize_newlines(text);
    if max_line_length == 0 {
        return text;
    }
    split_lines(&text)
        .flat_map(|line| wrap_line(line, max_line_length))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Greedy word wrap of a single logical line.
///
/// Whitespace runs between words are kept as they are, except at the
/// seams where a line was broken. A line holding only whitespace wraps
/// to nothing.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut chunks = split_chunks(&munge_whitespace(line));
    // Consumed from the back.
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        let mut current: Vec<String> = Vec::new();
        let mut current_len = 0usize;

        // Whitespace at the start of a continuation line is dropped.
        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            let len = char_len(chunk);
            if current_len + len > width {
                break;
            }
            current_len += len;
            current.extend(chunks.pop());
        }

        // A word wider than the budget still needs a line of its own.
        if current.is_empty() && chunks.last().is_some_and(|c| char_len(c) > width) {
            current.extend(chunks.pop());
        }

        if current.last().is_some_and(|c| is_blank(c)) {
            current.pop();
        }

        if !current.is_empty() {
            lines.push(current.concat());
        }
    }
    lines
}

/// Expand tabs to the next multiple of [`TAB_SIZE`] columns and turn the
/// remaining ASCII whitespace controls into plain spaces.
fn munge_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;
    for ch in line.chars() {
        match ch {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\u{0b}' | '\u{0c}' => {
                out.push(' ');
                column += 1;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Whitespace that separates words. Unicode spaces such as U+00A0 or
/// U+3000 join words instead.
fn is_break_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r')
}

/// Split into alternating runs of breaking whitespace and everything else.
fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut last_blank: Option<bool> = None;
    for ch in text.chars() {
        let blank = is_break_space(ch);
        match chunks.last_mut() {
            Some(chunk) if last_blank == Some(blank) => chunk.push(ch),
            _ => chunks.push(ch.to_string()),
        }
        last_blank = Some(blank);
    }
    chunks
}

/// A chunk that is dropped at line edges. Any Unicode whitespace counts
/// here, so a lone U+2009 chunk is trimmed even though it never splits a
/// word.
fn is_blank(chunk: &str) -> bool {
    chunk.chars().all(char::is_whitespace)
}

fn char_len(chunk: &str) -> usize {
    chunk.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_without_breaking_words() {
        assert_eq!(
            wrap_text("This is a very long sentence", 10),
            "This is a\nvery long\nsentence"
        );
    }

    #[test]
    fn wrapping_is_idempotent() {
        let inputs = [
            "This is a very long sentence",
            "  leading spaces survive on the first line only",
            "tabs\tand   runs   of spaces",
            "supercalifragilistic words stay whole",
        ];
        for width in [1, 5, 10, 17, 80] {
            for input in inputs {
                let once = wrap_text(input, width);
                assert_eq!(wrap_text(&once, width), once, "width {width}: {input:?}");
            }
        }
    }

    #[test]
    fn long_words_get_their_own_line() {
        assert_eq!(
            wrap_line("a extraordinarily b", 5),
            vec!["a", "extraordinarily", "b"]
        );
    }

    #[test]
    fn hyphens_are_not_break_points() {
        assert_eq!(wrap_line("well-known fact", 6), vec!["well-known", "fact"]);
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        assert_eq!(wrap_line("a  b", 10), vec!["a  b"]);
        assert_eq!(wrap_line("  a b", 10), vec!["  a b"]);
    }

    #[test]
    fn blank_lines_disappear_when_wrapping() {
        assert_eq!(wrap_text("one\n\ntwo", 10), "one\ntwo");
        assert!(wrap_line("   ", 10).is_empty());
    }

    #[test]
    fn escape_sequences_become_newlines() {
        assert_eq!(wrap_text("a\\nb/nc", 0), "a\nb\nc");
        assert_eq!(split_lines(&normalize_newlines("x/ny")).count(), 2);
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        assert_eq!(wrap_text("ééé ééé", 3), "ééé\nééé");
    }

    #[test]
    fn unicode_spaces_do_not_break_words() {
        assert_eq!(wrap_line("a\u{a0}b c", 2), vec!["a\u{a0}b", "c"]);
        assert_eq!(wrap_text("x\u{3000}y z", 3), "x\u{3000}y\nz");
        assert!(wrap_line("\u{2009}", 4).is_empty());
    }

    #[test]
    fn tabs_expand_to_eight_columns() {
        assert_eq!(wrap_line("ab\tc", 80), vec!["ab      c"]);
    }
}
