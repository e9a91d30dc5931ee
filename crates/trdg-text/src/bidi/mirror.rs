//! Mirroring of paired punctuation inside right-to-left runs.
//!
//! Covers ASCII brackets and parentheses, angle brackets and guillemets;
//! the full Bidi_Mirroring_Glyph table is larger.

/// Return the mirrored counterpart of `ch`, or `ch` itself.
pub fn mirrored(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        '‹' => '›',
        '›' => '‹',
        _ => ch,
    }
}
