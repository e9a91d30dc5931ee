//! Script-specific typographic exceptions.

/// Thai marks that stack on their base consonant and must not advance the
/// pen, whatever advance the font reports for them: the upper vowels
/// (MAI HAN-AKAT, SARA I, SARA II, SARA UE, SARA UEE), the below vowels
/// (SARA U, SARA UU, PHINTHU) and the tone and diacritic marks from
/// MAITAIKHU through YAMAKKAN.
///
/// Sorted by code point for binary search.
const ZERO_ADVANCE_MARKS: &[char] = &[
    '\u{0E31}', '\u{0E34}', '\u{0E35}', '\u{0E36}', '\u{0E37}', '\u{0E38}', '\u{0E39}',
    '\u{0E3A}', '\u{0E47}', '\u{0E48}', '\u{0E49}', '\u{0E4A}', '\u{0E4B}', '\u{0E4C}',
    '\u{0E4D}', '\u{0E4E}',
];

/// Whether `ch` is forced to a zero advance in horizontal layout.
pub fn is_zero_advance_mark(ch: char) -> bool {
    ZERO_ADVANCE_MARKS.binary_search(&ch).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(ZERO_ADVANCE_MARKS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn thai_marks_have_no_advance() {
        // MAI EK, SARA I, SARA U
        for ch in ['\u{0E48}', '\u{0E34}', '\u{0E38}'] {
            assert!(is_zero_advance_mark(ch));
        }
    }

    #[test]
    fn base_letters_advance() {
        // KO KAI, SARA AA, Latin
        for ch in ['\u{0E01}', '\u{0E32}', 'a', ' '] {
            assert!(!is_zero_advance_mark(ch));
        }
    }
}
