//! Contextual shaping of Arabic-script letters into presentation forms.
//!
//! Each letter takes its isolated, initial, medial or final form depending
//! on whether its neighbors join with it. Harakat (vowel marks) are
//! transparent to joining and can be removed for languages that omit them.

const LAM: char = '\u{0644}';

/// Options for [`reshape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReshapeOptions {
    pub delete_harakat: bool,
}

impl ReshapeOptions {
    /// Reshaping rules for a language tag. Sorani Kurdish (`ckb`) is
    /// written without harakat.
    pub fn for_language(language: &str) -> Self {
        Self {
            delete_harakat: language == "ckb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    Dual,
    Right,
    NonJoining,
    Transparent,
}

/// Presentation forms of one letter; `'\0'` marks a missing form.
/// Base letters without encoded presentation forms repeat themselves.
#[derive(Debug, Clone, Copy)]
struct Forms {
    isolated: char,
    final_form: char,
    initial: char,
    medial: char,
}

impl Forms {
    fn joining(&self) -> Joining {
        if self.initial != '\0' {
            Joining::Dual
        } else if self.final_form != '\0' {
            Joining::Right
        } else {
            Joining::NonJoining
        }
    }
}

/// `(letter, isolated, final, initial, medial)`, sorted by letter.
#[rustfmt::skip]
const LETTERS: &[(char, char, char, char, char)] = &[
    ('\u{0621}', '\u{FE80}', '\0', '\0', '\0'),
    ('\u{0622}', '\u{FE81}', '\u{FE82}', '\0', '\0'),
    ('\u{0623}', '\u{FE83}', '\u{FE84}', '\0', '\0'),
    ('\u{0624}', '\u{FE85}', '\u{FE86}', '\0', '\0'),
    ('\u{0625}', '\u{FE87}', '\u{FE88}', '\0', '\0'),
    ('\u{0626}', '\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}'),
    ('\u{0627}', '\u{FE8D}', '\u{FE8E}', '\0', '\0'),
    ('\u{0628}', '\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}'),
    ('\u{0629}', '\u{FE93}', '\u{FE94}', '\0', '\0'),
    ('\u{062A}', '\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}'),
    ('\u{062B}', '\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}'),
    ('\u{062C}', '\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}'),
    ('\u{062D}', '\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}'),
    ('\u{062E}', '\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}'),
    ('\u{062F}', '\u{FEA9}', '\u{FEAA}', '\0', '\0'),
    ('\u{0630}', '\u{FEAB}', '\u{FEAC}', '\0', '\0'),
    ('\u{0631}', '\u{FEAD}', '\u{FEAE}', '\0', '\0'),
    ('\u{0632}', '\u{FEAF}', '\u{FEB0}', '\0', '\0'),
    ('\u{0633}', '\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}'),
    ('\u{0634}', '\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}'),
    ('\u{0635}', '\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}'),
    ('\u{0636}', '\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}'),
    ('\u{0637}', '\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}'),
    ('\u{0638}', '\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}'),
    ('\u{0639}', '\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}'),
    ('\u{063A}', '\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}'),
    ('\u{0640}', '\u{0640}', '\u{0640}', '\u{0640}', '\u{0640}'),
    ('\u{0641}', '\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}'),
    ('\u{0642}', '\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}'),
    ('\u{0643}', '\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}'),
    ('\u{0644}', '\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}'),
    ('\u{0645}', '\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}'),
    ('\u{0646}', '\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}'),
    ('\u{0647}', '\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}'),
    ('\u{0648}', '\u{FEED}', '\u{FEEE}', '\0', '\0'),
    ('\u{0649}', '\u{FEEF}', '\u{FEF0}', '\0', '\0'),
    ('\u{064A}', '\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}'),
    ('\u{0679}', '\u{FB66}', '\u{FB67}', '\u{FB68}', '\u{FB69}'),
    ('\u{067E}', '\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}'),
    ('\u{0686}', '\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}'),
    ('\u{0688}', '\u{FB88}', '\u{FB89}', '\0', '\0'),
    ('\u{0691}', '\u{FB8C}', '\u{FB8D}', '\0', '\0'),
    ('\u{0695}', '\u{0695}', '\u{0695}', '\0', '\0'),
    ('\u{0698}', '\u{FB8A}', '\u{FB8B}', '\0', '\0'),
    ('\u{06A4}', '\u{FB6A}', '\u{FB6B}', '\u{FB6C}', '\u{FB6D}'),
    ('\u{06A9}', '\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}'),
    ('\u{06AF}', '\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}'),
    ('\u{06B5}', '\u{06B5}', '\u{06B5}', '\u{06B5}', '\u{06B5}'),
    ('\u{06BA}', '\u{FB9E}', '\u{FB9F}', '\0', '\0'),
    ('\u{06BE}', '\u{FBAA}', '\u{FBAB}', '\u{FBAC}', '\u{FBAD}'),
    ('\u{06C1}', '\u{FBA6}', '\u{FBA7}', '\u{FBA8}', '\u{FBA9}'),
    ('\u{06C6}', '\u{FBD9}', '\u{FBDA}', '\0', '\0'),
    ('\u{06C7}', '\u{FBD7}', '\u{FBD8}', '\0', '\0'),
    ('\u{06C8}', '\u{FBDB}', '\u{FBDC}', '\0', '\0'),
    ('\u{06CB}', '\u{FBDE}', '\u{FBDF}', '\0', '\0'),
    ('\u{06CC}', '\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}'),
    ('\u{06CE}', '\u{06CE}', '\u{06CE}', '\u{06CE}', '\u{06CE}'),
    ('\u{06D0}', '\u{FBE4}', '\u{FBE5}', '\u{FBE6}', '\u{FBE7}'),
    ('\u{06D2}', '\u{FBAE}', '\u{FBAF}', '\0', '\0'),
    ('\u{06D5}', '\u{06D5}', '\u{06D5}', '\0', '\0'),
];

/// Lam followed by an alef variant: `(alef, isolated, final)`.
const LAM_ALEF: &[(char, char, char)] = &[
    ('\u{0622}', '\u{FEF5}', '\u{FEF6}'),
    ('\u{0623}', '\u{FEF7}', '\u{FEF8}'),
    ('\u{0625}', '\u{FEF9}', '\u{FEFA}'),
    ('\u{0627}', '\u{FEFB}', '\u{FEFC}'),
];

fn letter_forms(ch: char) -> Option<Forms> {
    let idx = LETTERS.binary_search_by_key(&ch, |entry| entry.0).ok()?;
    let (_, isolated, final_form, initial, medial) = LETTERS[idx];
    Some(Forms {
        isolated,
        final_form,
        initial,
        medial,
    })
}

fn lam_alef_forms(alef: char) -> Option<Forms> {
    LAM_ALEF
        .iter()
        .find(|entry| entry.0 == alef)
        .map(|&(_, isolated, final_form)| Forms {
            isolated,
            final_form,
            initial: '\0',
            medial: '\0',
        })
}

/// Whether `ch` is an Arabic combining mark (haraka and related signs).
pub fn is_harakah(ch: char) -> bool {
    matches!(ch,
        '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}'
        | '\u{08D3}'..='\u{08FF}')
}

#[derive(Debug, Clone, Copy)]
struct Unit {
    ch: char,
    forms: Option<Forms>,
    joining: Joining,
}

impl Unit {
    fn plain(ch: char) -> Self {
        let forms = letter_forms(ch);
        let joining = match forms {
            Some(forms) => forms.joining(),
            None if is_harakah(ch) => Joining::Transparent,
            None => Joining::NonJoining,
        };
        Self { ch, forms, joining }
    }

    fn joins_forward(&self) -> bool {
        self.joining == Joining::Dual
    }

    fn joins_backward(&self) -> bool {
        matches!(self.joining, Joining::Dual | Joining::Right)
    }
}

/// Replace Arabic-script letters with their contextual presentation forms.
///
/// Characters outside the table pass through unchanged and break joining.
pub fn reshape(text: &str, options: &ReshapeOptions) -> String {
    let chars: Vec<char> = text
        .chars()
        .filter(|&ch| !(options.delete_harakat && is_harakah(ch)))
        .collect();

    let mut units: Vec<Unit> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == LAM {
            // Marks between lam and alef move after the ligature.
            let alef_at = (i + 1..chars.len()).find(|&j| !is_harakah(chars[j]));
            if let Some(j) = alef_at {
                if let Some(forms) = lam_alef_forms(chars[j]) {
                    units.push(Unit {
                        ch,
                        forms: Some(forms),
                        joining: Joining::Right,
                    });
                    units.extend(chars[i + 1..j].iter().map(|&mark| Unit::plain(mark)));
                    i = j + 1;
                    continue;
                }
            }
        }
        units.push(Unit::plain(ch));
        i += 1;
    }

    let mut out = String::with_capacity(text.len());
    for (idx, unit) in units.iter().enumerate() {
        let Some(forms) = unit.forms else {
            out.push(unit.ch);
            continue;
        };
        let prev = units[..idx]
            .iter()
            .rev()
            .find(|u| u.joining != Joining::Transparent);
        let next = units[idx + 1..]
            .iter()
            .find(|u| u.joining != Joining::Transparent);

        let joins_prev = unit.joins_backward() && prev.is_some_and(Unit::joins_forward);
        let joins_next = unit.joins_forward() && next.is_some_and(Unit::joins_backward);

        let shaped = match (joins_prev, joins_next) {
            (true, true) if forms.medial != '\0' => forms.medial,
            (true, _) if forms.final_form != '\0' => forms.final_form,
            (false, true) if forms.initial != '\0' => forms.initial,
            _ => forms.isolated,
        };
        out.push(shaped);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_table_is_sorted() {
        assert!(LETTERS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn word_takes_contextual_forms() {
        // meem-initial, reh-final, hah-initial, beh-medial, alef-final
        assert_eq!(
            reshape("مرحبا", &ReshapeOptions::default()),
            "\u{FEE3}\u{FEAE}\u{FEA3}\u{FE92}\u{FE8E}"
        );
    }

    #[test]
    fn lone_letter_is_isolated() {
        assert_eq!(reshape("ب", &ReshapeOptions::default()), "\u{FE8F}");
    }

    #[test]
    fn lam_alef_forms_a_ligature() {
        assert_eq!(reshape("لا", &ReshapeOptions::default()), "\u{FEFB}");
        // seen-initial, lam-alef-final, meem-isolated
        assert_eq!(
            reshape("سلام", &ReshapeOptions::default()),
            "\u{FEB3}\u{FEFC}\u{FEE1}"
        );
    }

    #[test]
    fn harakat_are_transparent_or_deleted() {
        let kept = reshape("بَب", &ReshapeOptions::default());
        assert_eq!(kept, "\u{FE91}\u{064E}\u{FE90}");

        let deleted = reshape("بَب", &ReshapeOptions::for_language("ckb"));
        assert_eq!(deleted, "\u{FE91}\u{FE90}");
    }

    #[test]
    fn spaces_break_joining() {
        assert_eq!(
            reshape("ب ب", &ReshapeOptions::default()),
            "\u{FE8F} \u{FE8F}"
        );
    }

    #[test]
    fn other_scripts_pass_through() {
        assert_eq!(reshape("abc 123", &ReshapeOptions::default()), "abc 123");
    }
}
