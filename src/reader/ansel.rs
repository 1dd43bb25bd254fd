//! ANSEL (ANSI/NISO Z39.47) to Unicode mapping.
//!
//! ANSEL is ASCII-transparent below 0x80. Above that it carries two ranges:
//! spacing special characters (0xA1-0xCF) and non-spacing combining marks
//! (0xE0-0xFE). A combining mark precedes its base character in ANSEL
//! storage order; Unicode wants base-then-combining, so decoding buffers
//! pending marks and emits them after the next base character.
//!
//! The lookup tables are process-wide constants, built once on first use
//! and never mutated.

use once_cell::sync::Lazy;

/// Unicode replacement character, emitted for unmapped bytes.
pub(crate) const REPLACEMENT: char = '\u{FFFD}';

/// Spacing characters, indexed by `byte - 0x80`.
static SPECIAL: Lazy<[Option<char>; 128]> = Lazy::new(|| {
    let mut table = [None; 128];
    for (byte, ch) in [
        (0xA1_u8, '\u{0141}'), // Latin capital L with stroke
        (0xA2, '\u{00D8}'),    // Latin capital O with stroke
        (0xA3, '\u{0110}'),    // Latin capital D with stroke
        (0xA4, '\u{00DE}'),    // Latin capital thorn
        (0xA5, '\u{00C6}'),    // Latin capital AE
        (0xA6, '\u{0152}'),    // Latin capital OE
        (0xA7, '\u{02B9}'),    // modifier letter prime
        (0xA8, '\u{00B7}'),    // middle dot
        (0xA9, '\u{266D}'),    // music flat sign
        (0xAA, '\u{00AE}'),    // registered sign
        (0xAB, '\u{00B1}'),    // plus-minus sign
        (0xAC, '\u{01A0}'),    // Latin capital O with horn
        (0xAD, '\u{01AF}'),    // Latin capital U with horn
        (0xAE, '\u{02BC}'),    // modifier letter apostrophe
        (0xB0, '\u{02BB}'),    // modifier letter turned comma
        (0xB1, '\u{0142}'),    // Latin small l with stroke
        (0xB2, '\u{00F8}'),    // Latin small o with stroke
        (0xB3, '\u{0111}'),    // Latin small d with stroke
        (0xB4, '\u{00FE}'),    // Latin small thorn
        (0xB5, '\u{00E6}'),    // Latin small ae
        (0xB6, '\u{0153}'),    // Latin small oe
        (0xB7, '\u{02BA}'),    // modifier letter double prime
        (0xB8, '\u{0131}'),    // Latin small dotless i
        (0xB9, '\u{00A3}'),    // pound sign
        (0xBA, '\u{00F0}'),    // Latin small eth
        (0xBC, '\u{01A1}'),    // Latin small o with horn
        (0xBD, '\u{01B0}'),    // Latin small u with horn
        (0xC0, '\u{00B0}'),    // degree sign
        (0xC1, '\u{2113}'),    // script small l
        (0xC2, '\u{2117}'),    // sound recording copyright
        (0xC3, '\u{00A9}'),    // copyright sign
        (0xC4, '\u{266F}'),    // music sharp sign
        (0xC5, '\u{00BF}'),    // inverted question mark
        (0xC6, '\u{00A1}'),    // inverted exclamation mark
        (0xC7, '\u{00DF}'),    // Latin small sharp s
        (0xC8, '\u{20AC}'),    // euro sign
        (0xCF, '\u{00DF}'),    // sharp s, alternate position
    ] {
        table[(byte - 0x80) as usize] = Some(ch);
    }
    table
});

/// Combining marks, indexed by `byte - 0x80`.
static COMBINING: Lazy<[Option<char>; 128]> = Lazy::new(|| {
    let mut table = [None; 128];
    for (byte, ch) in [
        (0xE0_u8, '\u{0309}'), // hook above
        (0xE1, '\u{0300}'),    // grave accent
        (0xE2, '\u{0301}'),    // acute accent
        (0xE3, '\u{0302}'),    // circumflex
        (0xE4, '\u{0303}'),    // tilde
        (0xE5, '\u{0304}'),    // macron
        (0xE6, '\u{0306}'),    // breve
        (0xE7, '\u{0307}'),    // dot above
        (0xE8, '\u{0308}'),    // diaeresis
        (0xE9, '\u{030C}'),    // caron
        (0xEA, '\u{030A}'),    // ring above
        (0xEB, '\u{FE20}'),    // ligature left half
        (0xEC, '\u{FE21}'),    // ligature right half
        (0xED, '\u{0315}'),    // comma above right
        (0xEE, '\u{030B}'),    // double acute
        (0xEF, '\u{0310}'),    // candrabindu
        (0xF0, '\u{0327}'),    // cedilla
        (0xF1, '\u{0328}'),    // ogonek
        (0xF2, '\u{0323}'),    // dot below
        (0xF3, '\u{0324}'),    // double dot below
        (0xF4, '\u{0325}'),    // ring below
        (0xF5, '\u{0333}'),    // double underscore
        (0xF6, '\u{0332}'),    // underscore
        (0xF7, '\u{0326}'),    // comma below
        (0xF8, '\u{031C}'),    // left half ring below
        (0xF9, '\u{032E}'),    // breve below
        (0xFA, '\u{FE22}'),    // double tilde left half
        (0xFB, '\u{FE23}'),    // double tilde right half
        (0xFE, '\u{0313}'),    // comma above
    ] {
        table[(byte - 0x80) as usize] = Some(ch);
    }
    table
});

/// Decodes one line of ANSEL bytes, re-ordering combining marks after their
/// base character. Returns the text and the count of unmapped bytes that
/// were replaced with U+FFFD.
pub(crate) fn decode_line(bytes: &[u8]) -> (String, usize) {
    let mut out = String::with_capacity(bytes.len());
    let mut pending_marks: Vec<char> = Vec::new();
    let mut replaced = 0;

    for &byte in bytes {
        if byte < 0x80 {
            out.push(byte as char);
            for mark in pending_marks.drain(..) {
                out.push(mark);
            }
            continue;
        }
        let index = (byte - 0x80) as usize;
        if let Some(mark) = COMBINING[index] {
            pending_marks.push(mark);
            continue;
        }
        let ch = match SPECIAL[index] {
            Some(ch) => ch,
            None => {
                replaced += 1;
                REPLACEMENT
            }
        };
        out.push(ch);
        for mark in pending_marks.drain(..) {
            out.push(mark);
        }
    }

    // Trailing marks with no base character to attach to.
    replaced += pending_marks.len();
    for _ in pending_marks {
        out.push(REPLACEMENT);
    }

    (out, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let (text, replaced) = decode_line(b"0 HEAD");
        assert_eq!(text, "0 HEAD");
        assert_eq!(replaced, 0);
    }

    #[test]
    fn test_special_characters() {
        // 0xA1 = L-stroke, 0xB5 = ae, 0xB2 = o-stroke
        let (text, replaced) = decode_line(&[0xA1, 0xB5, 0xB2]);
        assert_eq!(text, "\u{0141}\u{00E6}\u{00F8}");
        assert_eq!(replaced, 0);
    }

    #[test]
    fn test_combining_mark_reordered_after_base() {
        // acute (0xE2) precedes 'e' in ANSEL, follows it in Unicode
        let (text, _) = decode_line(&[b'J', b'o', b's', 0xE2, b'e']);
        assert_eq!(text, "Jose\u{0301}");
    }

    #[test]
    fn test_stacked_combining_marks_keep_order() {
        let (text, _) = decode_line(&[0xE3, 0xE8, b'a']);
        assert_eq!(text, "a\u{0302}\u{0308}");
    }

    #[test]
    fn test_unmapped_byte_replaced() {
        let (text, replaced) = decode_line(&[b'x', 0xBE, b'y']);
        assert_eq!(text, format!("x{REPLACEMENT}y"));
        assert_eq!(replaced, 1);
    }

    #[test]
    fn test_trailing_mark_without_base() {
        let (text, replaced) = decode_line(&[b'a', 0xE2]);
        assert_eq!(text, format!("a{REPLACEMENT}"));
        assert_eq!(replaced, 1);
    }
}
