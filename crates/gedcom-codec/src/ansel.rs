// Dweve GEDCOM - Genealogical Data Communication Reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ANSEL (ANSI/NISO Z39.47) codec.
//!
//! ANSEL is an 8-bit character set: the lower half is ASCII, the upper half
//! holds special letters, symbols and non-spacing diacritics. A diacritic
//! byte is written *before* the letter it modifies, which is the opposite of
//! Unicode where combining marks follow their base character. Decoding
//! therefore buffers diacritics until the base letter shows up and then
//! composes the cluster to NFC; encoding decomposes characters and writes the
//! diacritics first.
//!
//! Two variants exist:
//!
//! - [`AnselVariant::Standard`]: the plain Z39.47 repertoire.
//! - [`AnselVariant::Gedcom`]: the repertoire extended by the GEDCOM 5.5
//!   standard (empty and black box, midline `e` and `o`, eszett, and the
//!   slash-through diacritic).
//!
//! # Examples
//!
//! ```rust
//! use gedcom_codec::ansel::{self, AnselVariant};
//! use gedcom_codec::ErrorPolicy;
//!
//! // tilde followed by `a`
//! let text = ansel::decode(b"\xe4a", AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap();
//! assert_eq!(text, "\u{00e3}");
//!
//! let bytes = ansel::encode("\u{00e3}", AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap();
//! assert_eq!(bytes, b"\xe4a");
//! ```

use crate::codec::ErrorPolicy;
use crate::error::{CodecError, CodecResult};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Which ANSEL repertoire to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnselVariant {
    /// Plain ANSEL.
    Standard,
    /// ANSEL with the GEDCOM extensions.
    #[default]
    Gedcom,
}

impl AnselVariant {
    /// Codec name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "ansel",
            Self::Gedcom => "gedcom",
        }
    }
}

/// Result of looking up one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mapping {
    Spacing(char),
    Combining(char),
    Undefined,
}

fn lookup(variant: AnselVariant, byte: u8) -> Mapping {
    use Mapping::{Combining, Spacing, Undefined};

    let gedcom = variant == AnselVariant::Gedcom;
    match byte {
        0x00..=0x9F => Spacing(byte as char),
        0xA1 => Spacing('\u{0141}'),
        0xA2 => Spacing('\u{00D8}'),
        0xA3 => Spacing('\u{0110}'),
        0xA4 => Spacing('\u{00DE}'),
        0xA5 => Spacing('\u{00C6}'),
        0xA6 => Spacing('\u{0152}'),
        0xA7 => Spacing('\u{02B9}'),
        0xA8 => Spacing('\u{00B7}'),
        0xA9 => Spacing('\u{266D}'),
        0xAA => Spacing('\u{00AE}'),
        0xAB => Spacing('\u{00B1}'),
        0xAC => Spacing('\u{01A0}'),
        0xAD => Spacing('\u{01AF}'),
        0xAE => Spacing('\u{02BC}'),
        0xAF => Spacing('\u{00AF}'),
        0xB0 => Spacing('\u{02BB}'),
        0xB1 => Spacing('\u{0142}'),
        0xB2 => Spacing('\u{00F8}'),
        0xB3 => Spacing('\u{0111}'),
        0xB4 => Spacing('\u{00FE}'),
        0xB5 => Spacing('\u{00E6}'),
        0xB6 => Spacing('\u{0153}'),
        0xB7 => Spacing('\u{02BA}'),
        0xB8 => Spacing('\u{0131}'),
        0xB9 => Spacing('\u{00A3}'),
        0xBA => Spacing('\u{00F0}'),
        0xBC => Spacing('\u{01A1}'),
        0xBD => Spacing('\u{01B0}'),
        0xBE if gedcom => Spacing('\u{25A1}'),
        0xBF if gedcom => Spacing('\u{25A0}'),
        0xC0 => Spacing('\u{00B0}'),
        0xC1 => Spacing('\u{2113}'),
        0xC2 => Spacing('\u{2117}'),
        0xC3 => Spacing('\u{00A9}'),
        0xC4 => Spacing('\u{266F}'),
        0xC5 => Spacing('\u{00BF}'),
        0xC6 => Spacing('\u{00A1}'),
        0xCD if gedcom => Spacing('e'),
        0xCE if gedcom => Spacing('o'),
        0xCF if gedcom => Spacing('\u{00DF}'),
        0xE0 => Combining('\u{0309}'),
        0xE1 => Combining('\u{0300}'),
        0xE2 => Combining('\u{0301}'),
        0xE3 => Combining('\u{0302}'),
        0xE4 => Combining('\u{0303}'),
        0xE5 => Combining('\u{0304}'),
        0xE6 => Combining('\u{0306}'),
        0xE7 => Combining('\u{0307}'),
        0xE8 => Combining('\u{0308}'),
        0xE9 => Combining('\u{030C}'),
        0xEA => Combining('\u{030A}'),
        0xEB => Combining('\u{FE20}'),
        0xEC => Combining('\u{FE21}'),
        0xED => Combining('\u{0315}'),
        0xEE => Combining('\u{030B}'),
        0xEF => Combining('\u{0310}'),
        0xF0 => Combining('\u{0327}'),
        0xF1 => Combining('\u{0328}'),
        0xF2 => Combining('\u{0323}'),
        0xF3 => Combining('\u{0324}'),
        0xF4 => Combining('\u{0325}'),
        0xF5 => Combining('\u{0333}'),
        0xF6 => Combining('\u{0332}'),
        0xF7 => Combining('\u{0326}'),
        0xF8 => Combining('\u{031C}'),
        0xF9 => Combining('\u{032E}'),
        0xFA => Combining('\u{FE22}'),
        0xFB => Combining('\u{FE23}'),
        0xFC if gedcom => Combining('\u{0338}'),
        0xFE => Combining('\u{0313}'),
        _ => Undefined,
    }
}

/// Byte for a spacing character, ASCII first so that the midline letters
/// of the GEDCOM variant never shadow plain `e` and `o`.
fn spacing_byte(variant: AnselVariant, ch: char) -> Option<u8> {
    if (ch as u32) < 0xA0 {
        return Some(ch as u8);
    }
    (0xA0..=0xDFu8).find(|&b| lookup(variant, b) == Mapping::Spacing(ch))
}

fn combining_byte(variant: AnselVariant, ch: char) -> Option<u8> {
    (0xE0..=0xFFu8).find(|&b| lookup(variant, b) == Mapping::Combining(ch))
}

/// Emit `base` with the pending diacritics applied, composed to NFC.
fn push_cluster(out: &mut String, base: char, marks: &mut Vec<char>) {
    if marks.is_empty() {
        out.push(base);
        return;
    }
    out.extend(std::iter::once(base).chain(marks.drain(..)).nfc());
}

/// Decode ANSEL bytes into a string.
///
/// Diacritics preceding a character are attached to it and the result is
/// composed to NFC, so `E2 65` becomes `é` (U+00E9). Diacritics left
/// dangling at the end of input are emitted as bare combining marks.
///
/// # Errors
///
/// Undefined bytes fail with [`CodecError::Decode`] under
/// [`ErrorPolicy::Strict`]; the offset is relative to `bytes`.
pub fn decode(bytes: &[u8], variant: AnselVariant, policy: ErrorPolicy) -> CodecResult<String> {
    let mut out = String::with_capacity(bytes.len());
    let mut marks: Vec<char> = Vec::new();

    for (pos, &byte) in bytes.iter().enumerate() {
        match lookup(variant, byte) {
            Mapping::Combining(mark) => marks.push(mark),
            Mapping::Spacing(ch) => push_cluster(&mut out, ch, &mut marks),
            Mapping::Undefined => match policy {
                ErrorPolicy::Strict => {
                    return Err(CodecError::decode(pos as u64, 1, variant.name()));
                }
                ErrorPolicy::Replace => {
                    out.extend(marks.drain(..));
                    out.push(char::REPLACEMENT_CHARACTER);
                }
                ErrorPolicy::Ignore => {}
            },
        }
    }

    out.extend(marks.drain(..));
    Ok(out)
}

/// Encode a string as ANSEL.
///
/// The input is processed one grapheme-like cluster at a time: a base
/// character followed by any combining marks. Characters ANSEL has no
/// precomposed form for are decomposed, and all diacritics of the cluster are
/// written before the base byte.
///
/// # Errors
///
/// A cluster that cannot be expressed fails with [`CodecError::Encode`]
/// under [`ErrorPolicy::Strict`]; `Replace` writes one `?` per cluster and
/// `Ignore` drops it.
pub fn encode(text: &str, variant: AnselVariant, policy: ErrorPolicy) -> CodecResult<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        let mut trailing = Vec::new();
        while let Some(&(_, next)) = chars.peek() {
            if !is_combining_mark(next) {
                break;
            }
            trailing.push(next);
            chars.next();
        }

        match encode_cluster(variant, ch, &trailing) {
            Some(bytes) => out.extend(bytes),
            None => match policy {
                ErrorPolicy::Strict => return Err(CodecError::encode(pos, ch, variant.name())),
                ErrorPolicy::Replace => out.push(b'?'),
                ErrorPolicy::Ignore => {}
            },
        }
    }

    Ok(out)
}

fn encode_cluster(variant: AnselVariant, ch: char, trailing: &[char]) -> Option<Vec<u8>> {
    let mut marks = Vec::with_capacity(trailing.len() + 1);

    let base = if let Some(byte) = spacing_byte(variant, ch) {
        byte
    } else if let Some(byte) = combining_byte(variant, ch) {
        // a mark with nothing in front of it
        marks.push(byte);
        for &mark in trailing {
            marks.push(combining_byte(variant, mark)?);
        }
        return Some(marks);
    } else {
        let mut parts = std::iter::once(ch).nfd();
        let base = parts.next().and_then(|c| spacing_byte(variant, c))?;
        for mark in parts {
            marks.push(combining_byte(variant, mark)?);
        }
        base
    };

    for &mark in trailing {
        marks.push(combining_byte(variant, mark)?);
    }
    marks.push(base);
    Some(marks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(bytes: &[u8]) -> String {
        decode(bytes, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap()
    }

    fn enc(text: &str) -> Vec<u8> {
        encode(text, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap()
    }

    // ==================== Table tests ====================

    #[test]
    fn test_decode_ascii() {
        assert_eq!(dec(b"Aabcd0123$%"), "Aabcd0123$%");
    }

    #[test]
    fn test_decode_upper_letters() {
        assert_eq!(
            dec(b"\xa1\xa2\xa3\xa4\xa5\xa6\xa9\xaa\xac\xad"),
            "ŁØĐÞÆŒ♭®ƠƯ"
        );
    }

    #[test]
    fn test_decode_lower_letters() {
        assert_eq!(
            dec(b"\xb1\xb2\xb3\xb4\xb5\xb6\xb8\xb9\xba\xbc\xbd"),
            "łøđþæœı£ðơư"
        );
    }

    #[test]
    fn test_decode_symbols() {
        assert_eq!(dec(b"\xc0\xc1\xc2\xc3\xc4\xc5\xc6"), "°ℓ℗©♯¿¡");
    }

    #[test]
    fn test_spacing_macron() {
        assert_eq!(dec(b"A\xafB"), "A\u{00AF}B");
        let standard = decode(b"\xaf", AnselVariant::Standard, ErrorPolicy::Strict).unwrap();
        assert_eq!(standard, "\u{00AF}");
        assert_eq!(enc("A\u{00AF}B"), b"A\xafB");
    }

    #[test]
    fn test_gedcom_extensions() {
        assert_eq!(dec(b"\xbe\xbf\xcf"), "\u{25A1}\u{25A0}ß");
        let standard = decode(b"\xbe", AnselVariant::Standard, ErrorPolicy::Strict);
        assert!(standard.is_err());
        let standard = decode(b"\xcf", AnselVariant::Standard, ErrorPolicy::Strict);
        assert!(standard.is_err());
    }

    #[test]
    fn test_slash_diacritic_is_gedcom_only() {
        assert_eq!(dec(b"\xfco"), "o\u{0338}");
        let standard = decode(b"\xfco", AnselVariant::Standard, ErrorPolicy::Strict);
        assert!(standard.is_err());
    }

    // ==================== Composition tests ====================

    #[test]
    fn test_diacritic_before_letter_is_composed() {
        assert_eq!(dec(b"\xe4a"), "\u{00E3}");
        assert_eq!(dec(b"Ren\xe2e"), "René");
        assert_eq!(dec(b"M\xe8uller"), "Müller");
    }

    #[test]
    fn test_multiple_diacritics_on_one_letter() {
        // macron + acute on `o` composes to U+1E53
        assert_eq!(dec(b"\xe5\xe2o"), "\u{1E53}");
    }

    #[test]
    fn test_diacritic_without_precomposed_form() {
        // candrabindu on `a` has no precomposed form
        assert_eq!(dec(b"\xefa"), "a\u{0310}");
    }

    #[test]
    fn test_dangling_diacritic_at_end() {
        assert_eq!(dec(b"a\xe4"), "a\u{0303}");
    }

    // ==================== Error policy tests ====================

    #[test]
    fn test_decode_strict_fails_with_offset() {
        let err =
            decode(b"\xa1\xa2\xd0\xd1", AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn test_decode_ignore_drops_bytes() {
        let text = decode(b"\xa1\xa2\xd0\xd1", AnselVariant::Gedcom, ErrorPolicy::Ignore).unwrap();
        assert_eq!(text, "ŁØ");
    }

    #[test]
    fn test_decode_replace_substitutes() {
        let text = decode(b"\xa1\xa2\xd0\xd1", AnselVariant::Gedcom, ErrorPolicy::Replace).unwrap();
        assert_eq!(text, "ŁØ\u{FFFD}\u{FFFD}");
    }

    // ==================== Encoding tests ====================

    #[test]
    fn test_encode_ascii() {
        assert_eq!(enc("Aabcd0123$%"), b"Aabcd0123$%");
    }

    #[test]
    fn test_encode_special_letters() {
        assert_eq!(
            enc("ŁØĐÞÆŒ♭®ƠƯ"),
            b"\xa1\xa2\xa3\xa4\xa5\xa6\xa9\xaa\xac\xad"
        );
        assert_eq!(
            enc("łøđþæœı£ðơư"),
            b"\xb1\xb2\xb3\xb4\xb5\xb6\xb8\xb9\xba\xbc\xbd"
        );
        assert_eq!(enc("°ℓ℗©♯¿¡"), b"\xc0\xc1\xc2\xc3\xc4\xc5\xc6");
    }

    #[test]
    fn test_encode_moves_diacritics_first() {
        assert_eq!(enc("\u{0303}a"), b"\xe4a");
        assert_eq!(enc("a\u{0303}"), b"\xe4a");
        assert_eq!(enc("ã"), b"\xe4a");
        assert_eq!(enc("René"), b"Ren\xe2e");
    }

    #[test]
    fn test_encode_plain_e_and_o_stay_ascii() {
        assert_eq!(enc("eo"), b"eo");
    }

    #[test]
    fn test_encode_strict_fails() {
        let err = encode("Привет", AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap_err();
        assert!(matches!(err, CodecError::Encode { position: 0, .. }));
    }

    #[test]
    fn test_encode_ignore_and_replace() {
        let bytes = encode("Привет Andy", AnselVariant::Gedcom, ErrorPolicy::Ignore).unwrap();
        assert_eq!(bytes, b" Andy");
        let bytes =
            encode("Привет Andy", AnselVariant::Gedcom, ErrorPolicy::Replace).unwrap();
        assert_eq!(bytes, b"?????? Andy");
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(AnselVariant::Standard.name(), "ansel");
        assert_eq!(AnselVariant::Gedcom.name(), "gedcom");
        assert_eq!(AnselVariant::default(), AnselVariant::Gedcom);
    }
}
