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

//! Codec selection and decode error policy.
//!
//! [`Codec`] is the closed set of character sets a GEDCOM file can be read
//! with: the two ANSEL variants, strict ASCII, the DOS code pages, and
//! everything `encoding_rs` knows (UTF-8, UTF-16, the Windows and ISO
//! families, Mac Roman).

use crate::ansel::{self, AnselVariant};
use crate::codepage::CodePage;
use crate::error::{CodecError, CodecResult};
use encoding_rs::{DecoderResult, Encoding, EncoderResult};
use std::fmt;
use std::str::FromStr;

/// What to do with bytes the active codec cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    /// Abort with [`CodecError::Decode`].
    #[default]
    Strict,
    /// Substitute U+FFFD and continue.
    Replace,
    /// Drop the offending bytes and continue.
    Ignore,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "replace" => Ok(Self::Replace),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!("unknown error policy '{}'", other)),
        }
    }
}

/// A character set usable for GEDCOM input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// ANSEL, plain or with GEDCOM extensions.
    Ansel(AnselVariant),
    /// 7-bit ASCII; bytes above 0x7F are errors.
    Ascii,
    /// DOS code page.
    CodePage(CodePage),
    /// Anything from the WHATWG encoding registry.
    Encoding(&'static Encoding),
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Ansel(AnselVariant::Gedcom)
    }
}

impl Codec {
    /// UTF-8.
    pub fn utf8() -> Codec {
        Codec::Encoding(encoding_rs::UTF_8)
    }

    /// UTF-16, little endian.
    pub fn utf16le() -> Codec {
        Codec::Encoding(encoding_rs::UTF_16LE)
    }

    /// UTF-16, big endian.
    pub fn utf16be() -> Codec {
        Codec::Encoding(encoding_rs::UTF_16BE)
    }

    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ansel(variant) => variant.name(),
            Self::Ascii => "ascii",
            Self::CodePage(page) => page.name(),
            Self::Encoding(encoding) => encoding.name(),
        }
    }

    /// Look a codec up by one of its names.
    ///
    /// Accepts the names produced by [`Codec::name`] plus every label the
    /// WHATWG registry knows. GEDCOM `CHAR` values go through
    /// [`crate::charset`] instead, which also knows the illegal
    /// aliases.
    pub fn for_label(label: &str) -> Option<Codec> {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "ansel" => Some(Self::Ansel(AnselVariant::Standard)),
            "gedcom" => Some(Self::Ansel(AnselVariant::Gedcom)),
            "ascii" => Some(Self::Ascii),
            "cp437" => Some(Self::CodePage(CodePage::Cp437)),
            "cp850" => Some(Self::CodePage(CodePage::Cp850)),
            _ => Encoding::for_label(label.as_bytes()).map(Self::Encoding),
        }
    }

    /// True when the codec is UTF-16 of either byte order.
    pub fn is_utf16(&self) -> bool {
        matches!(
            self,
            Self::Encoding(e) if *e == encoding_rs::UTF_16LE || *e == encoding_rs::UTF_16BE
        )
    }

    /// True when ASCII bytes mean ASCII characters, so that line structure
    /// can be read off raw bytes.
    pub fn is_ascii_compatible(&self) -> bool {
        match self {
            Self::Encoding(e) => e.is_ascii_compatible(),
            _ => true,
        }
    }

    /// Decode `bytes` under `policy`. Offsets in errors are relative to
    /// `bytes`.
    pub fn decode(&self, bytes: &[u8], policy: ErrorPolicy) -> CodecResult<String> {
        match self {
            Self::Ansel(variant) => ansel::decode(bytes, *variant, policy),
            Self::Ascii => decode_ascii(bytes, policy),
            Self::CodePage(page) => Ok(page.decode(bytes)),
            Self::Encoding(encoding) => decode_with(*encoding, bytes, policy),
        }
    }

    /// Encode `text` under `policy`.
    pub fn encode(&self, text: &str, policy: ErrorPolicy) -> CodecResult<Vec<u8>> {
        match self {
            Self::Ansel(variant) => ansel::encode(text, *variant, policy),
            Self::Ascii => encode_ascii(text, policy),
            Self::CodePage(page) => page.encode(text, policy),
            Self::Encoding(encoding) if *encoding == encoding_rs::UTF_16LE => {
                Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
            }
            Self::Encoding(encoding) if *encoding == encoding_rs::UTF_16BE => {
                Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            }
            Self::Encoding(encoding) => encode_with(*encoding, text, policy),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codec::for_label(s).ok_or_else(|| format!("unknown codec '{}'", s))
    }
}

fn decode_ascii(bytes: &[u8], policy: ErrorPolicy) -> CodecResult<String> {
    let mut out = String::with_capacity(bytes.len());
    for (pos, &b) in bytes.iter().enumerate() {
        if b.is_ascii() {
            out.push(b as char);
        } else {
            match policy {
                ErrorPolicy::Strict => return Err(CodecError::decode(pos as u64, 1, "ascii")),
                ErrorPolicy::Replace => out.push(char::REPLACEMENT_CHARACTER),
                ErrorPolicy::Ignore => {}
            }
        }
    }
    Ok(out)
}

fn encode_ascii(text: &str, policy: ErrorPolicy) -> CodecResult<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    for (pos, ch) in text.char_indices() {
        if ch.is_ascii() {
            out.push(ch as u8);
        } else {
            match policy {
                ErrorPolicy::Strict => return Err(CodecError::encode(pos, ch, "ascii")),
                ErrorPolicy::Replace => out.push(b'?'),
                ErrorPolicy::Ignore => {}
            }
        }
    }
    Ok(out)
}

fn decode_with(
    encoding: &'static Encoding,
    bytes: &[u8],
    policy: ErrorPolicy,
) -> CodecResult<String> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut out = String::with_capacity(bytes.len());
    let mut consumed = 0;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&bytes[consumed..], &mut out, true);
        consumed += read;
        match result {
            DecoderResult::InputEmpty => return Ok(out),
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(bytes.len() - consumed)
                    .unwrap_or(bytes.len() - consumed + 16);
                out.reserve(needed.max(4));
            }
            DecoderResult::Malformed(bad, extra) => {
                let start = consumed - extra as usize - bad as usize;
                match policy {
                    ErrorPolicy::Strict => {
                        return Err(CodecError::decode(start as u64, bad as usize, encoding.name()));
                    }
                    ErrorPolicy::Replace => out.push(char::REPLACEMENT_CHARACTER),
                    ErrorPolicy::Ignore => {}
                }
            }
        }
    }
}

fn encode_with(
    encoding: &'static Encoding,
    text: &str,
    policy: ErrorPolicy,
) -> CodecResult<Vec<u8>> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut consumed = 0;

    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(&text[consumed..], &mut out, true);
        consumed += read;
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => {
                let needed = encoder
                    .max_buffer_length_from_utf8_without_replacement(text.len() - consumed)
                    .unwrap_or(text.len() - consumed + 16);
                out.reserve(needed.max(4));
            }
            EncoderResult::Unmappable(ch) => match policy {
                ErrorPolicy::Strict => {
                    return Err(CodecError::encode(
                        consumed - ch.len_utf8(),
                        ch,
                        encoding.name(),
                    ));
                }
                ErrorPolicy::Replace => out.push(b'?'),
                ErrorPolicy::Ignore => {}
            },
        }
    }
}
