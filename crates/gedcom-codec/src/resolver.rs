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

//! Character set resolution for GEDCOM sources.
//!
//! A GEDCOM file announces its character set in the header (`1 CHAR ...`),
//! which means the header has to be read before anyone knows how to read it.
//! Resolution works like this:
//!
//! 1. A byte-order mark (UTF-8, UTF-16LE, UTF-16BE) commits the whole file
//!    to that encoding. A CHAR declaration that names something else is a
//!    [`CodecError::BomConflict`].
//! 2. Without a BOM, every line up to and including the CHAR line is read
//!    with the default codec (GEDCOM ANSEL unless configured otherwise) and
//!    every byte after it with the declared codec.
//! 3. A header without CHAR leaves the default codec in charge of the whole
//!    file, unless the caller asked for CHAR to be mandatory.
//!
//! Header scanning stops at the first level-0 record other than `HEAD`, at
//! the end of input, or at the CHAR line, whichever comes first.
//!
//! # Examples
//!
//! ```rust
//! use gedcom_codec::{resolve, Codec, ResolveOptions};
//! use std::io::Cursor;
//!
//! let data = b"0 HEAD\n1 CHAR UTF-8\n0 @I1@ INDI\n0 TRLR\n".to_vec();
//! let resolved = resolve(&mut Cursor::new(data), &ResolveOptions::default()).unwrap();
//!
//! assert_eq!(resolved.body_codec(), Codec::utf8());
//! assert_eq!(resolved.switch_offset(), Some(20));
//! assert_eq!(resolved.codec_at(7), Codec::default());
//! assert_eq!(resolved.codec_at(20), Codec::utf8());
//! ```

use crate::ansel::AnselVariant;
use crate::codec::{Codec, ErrorPolicy};
use crate::codepage::CodePage;
use crate::error::{CodecError, CodecResult};
use crate::lines::LineReader;
use std::io::{Cursor, Read, Seek, SeekFrom};
use tracing::{debug, error, warn};

/// Byte-order mark found at the start of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bom {
    /// `EF BB BF`
    Utf8,
    /// `FF FE`
    Utf16Le,
    /// `FE FF`
    Utf16Be,
}

impl Bom {
    /// Recognize a BOM at the start of `bytes`.
    pub fn detect(bytes: &[u8]) -> Option<Bom> {
        if bytes.starts_with(b"\xef\xbb\xbf") {
            Some(Bom::Utf8)
        } else if bytes.starts_with(b"\xff\xfe") {
            Some(Bom::Utf16Le)
        } else if bytes.starts_with(b"\xfe\xff") {
            Some(Bom::Utf16Be)
        } else {
            None
        }
    }

    /// Length of the mark in bytes.
    pub fn size(self) -> usize {
        match self {
            Bom::Utf8 => 3,
            Bom::Utf16Le | Bom::Utf16Be => 2,
        }
    }

    /// Codec the mark commits the file to.
    pub fn codec(self) -> Codec {
        match self {
            Bom::Utf8 => Codec::utf8(),
            Bom::Utf16Le => Codec::utf16le(),
            Bom::Utf16Be => Codec::utf16be(),
        }
    }

    /// Whether a declared codec agrees with the mark. A UTF-16 mark accepts
    /// a UTF-16 declaration of either byte order, since `UNICODE` does not
    /// name one.
    pub fn accepts(self, declared: Codec) -> bool {
        match self {
            Bom::Utf8 => declared == Codec::utf8(),
            Bom::Utf16Le | Bom::Utf16Be => declared.is_utf16(),
        }
    }
}

/// How a character set name stands with respect to the GEDCOM standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Legality {
    /// Named by the standard.
    Legal,
    /// Not in the standard, but means exactly one thing.
    Illegal,
    /// Not in the standard, and producers used it for several things.
    Ambiguous,
}

/// Map a CHAR value to a codec.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Names
/// outside the GEDCOM table fall back to the WHATWG label registry and are
/// reported as [`Legality::Illegal`]. Returns `None` for unknown names.
pub fn charset(name: &str) -> Option<(Codec, Legality)> {
    let lower = name.trim().to_ascii_lowercase();
    let legal = match lower.as_str() {
        "ansel" => Some(Codec::Ansel(AnselVariant::Gedcom)),
        "ascii" => Some(Codec::Ascii),
        "utf-8" | "utf8" => Some(Codec::utf8()),
        "unicode" | "utf-16" => Some(Codec::utf16le()),
        _ => None,
    };
    if let Some(codec) = legal {
        return Some((codec, Legality::Legal));
    }

    let ambiguous = match lower.as_str() {
        "ibmpc" | "ibm" | "ibm-pc" | "oem" => Some(Codec::CodePage(CodePage::Cp437)),
        "msdos" | "ibm dos" | "ms-dos" => Some(Codec::CodePage(CodePage::Cp850)),
        "ansi" | "windows" | "ibm_windows" | "ibm windows" => Codec::for_label("windows-1252"),
        "iso8859" | "latin1" => Codec::for_label("iso-8859-1"),
        "macintosh" => Codec::for_label("x-mac-roman"),
        _ => None,
    };
    if let Some(codec) = ambiguous {
        return Some((codec, Legality::Ambiguous));
    }

    let illegal = match lower.as_str() {
        "cp1252" => Codec::for_label("windows-1252"),
        "iso8859-1" => Codec::for_label("iso-8859-1"),
        _ => Codec::for_label(&lower),
    };
    illegal.map(|codec| (codec, Legality::Illegal))
}

/// Options for [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Codec forced by the caller. Skips detection and CHAR handling
    /// entirely; a BOM, if present, is still skipped.
    pub encoding: Option<Codec>,
    /// Codec for the header region and for files without CHAR.
    pub default_codec: Codec,
    /// Fail with [`CodecError::MissingChar`] when the header has no CHAR.
    pub require_char: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            encoding: None,
            default_codec: Codec::default(),
            require_char: false,
        }
    }
}

/// Outcome of encoding resolution.
///
/// Offsets are absolute positions in the source, so a switch offset can be
/// compared directly against the offsets a [`LineReader`] reports when it is
/// created at the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEncoding {
    bom: Option<Bom>,
    header_codec: Codec,
    body_codec: Codec,
    switch_offset: Option<u64>,
    declared: Option<String>,
    char_line: Option<usize>,
}

impl ResolvedEncoding {
    fn uniform(bom: Option<Bom>, codec: Codec) -> Self {
        Self {
            bom,
            header_codec: codec,
            body_codec: codec,
            switch_offset: None,
            declared: None,
            char_line: None,
        }
    }

    /// The byte-order mark, if any.
    pub fn bom(&self) -> Option<Bom> {
        self.bom
    }

    /// Number of BOM bytes preceding the first line.
    pub fn bom_len(&self) -> usize {
        self.bom.map_or(0, Bom::size)
    }

    /// Codec for bytes before the switch offset.
    pub fn header_codec(&self) -> Codec {
        self.header_codec
    }

    /// Codec for bytes at or after the switch offset. This is the encoding
    /// of the file as far as callers are concerned.
    pub fn body_codec(&self) -> Codec {
        self.body_codec
    }

    /// First byte after the CHAR line, when the codec changes there.
    pub fn switch_offset(&self) -> Option<u64> {
        self.switch_offset
    }

    /// CHAR value as written in the file.
    pub fn declared(&self) -> Option<&str> {
        self.declared.as_deref()
    }

    /// Line number of the CHAR declaration.
    pub fn char_line(&self) -> Option<usize> {
        self.char_line
    }

    /// Codec in effect for a line starting at `offset`.
    pub fn codec_at(&self, offset: u64) -> Codec {
        match self.switch_offset {
            Some(switch) if offset < switch => self.header_codec,
            _ => self.body_codec,
        }
    }

    /// True when the source must be transcoded before lines can be split
    /// on ASCII terminators.
    pub fn needs_transcoding(&self) -> bool {
        !self.body_codec.is_ascii_compatible()
    }
}

/// A CHAR line found while scanning the header.
#[derive(Debug)]
struct Declaration {
    line: usize,
    name: String,
    end_offset: u64,
}

/// Decide how a source is encoded.
///
/// The source is left positioned where it was on entry.
pub fn resolve<R: Read + Seek>(
    reader: &mut R,
    options: &ResolveOptions,
) -> CodecResult<ResolvedEncoding> {
    let start = reader.stream_position()?;
    let mut prefix = [0u8; 3];
    let filled = read_prefix(reader, &mut prefix)?;
    let bom = Bom::detect(&prefix[..filled]);
    let bom_len = bom.map_or(0, Bom::size) as u64;

    if let Some(forced) = options.encoding {
        reader.seek(SeekFrom::Start(start))?;
        debug!(codec = %forced, "encoding forced by caller");
        return Ok(ResolvedEncoding::uniform(bom, forced));
    }

    reader.seek(SeekFrom::Start(start + bom_len))?;
    let declaration = match bom {
        Some(mark) if mark.codec().is_utf16() => {
            let mut raw = Vec::new();
            reader.read_to_end(&mut raw)?;
            let text = mark.codec().decode(&raw, ErrorPolicy::Replace)?;
            scan_header(LineReader::new(Cursor::new(text.into_bytes())), 0)?
        }
        _ => scan_header(LineReader::with_offset(&mut *reader, 0), start + bom_len)?,
    };
    reader.seek(SeekFrom::Start(start))?;

    let Some(declaration) = declaration else {
        if options.require_char {
            return Err(CodecError::MissingChar);
        }
        let codec = bom.map_or(options.default_codec, Bom::codec);
        debug!(codec = %codec, "no CHAR in header, using fallback codec");
        return Ok(ResolvedEncoding::uniform(bom, codec));
    };

    let (codec, legality) =
        charset(&declaration.name).ok_or_else(|| CodecError::UnknownEncoding {
            line: declaration.line,
            name: declaration.name.clone(),
        })?;
    report_legality(&declaration, codec, legality);

    match bom {
        Some(mark) => {
            if !mark.accepts(codec) {
                return Err(CodecError::BomConflict {
                    line: declaration.line,
                    declared: declaration.name,
                    bom: mark.codec().name().to_string(),
                });
            }
            debug!(codec = %mark.codec(), "encoding committed by byte-order mark");
            Ok(ResolvedEncoding {
                declared: Some(declaration.name),
                char_line: Some(declaration.line),
                ..ResolvedEncoding::uniform(bom, mark.codec())
            })
        }
        None => {
            debug!(
                header = %options.default_codec,
                body = %codec,
                offset = declaration.end_offset,
                "encoding switches after CHAR"
            );
            Ok(ResolvedEncoding {
                bom: None,
                header_codec: options.default_codec,
                body_codec: codec,
                switch_offset: Some(declaration.end_offset),
                declared: Some(declaration.name),
                char_line: Some(declaration.line),
            })
        }
    }
}

fn report_legality(declaration: &Declaration, codec: Codec, legality: Legality) {
    if legality == Legality::Legal {
        return;
    }
    error!(
        line = declaration.line,
        "'{}' is not a legal GEDCOM character set",
        declaration.name
    );
    if legality == Legality::Ambiguous {
        warn!(
            line = declaration.line,
            "character set '{}' is ambiguous, reading it as {}",
            declaration.name,
            codec
        );
    }
}

fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> CodecResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

fn scan_header<R: Read>(mut lines: LineReader<R>, base: u64) -> CodecResult<Option<Declaration>> {
    while let Some(line) = lines.next_line()? {
        let mut words = line
            .bytes
            .split(|b| b.is_ascii_whitespace())
            .filter(|w| !w.is_empty());
        let (Some(level), Some(tag)) = (words.next(), words.next()) else {
            continue;
        };

        if level == b"0" && tag != b"HEAD" {
            break;
        }
        if level == b"1" && tag == b"CHAR" {
            let name: Vec<String> = words
                .map(|w| String::from_utf8_lossy(w).into_owned())
                .collect();
            if name.is_empty() {
                continue;
            }
            return Ok(Some(Declaration {
                line: line.number,
                name: name.join(" "),
                end_offset: base + lines.offset(),
            }));
        }
    }
    Ok(None)
}
