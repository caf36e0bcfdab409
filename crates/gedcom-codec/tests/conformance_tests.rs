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

//! Character set conformance tests.
//!
//! These tests walk the GEDCOM 5.5.1 character set rules end to end: header
//! detection, the legacy alias table, the header/body codec switch and
//! ANSEL decoding of real-world name data.

use gedcom_codec::{
    resolve, AnselVariant, Codec, CodecError, ErrorPolicy, LineReader, ResolveOptions,
};
use std::io::Cursor;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

fn detect(data: &[u8]) -> Result<Codec, CodecError> {
    init_tracing();
    resolve(&mut Cursor::new(data.to_vec()), &ResolveOptions::default()).map(|r| r.body_codec())
}

/// Decode every line of `data` with the codec that applies at its offset.
fn decode_lines(data: &[u8], policy: ErrorPolicy) -> Result<Vec<String>, CodecError> {
    let mut source = Cursor::new(data.to_vec());
    let resolved = resolve(&mut source, &ResolveOptions::default())?;
    let mut lines = LineReader::with_offset(source, 0);
    let mut out = Vec::new();
    while let Some(line) = lines.next_line()? {
        let bytes = if line.offset == 0 {
            &line.bytes[resolved.bom_len()..]
        } else {
            &line.bytes[..]
        };
        out.push(
            resolved
                .codec_at(line.offset)
                .decode(bytes, policy)
                .map_err(|e| e.rebase(line.offset))?,
        );
    }
    Ok(out)
}

// =============================================================================
// Standard character sets
// =============================================================================

/// ASCII, ANSEL and UTF-8 are recognized from the CHAR line.
#[test]
fn test_standard_charsets() {
    assert_eq!(detect(b"0 HEAD\n1 CHAR ASCII\n0 TRLR").unwrap(), Codec::Ascii);
    assert_eq!(
        detect(b"0 HEAD\n1 CHAR ANSEL\n0 TRLR").unwrap(),
        Codec::Ansel(AnselVariant::Gedcom)
    );
    assert_eq!(detect(b"0 HEAD\n1 CHAR UTF-8\n0 TRLR").unwrap(), Codec::utf8());
    assert_eq!(
        detect(b"\xef\xbb\xbf0 HEAD\n1 CHAR UTF-8\n0 TRLR").unwrap(),
        Codec::utf8()
    );
}

/// Without a header the GEDCOM default applies, unless a BOM says otherwise.
#[test]
fn test_fallbacks() {
    assert_eq!(detect(b"0 TRLR").unwrap(), Codec::Ansel(AnselVariant::Gedcom));
    assert_eq!(detect(b"\xef\xbb\xbf0 TRLR").unwrap(), Codec::utf8());
}

/// Every legacy alias resolves, to the codec producers meant by it.
#[test]
fn test_illegal_charsets() {
    let cases = [
        ("IBMPC", "cp437"),
        ("IBM", "cp437"),
        ("IBM-PC", "cp437"),
        ("OEM", "cp437"),
        ("MSDOS", "cp850"),
        ("IBM DOS", "cp850"),
        ("MS-DOS", "cp850"),
        ("ANSI", "windows-1252"),
        ("WINDOWS", "windows-1252"),
        ("IBM WINDOWS", "windows-1252"),
        ("IBM_WINDOWS", "windows-1252"),
        ("WINDOWS-1250", "windows-1250"),
        ("WINDOWS-1251", "windows-1251"),
        ("CP1252", "windows-1252"),
        ("ISO-8859-1", "windows-1252"),
        ("ISO8859-1", "windows-1252"),
        ("ISO8859", "windows-1252"),
        ("LATIN1", "windows-1252"),
        ("MACINTOSH", "macintosh"),
    ];
    for (name, expected) in cases {
        let data = format!("0 HEAD\n1 CHAR {}\n0 TRLR", name);
        let codec = detect(data.as_bytes()).unwrap();
        assert_eq!(codec.name(), expected, "CHAR {}", name);
    }
}

/// Unknown names and BOM contradictions are errors.
#[test]
fn test_codec_errors() {
    assert!(matches!(
        detect(b"0 HEAD\n1 CHAR NOTCODEC\n0 TRLR"),
        Err(CodecError::UnknownEncoding { .. })
    ));
    assert!(matches!(
        detect(b"\xef\xbb\xbf0 HEAD\n1 CHAR ANSEL\n0 TRLR"),
        Err(CodecError::BomConflict { .. })
    ));
}

// =============================================================================
// Header/body switch
// =============================================================================

/// The header is ANSEL even when the body is UTF-8.
#[test]
fn test_header_is_ansel_body_is_declared() {
    let mut data = b"0 HEAD\n1 SOUR Gen\xe2eal\n1 CHAR UTF-8\n0 @I1@ INDI\n1 NAME ".to_vec();
    data.extend_from_slice("Éloïse /Müller/\n".as_bytes());
    let lines = decode_lines(&data, ErrorPolicy::Strict).unwrap();
    assert_eq!(lines[1], "1 SOUR Genéal");
    assert_eq!(lines[4], "1 NAME Éloïse /Müller/");
}

/// Windows-1251 bodies are read as Cyrillic.
#[test]
fn test_windows_1251_body() {
    let data = b"0 HEAD\n1 CHAR WINDOWS-1251\n0 @I1@ INDI\n1 NAME \xc8\xe2\xe0\xed /\xc8\xe2\xe0\xed\xee\xe2/\n";
    let lines = decode_lines(data, ErrorPolicy::Strict).unwrap();
    assert_eq!(lines[3], "1 NAME Иван /Иванов/");
}

/// Decode errors carry the absolute source offset.
#[test]
fn test_decode_error_offset() {
    let data = b"0 HEAD\n1 CHAR ASCII\n0 @I1@ INDI\n1 NAME J\xf6rg\n";
    let err = decode_lines(data, ErrorPolicy::Strict).unwrap_err();
    assert_eq!(err.offset(), Some(40));

    let lines = decode_lines(data, ErrorPolicy::Replace).unwrap();
    assert_eq!(lines[3], "1 NAME J\u{FFFD}rg");
    let lines = decode_lines(data, ErrorPolicy::Ignore).unwrap();
    assert_eq!(lines[3], "1 NAME Jrg");
}

/// A UTF-16 file with a BOM decodes once transcoded.
#[test]
fn test_utf16_source() {
    let text = "0 HEAD\n1 CHAR UNICODE\n0 @I1@ INDI\n1 NAME Zoë /Ødegård/\n0 TRLR\n";
    let mut data = b"\xff\xfe".to_vec();
    data.extend(Codec::utf16le().encode(text, ErrorPolicy::Strict).unwrap());

    let mut source = Cursor::new(data.clone());
    let resolved = resolve(&mut source, &ResolveOptions::default()).unwrap();
    assert!(resolved.needs_transcoding());
    let decoded = resolved
        .body_codec()
        .decode(&data[resolved.bom_len()..], ErrorPolicy::Strict)
        .unwrap();
    assert_eq!(decoded, text);
}

// =============================================================================
// ANSEL data
// =============================================================================

/// Diacritics written before their letter come out composed.
#[test]
fn test_ansel_names() {
    let codec = Codec::Ansel(AnselVariant::Gedcom);
    let cases: [(&[u8], &str); 5] = [
        (b"Fran\xf0cois", "François"),
        (b"Lef\xe1evre", "Lefèvre"),
        (b"M\xe8uller", "Müller"),
        (b"\xa1\xe2od\xe2z", "Łódź"),
        (b"\xe2A\xe2a", "Áá"),
    ];
    for (bytes, expected) in cases {
        assert_eq!(codec.decode(bytes, ErrorPolicy::Strict).unwrap(), expected);
    }
}

/// Two diacritics on one letter compose when Unicode has the form.
#[test]
fn test_ansel_stacked_diacritics() {
    let codec = Codec::Ansel(AnselVariant::Gedcom);
    // macron + acute over o
    assert_eq!(codec.decode(b"\xe5\xe2o", ErrorPolicy::Strict).unwrap(), "\u{1E53}");
}

/// The GEDCOM extensions are only defined in the GEDCOM variant.
#[test]
fn test_ansel_variants() {
    let gedcom = Codec::Ansel(AnselVariant::Gedcom);
    let standard = Codec::Ansel(AnselVariant::Standard);
    assert_eq!(gedcom.decode(b"Stra\xcfe", ErrorPolicy::Strict).unwrap(), "Straße");
    assert!(standard.decode(b"Stra\xcfe", ErrorPolicy::Strict).is_err());
}
