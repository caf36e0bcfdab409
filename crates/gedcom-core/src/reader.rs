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

//! Streaming reader producing logical GEDCOM lines.
//!
//! The reader resolves the source encoding, splits the byte stream into
//! physical lines, merges CONC/CONT continuations into their owner's value
//! and decodes the result.
//!
//! Offsets reported for UTF-16 sources refer to the UTF-8 text the reader
//! transcodes them into, since line splitting has to happen on ASCII
//! terminators.

use crate::error::{GedError, GedResult};
use crate::limits::Limits;
use crate::line::{lex, GedcomLine, LexedLine};
use crate::parser::ParseOptions;
use gedcom_codec::{
    resolve, Codec, ErrorPolicy, LineReader, ResolveOptions, ResolvedEncoding,
};
use std::io::{Cursor, Read, Seek, SeekFrom};
use tracing::{debug, trace};

/// Byte source behind the line reader.
enum Source<R> {
    Direct(R),
    Transcoded(Cursor<Vec<u8>>),
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Source::Direct(r) => r.read(buf),
            Source::Transcoded(c) => c.read(buf),
        }
    }
}

/// Iterator over the logical lines of a GEDCOM source.
///
/// # Examples
///
/// ```text
/// let reader = GedcomReader::new(File::open("tree.ged")?, &ParseOptions::default())?;
/// for line in reader {
///     let line = line?;
///     println!("{} {} {:?}", line.level, line.tag, line.value);
/// }
/// ```
pub struct GedcomReader<R: Read> {
    lines: LineReader<Source<R>>,
    resolved: ResolvedEncoding,
    transcoded: bool,
    policy: ErrorPolicy,
    limits: Limits,
    /// Line read ahead while collecting continuations.
    pending: Option<LexedLine>,
    /// Error hit while reading ahead, reported on the next call.
    deferred: Option<GedError>,
    /// Level of the previous physical line and whether it was CONC/CONT.
    previous: Option<(usize, bool)>,
    failed: bool,
}

impl<R: Read + Seek> GedcomReader<R> {
    /// Resolve the encoding of `source` and position the reader on its
    /// first line.
    pub fn new(mut source: R, options: &ParseOptions) -> GedResult<Self> {
        let start = source.stream_position()?;
        let resolved = resolve(
            &mut source,
            &ResolveOptions {
                encoding: options.encoding,
                default_codec: options.default_encoding,
                require_char: options.require_char,
            },
        )?;
        let body_start = start + resolved.bom_len() as u64;
        source.seek(SeekFrom::Start(body_start))?;

        debug!(
            header = resolved.header_codec().name(),
            body = resolved.body_codec().name(),
            declared = resolved.declared().unwrap_or(""),
            bom = resolved.bom_len(),
            "resolved source encoding"
        );

        let transcoded = resolved.needs_transcoding();
        let lines = if transcoded {
            let mut bytes = Vec::new();
            source.read_to_end(&mut bytes)?;
            let text = resolved
                .body_codec()
                .decode(&bytes, options.error_policy)
                .map_err(|e| GedError::from(e.rebase(body_start)))?;
            debug!(bytes = bytes.len(), "transcoded source to UTF-8");
            LineReader::new(Source::Transcoded(Cursor::new(text.into_bytes())))
        } else {
            LineReader::with_offset(Source::Direct(source), body_start)
        };

        Ok(Self {
            lines,
            resolved,
            transcoded,
            policy: options.error_policy,
            limits: options.limits,
            pending: None,
            deferred: None,
            previous: None,
            failed: false,
        })
    }
}

impl<R: Read> GedcomReader<R> {
    /// The encoding of the file body.
    pub fn encoding(&self) -> Codec {
        self.resolved.body_codec()
    }

    /// Full outcome of encoding resolution.
    pub fn resolved(&self) -> &ResolvedEncoding {
        &self.resolved
    }

    /// Number of BOM bytes before the first line.
    pub fn bom_len(&self) -> usize {
        self.resolved.bom_len()
    }

    /// Read the next logical line, or `None` at end of input.
    pub fn next_record(&mut self) -> GedResult<Option<GedcomLine>> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        let mut first = match self.pending.take() {
            Some(line) => line,
            None => match self.next_lexed()? {
                Some(line) => line,
                None => return Ok(None),
            },
        };
        if first.is_continuation() {
            return Err(GedError::integrity(
                format!("{} line without a preceding record", first.tag),
                first.line,
            )
            .with_offset(first.offset));
        }

        let blob = first.tag == "BLOB";
        let mut value = first.value.take();
        loop {
            let next = match self.next_lexed() {
                Ok(Some(next)) => next,
                Ok(None) => break,
                Err(err) => {
                    // reported on the following call, after this record
                    self.deferred = Some(err);
                    break;
                }
            };
            if !next.is_continuation() {
                self.pending = Some(next);
                break;
            }
            if blob || (next.tag == "CONC" && next.value.is_none()) {
                continue;
            }
            let mut merged = value.take().unwrap_or_default();
            if next.tag == "CONT" {
                merged.push(b'\n');
            }
            if let Some(part) = &next.value {
                merged.extend_from_slice(part);
            }
            if merged.len() > self.limits.max_value_length {
                return Err(GedError::security(
                    format!(
                        "value exceeds maximum length of {} bytes",
                        self.limits.max_value_length
                    ),
                    next.line,
                )
                .with_offset(next.offset));
            }
            value = Some(merged);
        }

        let codec = self.codec_for(first.offset);
        let xref_id = match &first.xref_id {
            Some(bytes) => Some(self.decode(codec, bytes, first.offset, first.line)?),
            None => None,
        };
        let value = match &value {
            Some(bytes) => Some(self.decode(codec, bytes, first.value_offset, first.line)?),
            None => None,
        };

        trace!(line = first.line, tag = %first.tag, "record line");
        Ok(Some(GedcomLine {
            level: first.level,
            xref_id,
            tag: first.tag,
            value,
            offset: first.offset,
            line: first.line,
        }))
    }

    fn codec_for(&self, offset: u64) -> Codec {
        if self.transcoded {
            Codec::utf8()
        } else {
            self.resolved.codec_at(offset)
        }
    }

    fn decode(&self, codec: Codec, bytes: &[u8], base: u64, line: usize) -> GedResult<String> {
        codec
            .decode(bytes, self.policy)
            .map_err(|e| GedError::from(e.rebase(base)).with_line(line))
    }

    /// Next non-blank physical line, lexed and checked against the level
    /// rules.
    fn next_lexed(&mut self) -> GedResult<Option<LexedLine>> {
        let raw = loop {
            match self.lines.next_line()? {
                Some(raw) if raw.bytes.iter().all(|b| b.is_ascii_whitespace()) => continue,
                Some(raw) => break raw,
                None => return Ok(None),
            }
        };
        if raw.bytes.len() > self.limits.max_line_length {
            return Err(GedError::security(
                format!(
                    "line exceeds maximum length of {} bytes",
                    self.limits.max_line_length
                ),
                raw.number,
            )
            .with_offset(raw.offset));
        }

        let line = lex(&raw)?;
        if line.level > self.limits.max_level {
            return Err(GedError::security(
                format!("level {} exceeds maximum of {}", line.level, self.limits.max_level),
                line.line,
            )
            .with_offset(line.offset));
        }

        let continuation = line.is_continuation();
        match self.previous {
            Some((prev_level, prev_continuation)) => {
                if line.level > prev_level + 1 {
                    return Err(GedError::integrity(
                        format!(
                            "illegal level nesting: level {} follows level {}",
                            line.level, prev_level
                        ),
                        line.line,
                    )
                    .with_offset(line.offset));
                }
                if continuation {
                    let expected = if prev_continuation { prev_level } else { prev_level + 1 };
                    if line.level != expected {
                        return Err(GedError::integrity(
                            format!(
                                "{} at level {}, expected level {}",
                                line.tag, line.level, expected
                            ),
                            line.line,
                        )
                        .with_offset(line.offset));
                    }
                }
            }
            None if line.level > 0 => {
                return Err(GedError::integrity(
                    format!("first line has level {}, expected 0", line.level),
                    line.line,
                )
                .with_offset(line.offset));
            }
            None => {}
        }
        self.previous = Some((line.level, continuation));
        Ok(Some(line))
    }
}

impl<R: Read> Iterator for GedcomReader<R> {
    type Item = GedResult<GedcomLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_record() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GedErrorKind;

    fn reader(data: &[u8]) -> GedcomReader<Cursor<Vec<u8>>> {
        let options = ParseOptions::builder().encoding(Codec::utf8()).build();
        GedcomReader::new(Cursor::new(data.to_vec()), &options).unwrap()
    }

    fn read_all(data: &[u8]) -> GedResult<Vec<GedcomLine>> {
        reader(data).collect()
    }

    fn error_of(data: &[u8]) -> GedError {
        read_all(data).unwrap_err()
    }

    // ==================== Line splitting tests ====================

    #[test]
    fn test_offsets() {
        let lines = read_all(b"0 HEAD\n1 CHAR ASCII\n1 SOUR PIF PAF\n0 @i1@ INDI\n0 TRLR").unwrap();
        let offsets: Vec<u64> = lines.iter().map(|l| l.offset).collect();
        assert_eq!(offsets, vec![0, 7, 20, 35, 47]);
        assert_eq!(lines[3].xref_id.as_deref(), Some("@i1@"));
        assert_eq!(lines[2].value.as_deref(), Some("PIF PAF"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let lines = read_all(b"0 HEAD\n\n   \n0 TRLR\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line, 4);
    }

    #[test]
    fn test_bom_and_crlf_offsets() {
        let data = b"\xef\xbb\xbf0 HEAD\r\n1 CHAR UTF-8\r\n0 TRLR\r\n";
        let options = ParseOptions::default();
        let mut r = GedcomReader::new(Cursor::new(data.to_vec()), &options).unwrap();
        assert_eq!(r.bom_len(), 3);
        let offsets: Vec<u64> = r.by_ref().map(|l| l.unwrap().offset).collect();
        assert_eq!(offsets, vec![3, 11, 25]);
    }

    // ==================== Continuation tests ====================

    #[test]
    fn test_conc_cont_merge() {
        let lines = read_all(b"0 INDI A\n1 NOTE A\n2 CONC B\n2 CONT C\n2 CONC D\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].value.as_deref(), Some("AB\nCD"));
    }

    #[test]
    fn test_conc_onto_empty_value() {
        let lines = read_all(b"0 INDI A\n1 NOTE\n2 CONC B\n2 CONT C\n2 CONC  D\n").unwrap();
        assert_eq!(lines[1].value.as_deref(), Some("B\nC D"));
    }

    #[test]
    fn test_cont_without_value_adds_newline() {
        let lines = read_all(b"0 NOTE A\n1 CONT\n1 CONT B\n").unwrap();
        assert_eq!(lines[0].value.as_deref(), Some("A\n\nB"));
    }

    #[test]
    fn test_blob_drops_continuations() {
        let lines = read_all(b"0 INDI A\n1 BLOB\n2 CONT C\n").unwrap();
        assert_eq!(lines[1].tag, "BLOB");
        assert!(lines[1].value.is_none());
    }

    #[test]
    fn test_multibyte_char_split_by_conc() {
        let text = "Иван Иванович".as_bytes();
        let mut data = b"0 TAG ".to_vec();
        data.extend_from_slice(&text[..3]);
        data.extend_from_slice(b"\n1 CONC ");
        data.extend_from_slice(&text[3..]);
        data.push(b'\n');
        let lines = read_all(&data).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].value.as_deref(), Some("Иван Иванович"));
    }

    // ==================== Integrity error tests ====================

    #[test]
    fn test_level_jump() {
        let err = error_of(b"0 HEAD\n2 CHAR ASCII\n");
        assert_eq!(err.kind, GedErrorKind::Integrity);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_first_line_not_level_zero() {
        let err = error_of(b"1 CHAR ASCII\n");
        assert_eq!(err.kind, GedErrorKind::Integrity);
    }

    #[test]
    fn test_continuation_level_mismatch() {
        let err = error_of(b"0 INDI\n1 NOTE A\n1 CONC B\n");
        assert_eq!(err.kind, GedErrorKind::Integrity);
        assert_eq!(err.line, 3);

        let err = error_of(b"0 INDI\n1 NOTE A\n2 CONC B\n3 CONT C\n");
        assert_eq!(err.kind, GedErrorKind::Integrity);
        assert_eq!(err.line, 4);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut r = reader(b"0 HEAD\nX SOUR\n0 TRLR\n");
        assert!(r.next().unwrap().is_ok());
        assert_eq!(r.next().unwrap().unwrap_err().kind, GedErrorKind::Syntax);
        assert!(r.next().is_none());
    }

    // ==================== Limit tests ====================

    #[test]
    fn test_line_length_limit() {
        let limits = Limits {
            max_line_length: 8,
            ..Limits::default()
        };
        let options = ParseOptions::builder()
            .encoding(Codec::utf8())
            .limits(limits)
            .build();
        let data = b"0 HEAD\n1 SOUR LONG VALUE\n".to_vec();
        let mut r = GedcomReader::new(Cursor::new(data), &options).unwrap();
        assert!(r.next().unwrap().is_ok());
        let err = r.next().unwrap().unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Security);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_value_length_limit() {
        let limits = Limits {
            max_value_length: 4,
            ..Limits::default()
        };
        let options = ParseOptions::builder()
            .encoding(Codec::utf8())
            .limits(limits)
            .build();
        let data = b"0 NOTE ABC\n1 CONC DEF\n".to_vec();
        let err = GedcomReader::new(Cursor::new(data), &options)
            .unwrap()
            .next()
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Security);
    }

    // ==================== Encoding tests ====================

    #[test]
    fn test_decode_error_offset() {
        let options = ParseOptions::builder().encoding(Codec::Ascii).build();
        let data = b"0 HEAD\n1 NOTE ab\xffc\n".to_vec();
        let err = GedcomReader::new(Cursor::new(data), &options)
            .unwrap()
            .collect::<GedResult<Vec<_>>>()
            .unwrap_err();
        assert_eq!(err.kind, GedErrorKind::Decode);
        assert_eq!(err.offset, Some(16));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_utf16_source() {
        let text = "0 HEAD\n1 CHAR UNICODE\n0 @I1@ INDI\n1 NAME Željko /Ž/\n0 TRLR\n";
        let mut data = vec![0xff, 0xfe];
        for unit in text.encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        let r = GedcomReader::new(Cursor::new(data), &ParseOptions::default()).unwrap();
        assert!(r.encoding().is_utf16());
        let lines: Vec<GedcomLine> = r.collect::<GedResult<_>>().unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3].value.as_deref(), Some("Željko /Ž/"));
    }
}
