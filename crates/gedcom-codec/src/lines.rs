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

//! Byte-level line reader.
//!
//! GEDCOM values are decoded only after continuation lines have been merged,
//! so physical lines are handed out as raw bytes together with their line
//! number and source offset.
//!
//! All three terminator conventions are accepted: LF, CRLF, and a lone CR.
//!
//! # Examples
//!
//! ```rust
//! use gedcom_codec::LineReader;
//! use std::io::Cursor;
//!
//! let mut reader = LineReader::new(Cursor::new(b"0 HEAD\r\n1 CHAR ASCII\r0 TRLR".to_vec()));
//!
//! let line = reader.next_line().unwrap().unwrap();
//! assert_eq!((line.number, line.offset, &line.bytes[..]), (1, 0, &b"0 HEAD"[..]));
//!
//! let line = reader.next_line().unwrap().unwrap();
//! assert_eq!((line.number, line.offset, &line.bytes[..]), (2, 8, &b"1 CHAR ASCII"[..]));
//!
//! let line = reader.next_line().unwrap().unwrap();
//! assert_eq!((line.number, line.offset, &line.bytes[..]), (3, 21, &b"0 TRLR"[..]));
//!
//! assert!(reader.next_line().unwrap().is_none());
//! ```

use crate::error::{CodecError, CodecResult};
use memchr::memchr2;
use std::io::{BufRead, BufReader, Read};

/// One physical line, terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Line number (1-based).
    pub number: usize,
    /// Byte offset of the first byte of the line.
    pub offset: u64,
    /// Line content without the terminator.
    pub bytes: Vec<u8>,
}

/// Buffered line reader with line number and offset tracking.
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    offset: u64,
}

impl<R: Read> LineReader<R> {
    /// Create a reader whose first byte sits at offset 0.
    pub fn new(reader: R) -> Self {
        Self::with_offset(reader, 0)
    }

    /// Create a reader whose first byte sits at `offset` in the source,
    /// for sources positioned past a byte-order mark.
    pub fn with_offset(reader: R, offset: u64) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            offset,
        }
    }

    /// Number of the last line read.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next line.
    pub fn next_line(&mut self) -> CodecResult<Option<RawLine>> {
        let start = self.offset;
        let mut bytes = Vec::new();
        let mut seen_any = false;

        loop {
            let buf = self.reader.fill_buf().map_err(CodecError::Io)?;
            if buf.is_empty() {
                break;
            }
            seen_any = true;

            match memchr2(b'\n', b'\r', buf) {
                Some(i) => {
                    bytes.extend_from_slice(&buf[..i]);
                    let terminator = buf[i];
                    self.reader.consume(i + 1);
                    self.offset += (i + 1) as u64;

                    if terminator == b'\r' {
                        let next = self.reader.fill_buf().map_err(CodecError::Io)?;
                        if next.first() == Some(&b'\n') {
                            self.reader.consume(1);
                            self.offset += 1;
                        }
                    }

                    self.line_number += 1;
                    return Ok(Some(RawLine {
                        number: self.line_number,
                        offset: start,
                        bytes,
                    }));
                }
                None => {
                    let n = buf.len();
                    bytes.extend_from_slice(buf);
                    self.reader.consume(n);
                    self.offset += n as u64;
                }
            }
        }

        if !seen_any {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(RawLine {
            number: self.line_number,
            offset: start,
            bytes,
        }))
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = CodecResult<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
