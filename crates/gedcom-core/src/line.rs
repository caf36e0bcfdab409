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

//! Lexing of single GEDCOM lines.
//!
//! A line is `level [@xref@] TAG [value]`. Lexing works on raw bytes so
//! that values split across CONC lines in the middle of a multi-byte
//! character can be joined before anything is decoded.

use crate::error::{GedError, GedResult};
use gedcom_codec::RawLine;
use once_cell::sync::Lazy;
use regex::bytes::Regex;

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s-u)^[\t\x0B\x0C ]*([0-9]+)(?:[ ]*(@[A-Za-z0-9-][^@]*@))?[ ]*([A-Za-z0-9_-]+)(?:[ ](.*))?$",
    )
    .expect("valid line regex")
});

/// A logical GEDCOM line: one record line with its CONC/CONT
/// continuations already merged into the value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GedcomLine {
    /// Nesting level.
    pub level: usize,
    /// Cross-reference id including the `@` delimiters.
    pub xref_id: Option<String>,
    /// Tag name.
    pub tag: String,
    /// Decoded value, `None` when the line has no value.
    pub value: Option<String>,
    /// Byte offset of the first byte of the line.
    pub offset: u64,
    /// Line number (1-based).
    pub line: usize,
}

/// A lexed physical line whose xref and value are still raw bytes.
#[derive(Debug, Clone)]
pub(crate) struct LexedLine {
    pub(crate) level: usize,
    pub(crate) xref_id: Option<Vec<u8>>,
    pub(crate) tag: String,
    pub(crate) value: Option<Vec<u8>>,
    pub(crate) offset: u64,
    pub(crate) value_offset: u64,
    pub(crate) line: usize,
}

impl LexedLine {
    pub(crate) fn is_continuation(&self) -> bool {
        self.tag == "CONC" || self.tag == "CONT"
    }
}

/// Split a physical line into its parts.
///
/// Leading ASCII whitespace is ignored. A line that does not match the line grammar
/// is a syntax error carrying the offending text as context.
pub(crate) fn lex(raw: &RawLine) -> GedResult<LexedLine> {
    let caps = LINE_RE.captures(&raw.bytes).ok_or_else(|| {
        GedError::syntax("line does not match GEDCOM line syntax", raw.number)
            .with_offset(raw.offset)
            .with_context(String::from_utf8_lossy(&raw.bytes).into_owned())
    })?;

    // group 1 and 3 are mandatory in the pattern
    let level_bytes = caps.get(1).map_or(&b""[..], |m| m.as_bytes());
    let level = std::str::from_utf8(level_bytes)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| {
            GedError::syntax("level number out of range", raw.number).with_offset(raw.offset)
        })?;
    let tag = caps
        .get(3)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .unwrap_or_default();
    let xref_id = caps.get(2).map(|m| m.as_bytes().to_vec());
    let (value, value_offset) = match caps.get(4) {
        Some(m) => (Some(m.as_bytes().to_vec()), raw.offset + m.start() as u64),
        None => (None, raw.offset + raw.bytes.len() as u64),
    };

    Ok(LexedLine {
        level,
        xref_id,
        tag,
        value,
        offset: raw.offset,
        value_offset,
        line: raw.number,
    })
}

/// True when a value is a pointer: it starts and ends with `@` and has
/// something in between.
pub fn is_pointer(value: &str) -> bool {
    value.len() > 2 && value.starts_with('@') && value.ends_with('@')
}
