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

//! Error types for character set handling.
//!
//! Every variant that can be traced back to a position in the input carries
//! it: header problems carry the 1-based line number of the offending line,
//! decoding problems carry the byte offset of the first bad byte.
//!
//! # Examples
//!
//! ```rust
//! use gedcom_codec::{AnselVariant, Codec, CodecError, ErrorPolicy};
//!
//! let codec = Codec::Ansel(AnselVariant::Gedcom);
//! let err = codec.decode(b"OK\xd0", ErrorPolicy::Strict).unwrap_err();
//! assert!(matches!(err, CodecError::Decode { .. }));
//! assert_eq!(err.offset(), Some(2));
//! ```

use thiserror::Error;

/// Errors raised while detecting, decoding or encoding character sets.
#[derive(Error, Debug)]
pub enum CodecError {
    /// I/O error while reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header names a character set nobody knows.
    #[error("line {line}: unknown character set '{name}'")]
    UnknownEncoding {
        /// Header line holding the CHAR declaration.
        line: usize,
        /// The name as written in the file.
        name: String,
    },

    /// A byte-order mark was found and the header declares something else.
    #[error("line {line}: CHAR declares '{declared}' but the byte-order mark says {bom}")]
    BomConflict {
        /// Header line holding the CHAR declaration.
        line: usize,
        /// The name as written in the file.
        declared: String,
        /// Codec implied by the byte-order mark.
        bom: String,
    },

    /// The header has no CHAR line and one was required.
    #[error("GEDCOM header does not declare a character set (CHAR)")]
    MissingChar,

    /// A byte sequence is invalid under the active codec.
    #[error("cannot decode {len} byte(s) at offset {offset} as {encoding}")]
    Decode {
        /// Byte offset of the first invalid byte.
        offset: u64,
        /// Length of the invalid sequence.
        len: usize,
        /// Codec name.
        encoding: String,
    },

    /// A character has no representation in the target codec.
    #[error("cannot encode {ch:?} at position {position} as {encoding}")]
    Encode {
        /// Byte position of the character in the input text.
        position: usize,
        /// The character.
        ch: char,
        /// Codec name.
        encoding: String,
    },
}

impl CodecError {
    /// Build a decode error for `len` bytes at `offset`.
    pub fn decode(offset: u64, len: usize, encoding: impl Into<String>) -> Self {
        Self::Decode {
            offset,
            len,
            encoding: encoding.into(),
        }
    }

    /// Build an encode error.
    pub fn encode(position: usize, ch: char, encoding: impl Into<String>) -> Self {
        Self::Encode {
            position,
            ch,
            encoding: encoding.into(),
        }
    }

    /// Header line number, if the error came from header scanning.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnknownEncoding { line, .. } | Self::BomConflict { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Byte offset, if the error came from decoding.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::Decode { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Shift a decode offset that was computed relative to a slice so that
    /// it becomes an absolute source position.
    pub fn rebase(self, base: u64) -> Self {
        match self {
            Self::Decode {
                offset,
                len,
                encoding,
            } => Self::Decode {
                offset: offset + base,
                len,
                encoding,
            },
            other => other,
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
