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

//! Error types for GEDCOM parsing.

use gedcom_codec::CodecError;
use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GedErrorKind {
    /// Malformed line: bad level, missing tag, invalid xref.
    Syntax,
    /// Illegal level jump or CONC/CONT nesting.
    Integrity,
    /// Duplicate cross-reference id.
    Collision,
    /// Unknown character set, BOM conflict, missing CHAR.
    Encoding,
    /// Bytes invalid under the active codec.
    Decode,
    /// Security limit exceeded.
    Security,
    /// I/O error.
    IO,
}

impl fmt::Display for GedErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Integrity => write!(f, "IntegrityError"),
            Self::Collision => write!(f, "CollisionError"),
            Self::Encoding => write!(f, "EncodingError"),
            Self::Decode => write!(f, "DecodeError"),
            Self::Security => write!(f, "SecurityError"),
            Self::IO => write!(f, "IOError"),
        }
    }
}

/// An error that occurred during GEDCOM parsing.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct GedError {
    /// The kind of error.
    pub kind: GedErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based, 0 when unknown).
    pub line: usize,
    /// Byte offset in the source.
    pub offset: Option<u64>,
    /// Additional context, usually the offending line.
    pub context: Option<String>,
}

impl GedError {
    /// Create a new error.
    pub fn new(kind: GedErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            offset: None,
            context: None,
        }
    }

    /// Add byte offset information.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the line number if none is known yet.
    pub fn with_line(mut self, line: usize) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self
    }

    /// True for the kinds that mean the record structure is broken.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            GedErrorKind::Syntax | GedErrorKind::Integrity | GedErrorKind::Collision
        )
    }

    // Convenience constructors for each error kind
    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Syntax, message, line)
    }

    pub fn integrity(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Integrity, message, line)
    }

    pub fn collision(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Collision, message, line)
    }

    pub fn encoding(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Encoding, message, line)
    }

    pub fn decode(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Decode, message, line)
    }

    pub fn security(message: impl Into<String>, line: usize) -> Self {
        Self::new(GedErrorKind::Security, message, line)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(GedErrorKind::IO, message, 0)
    }
}

impl From<CodecError> for GedError {
    fn from(err: CodecError) -> Self {
        let message = err.to_string();
        match err {
            CodecError::Io(_) => GedError::io(message),
            CodecError::Decode { offset, .. } => GedError::decode(message, 0).with_offset(offset),
            CodecError::UnknownEncoding { line, .. } | CodecError::BomConflict { line, .. } => {
                GedError::encoding(message, line)
            }
            CodecError::MissingChar | CodecError::Encode { .. } => GedError::encoding(message, 0),
        }
    }
}

impl From<std::io::Error> for GedError {
    fn from(err: std::io::Error) -> Self {
        GedError::io(err.to_string())
    }
}

/// Result type for GEDCOM operations.
pub type GedResult<T> = Result<T, GedError>;
