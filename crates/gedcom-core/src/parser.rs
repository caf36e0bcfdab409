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

//! Parse entry points and options.

use crate::builder::TreeBuilder;
use crate::document::Document;
use crate::error::GedResult;
use crate::limits::Limits;
use crate::name::Dialect;
use crate::reader::GedcomReader;
use gedcom_codec::{Codec, ErrorPolicy};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, info};

/// Parsing options for configuring how a GEDCOM source is read.
///
/// ParseOptions provides both direct field access and a fluent builder API.
///
/// # Creating ParseOptions
///
/// ## Using the builder pattern (recommended)
///
/// ```text
/// use gedcom_core::ParseOptions;
/// use gedcom_codec::{Codec, ErrorPolicy};
///
/// // Force UTF-8 and replace undecodable bytes
/// let opts = ParseOptions::builder()
///     .encoding(Codec::utf8())
///     .error_policy(ErrorPolicy::Replace)
///     .build();
///
/// // Reject files whose header does not declare CHAR
/// let opts = ParseOptions::builder()
///     .require_char(true)
///     .max_records(100_000)
///     .build();
/// ```
///
/// ## Direct field access
///
/// ```text
/// let mut opts = ParseOptions::default();
/// opts.dialect = Some(Dialect::MyHeritage);
/// opts.limits.max_level = 20;
/// ```
///
/// # Fields
///
/// - `encoding`: forced codec; `None` detects it from the BOM and `CHAR`
/// - `error_policy`: what to do with undecodable bytes
/// - `require_char`: fail when the header has no `CHAR` line
/// - `default_encoding`: codec for files without `CHAR` and for the
///   header before it
/// - `dialect`: forced dialect; `None` detects it from the header `SOUR`
/// - `limits`: security limits
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub encoding: Option<Codec>,
    pub error_policy: ErrorPolicy,
    pub require_char: bool,
    pub default_encoding: Codec,
    pub dialect: Option<Dialect>,
    /// Security limits.
    pub limits: Limits,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            encoding: None,
            error_policy: ErrorPolicy::Strict,
            require_char: false,
            default_encoding: Codec::default(),
            dialect: None,
            limits: Limits::default(),
        }
    }
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    ///
    /// # Examples
    ///
    /// ```text
    /// let opts = ParseOptions::builder()
    ///     .error_policy(ErrorPolicy::Ignore)
    ///     .build();
    /// ```
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of ParseOptions.
///
/// # Examples
///
/// ```text
/// let opts = ParseOptions::builder()
///     .default_encoding(Codec::Ascii)
///     .max_level(30)
///     .build();
///
/// // Using builder with defaults
/// let opts = ParseOptions::builder().build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    options: ParseOptions,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the source encoding, skipping BOM and `CHAR` detection.
    ///
    /// # Examples
    ///
    /// ```text
    /// ParseOptions::builder().encoding(Codec::utf8())
    /// ```
    pub fn encoding(mut self, codec: Codec) -> Self {
        self.options.encoding = Some(codec);
        self
    }

    /// Set the policy for bytes the codec cannot decode (default: strict).
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.options.error_policy = policy;
        self
    }

    /// Fail when the header has no `CHAR` line (default: false).
    pub fn require_char(mut self, require: bool) -> Self {
        self.options.require_char = require;
        self
    }

    /// Set the codec used before `CHAR` and when it is missing
    /// (default: ANSEL).
    pub fn default_encoding(mut self, codec: Codec) -> Self {
        self.options.default_encoding = codec;
        self
    }

    /// Force the producer dialect instead of reading it from `SOUR`.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.options.dialect = Some(dialect);
        self
    }

    /// Replace all security limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Set the maximum line length in bytes.
    ///
    /// # Parameters
    ///
    /// - `length`: Maximum line length in bytes (default: 1MB)
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.options.limits.max_line_length = length;
        self
    }

    /// Set the maximum level number (default: 99).
    pub fn max_level(mut self, level: usize) -> Self {
        self.options.limits.max_level = level;
        self
    }

    /// Set the maximum number of records (default: 10M).
    pub fn max_records(mut self, count: usize) -> Self {
        self.options.limits.max_records = count;
        self
    }

    /// Set the maximum merged value length in bytes (default: 10MB).
    pub fn max_value_length(mut self, length: usize) -> Self {
        self.options.limits.max_value_length = length;
        self
    }

    /// Build the ParseOptions.
    pub fn build(self) -> ParseOptions {
        self.options
    }
}

/// Parse a GEDCOM source into a [`Document`].
pub fn parse<R: Read + Seek>(source: R, options: &ParseOptions) -> GedResult<Document> {
    let mut reader = GedcomReader::new(source, options)?;
    let encoding = reader.encoding();
    let bom_len = reader.bom_len();
    let mut builder = TreeBuilder::new(options.limits);
    while let Some(line) = reader.next_record()? {
        builder.push(line)?;
    }
    let doc = builder.finish(encoding, bom_len, options.dialect);
    debug!(records = doc.len(), encoding = encoding.name(), "parsed document");
    Ok(doc)
}

/// Parse an in-memory GEDCOM file with default options.
///
/// ```rust
/// use gedcom_core::parse_bytes;
///
/// let doc = parse_bytes(b"0 HEAD\n1 CHAR ASCII\n0 @I1@ INDI\n1 NAME John /Smith/\n0 TRLR\n").unwrap();
/// let john = doc.lookup("@I1@").unwrap().as_individual().unwrap();
/// assert_eq!(john.name().surname(), "Smith");
/// ```
pub fn parse_bytes(bytes: &[u8]) -> GedResult<Document> {
    parse(Cursor::new(bytes), &ParseOptions::default())
}

/// Open and parse a GEDCOM file.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> GedResult<Document> {
    let path = path.as_ref();
    info!(path = %path.display(), "parsing GEDCOM file");
    let file = File::open(path)?;
    parse(BufReader::new(file), options)
}
