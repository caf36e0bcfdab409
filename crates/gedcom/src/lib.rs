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

//! # GEDCOM - Genealogical Data Communication
//!
//! A reader for GEDCOM 5.5.1 files as they are found in the wild: ANSEL,
//! legacy code pages and UTF-16 sources, lines split with `CONC`/`CONT`,
//! dangling pointers, and the name conventions of the common genealogy
//! programs.
//!
//! ## Quick Start
//!
//! ```rust
//! use gedcom::{parse, SubTag};
//!
//! let ged = b"0 HEAD
//! 1 SOUR PAF
//! 1 CHAR ANSEL
//! 0 @I1@ INDI
//! 1 NAME John /Smith/
//! 1 BIRT
//! 2 DATE ABT 1850
//! 1 FAMC @F1@
//! 0 @I2@ INDI
//! 1 NAME Mary /Jones/
//! 1 SEX F
//! 0 @F1@ FAM
//! 1 WIFE @I2@
//! 0 TRLR
//! ";
//!
//! let doc = parse(ged).expect("Failed to parse");
//! let john = doc.lookup("@I1@").unwrap().as_individual().unwrap();
//!
//! assert_eq!(john.name().format(), "John Smith");
//! assert_eq!(john.birth_date().unwrap().to_string(), "ABT 1850");
//! assert_eq!(john.mother().unwrap().name().surname(), "Jones");
//! assert!(john.father().is_none());
//!
//! // Lookups report whether a pointer on the way could not be resolved
//! assert!(matches!(john.sub_tag("FAMC/HUSB", true), SubTag::Absent));
//! ```
//!
//! ## Features
//!
//! - **Encoding detection**: byte-order marks and the header `CHAR` line,
//!   with ANSEL, ASCII, UTF-8, UTF-16 and the usual legacy code pages
//! - **Continuations**: `CONC`/`CONT` lines are merged into their owner
//! - **Lazy pointers**: `@I1@` values resolve through the xref index on
//!   access, so forward references and cycles are fine
//! - **Dialects**: MyHeritage, Altree and Ancestris name conventions
//! - **Dates**: all `DATE` value forms in the Gregorian, Julian, Hebrew
//!   and French Republican calendars, ordered by Julian day number
//! - **Security limits**: line, level, record and value size caps
//!
//! ## Modules
//!
//! - [`codec`]: character set resolution and the ANSEL codec
//! - [`date`]: date values and calendars
//! - [`traverse`]: depth-first document visitors

// Re-export core types
pub use gedcom_core::{
    // Functions
    is_pointer,
    parse as core_parse,
    parse_file,
    split_name,
    // Main types
    DateRecord,
    Dialect,
    Document,
    // Errors
    GedError,
    GedErrorKind,
    GedResult,
    GedcomLine,
    GedcomReader,
    Individual,
    // Parser
    Limits,
    Name,
    NameOrder,
    NameParts,
    NameRecord,
    NodeId,
    ParseOptions,
    ParseOptionsBuilder,
    Pointer,
    Record,
    RecordKind,
    Specialized,
    SubTag,
    TreeBuilder,
    XrefRegistry,
};

// Error handling extensions
mod error_ext;
pub use error_ext::GedResultExt;

// Re-export codec utilities
pub mod codec {
    //! Character set resolution and decoding
    pub use gedcom_codec::{
        ansel, charset, resolve, AnselVariant, Bom, CodePage, Codec, CodecError, CodecResult,
        ErrorPolicy, Legality, LineReader, RawLine, ResolveOptions, ResolvedEncoding,
    };
}

// Re-export date utilities
pub mod date {
    //! Date values, calendars and formatters
    pub use gedcom_date::{
        end_of_time, jdn, start_of_time, visitor, Calendar, CalendarDate, CalendarDateVisitor,
        DateError, DateKey, DateResult, DateValue, DateValueKind, DateValueVisitor,
        DescriptiveFormatter, GedcomFormatter, MONTHS_FRENCH, MONTHS_GREGORIAN, MONTHS_HEBREW,
    };
}

// Re-export traversal
pub mod traverse {
    //! Depth-first document traversal
    pub use gedcom_core::traverse::{traverse, DocumentVisitor, StatsCollector, VisitorContext};
}

pub use codec::{Codec, ErrorPolicy};
pub use date::DateValue;

use std::io::Cursor;
use std::path::Path;

/// Parse an in-memory GEDCOM file with default options.
///
/// The encoding is detected from the byte-order mark and the header `CHAR`
/// line; files without either are read as ANSEL.
///
/// # Examples
///
/// ```rust
/// use gedcom::parse;
///
/// let doc = parse(b"0 HEAD\n1 CHAR UTF-8\n0 @N1@ NOTE First\n1 CONT Second\n0 TRLR\n").unwrap();
/// assert_eq!(doc.lookup("@N1@").unwrap().value(), Some("First\nSecond"));
/// ```
#[inline]
pub fn parse(input: &[u8]) -> GedResult<Document> {
    parse_with(input, &ParseOptions::default())
}

/// Parse an in-memory GEDCOM file with explicit options.
///
/// # Examples
///
/// ```rust
/// use gedcom::{parse_with, ErrorPolicy, ParseOptions};
///
/// let options = ParseOptions::builder()
///     .error_policy(ErrorPolicy::Replace)
///     .build();
/// let doc = parse_with(b"0 HEAD\n1 CHAR ASCII\n0 NOTE Caf\xe9\n0 TRLR\n", &options).unwrap();
/// assert_eq!(doc.records0(Some("NOTE")).next().unwrap().value(), Some("Caf\u{fffd}"));
/// ```
#[inline]
pub fn parse_with(input: &[u8], options: &ParseOptions) -> GedResult<Document> {
    core_parse(Cursor::new(input), options)
}

/// Open and parse a GEDCOM file with default options.
pub fn open(path: impl AsRef<Path>) -> GedResult<Document> {
    parse_file(path, &ParseOptions::default())
}

/// Parse a `DATE` value.
///
/// Text that is not a recognized date becomes a phrase, so this never
/// fails.
///
/// # Examples
///
/// ```rust
/// use gedcom::parse_date;
///
/// let early = parse_date("BEF 1799");
/// let late = parse_date("@#DJULIAN@ 1 JAN 1800");
/// assert!(early.key().1 < late.key().0);
/// ```
#[inline]
pub fn parse_date(text: &str) -> DateValue {
    DateValue::parse(text)
}

/// Validate a GEDCOM file without keeping the parsed document.
///
/// Returns `Ok(())` if valid, `Err` with details if invalid.
#[inline]
pub fn validate(input: &[u8]) -> GedResult<()> {
    parse(input).map(|_| ())
}

/// GEDCOM version supported by this library.
pub const SUPPORTED_VERSION: &str = "5.5.1";

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
