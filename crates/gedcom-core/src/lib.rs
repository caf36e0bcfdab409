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

//! GEDCOM 5.5.1 parser.
//!
//! Parsing turns a byte source into a [`Document`]: a tree of records in
//! file order with an index of the cross-reference ids defined at level 0.
//!
//! # Pipeline
//!
//! 1. The encoding is resolved from the byte-order mark and the header
//!    `CHAR` line (see `gedcom_codec`).
//! 2. [`GedcomReader`] splits the source into lines, lexes them, merges
//!    `CONC`/`CONT` continuations and decodes the values.
//! 3. [`TreeBuilder`] nests the lines by level and registers xref ids.
//!
//! # Records
//!
//! A [`Record`] is a copyable view into the document. Its specialized
//! variants ([`Individual`], [`NameRecord`], [`DateRecord`], [`Pointer`])
//! add accessors without adding storage. Pointers hold only the id of their
//! target and resolve through the document on each access, so a missing
//! target is a `None` rather than a parse failure.
//!
//! ```rust
//! use gedcom_core::{parse_bytes, SubTag};
//!
//! let doc = parse_bytes(
//!     b"0 HEAD\n1 CHAR ASCII\n0 @I1@ INDI\n1 NAME John /Smith/\n1 FAMC @F9@\n0 TRLR\n",
//! )
//! .unwrap();
//!
//! let john = doc.lookup("@I1@").unwrap();
//! let name = john.as_individual().unwrap().name();
//! assert_eq!((name.first().as_str(), name.surname()), ("John", "Smith"));
//!
//! // @F9@ is never defined
//! assert!(matches!(john.sub_tag("FAMC", true), SubTag::Unresolved(_)));
//! ```

mod builder;
mod document;
mod error;
mod limits;
mod line;
mod name;
mod parser;
mod reader;
mod record;
mod registry;
pub mod traverse;

pub use builder::TreeBuilder;
pub use document::{Document, NodeId};
pub use error::{GedError, GedErrorKind, GedResult};
pub use limits::Limits;
pub use line::{is_pointer, GedcomLine};
pub use name::{split_name, Dialect, Name, NameOrder, NameParts};
pub use parser::{parse, parse_bytes, parse_file, ParseOptions, ParseOptionsBuilder};
pub use reader::GedcomReader;
pub use record::{
    DateRecord, Individual, NameRecord, Pointer, Record, RecordKind, Specialized, SubTag,
};
pub use registry::XrefRegistry;
pub use traverse::{traverse, DocumentVisitor, StatsCollector, VisitorContext};

pub use gedcom_codec::{Codec, ErrorPolicy};
pub use gedcom_date::DateValue;
