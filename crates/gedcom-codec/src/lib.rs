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

//! Character sets for GEDCOM files.
//!
//! This crate answers two questions about a GEDCOM byte source: which
//! character set it is written in, and how to turn its bytes into text.
//!
//! # Codecs
//!
//! [`Codec`] covers everything a GEDCOM producer has been seen to write:
//!
//! - ANSEL in its plain and GEDCOM-extended forms ([`ansel`]), with
//!   diacritics reordered and composed to NFC on the way in
//! - strict 7-bit ASCII
//! - the DOS code pages 437 and 850
//! - UTF-8, UTF-16 and the rest of the WHATWG registry via `encoding_rs`
//!
//! Undecodable bytes are handled per [`ErrorPolicy`].
//!
//! # Resolution
//!
//! [`resolve`] looks at the byte-order mark and the header `CHAR` line and
//! returns a [`ResolvedEncoding`] telling which codec applies at each byte
//! offset. [`LineReader`] splits the source into raw byte lines whose
//! offsets line up with that answer.
//!
//! ```rust
//! use gedcom_codec::{resolve, ErrorPolicy, LineReader, ResolveOptions};
//! use std::io::Cursor;
//!
//! let data = b"0 HEAD\n1 CHAR ANSEL\n0 @I1@ INDI\n1 NAME Fran\xf0cois /Lef\xe1evre/\n".to_vec();
//! let mut source = Cursor::new(data);
//! let resolved = resolve(&mut source, &ResolveOptions::default()).unwrap();
//!
//! let names: Vec<String> = LineReader::new(source)
//!     .map(|line| {
//!         let line = line.unwrap();
//!         resolved
//!             .codec_at(line.offset)
//!             .decode(&line.bytes, ErrorPolicy::Strict)
//!             .unwrap()
//!     })
//!     .collect();
//! assert_eq!(names[3], "1 NAME Fran\u{00e7}ois /Lef\u{00e8}vre/");
//! ```

pub mod ansel;
mod codec;
mod codepage;
mod error;
mod lines;
mod resolver;

pub use ansel::AnselVariant;
pub use codec::{Codec, ErrorPolicy};
pub use codepage::CodePage;
pub use error::{CodecError, CodecResult};
pub use lines::{LineReader, RawLine};
pub use resolver::{charset, resolve, Bom, Legality, ResolveOptions, ResolvedEncoding};
