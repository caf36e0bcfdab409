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

//! Depth-first traversal of a parsed document.
//!
//! The visitor pattern separates walking the record tree from what is done
//! with each record. Implement [`DocumentVisitor`] and hand it to
//! [`traverse`].
//!
//! # Example
//!
//! ```text
//! use gedcom_core::traverse::{traverse, DocumentVisitor, VisitorContext};
//!
//! struct NoteCounter { notes: usize }
//!
//! impl DocumentVisitor for NoteCounter {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_record(&mut self, record: Record<'_>, _ctx: &VisitorContext) -> Result<(), Self::Error> {
//!         if record.tag() == "NOTE" {
//!             self.notes += 1;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut counter = NoteCounter { notes: 0 };
//! traverse(&doc, &mut counter)?;
//! ```

use crate::document::Document;
use crate::record::Record;
use std::collections::BTreeMap;

/// Context provided to visitors during traversal.
#[derive(Debug, Clone)]
pub struct VisitorContext<'a> {
    /// Current nesting depth (0 = level-0 records).
    pub depth: usize,
    /// Tags from the level-0 record down to the current record's parent.
    pub path: Vec<&'a str>,
    /// Reference to the document being traversed.
    pub document: &'a Document,
}

impl<'a> VisitorContext<'a> {
    /// Create a new context for the root level.
    pub fn new(document: &'a Document) -> Self {
        Self {
            depth: 0,
            path: Vec::new(),
            document,
        }
    }

    /// Create a child context with incremented depth.
    pub fn child(&self, tag: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(tag);
        Self {
            depth: self.depth + 1,
            path,
            document: self.document,
        }
    }

    /// Get the current path as a string (for error messages).
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path.join("/")
        }
    }
}

/// Trait for visiting the records of a document.
///
/// Only [`visit_record`](Self::visit_record) is required; the other hooks
/// default to doing nothing.
pub trait DocumentVisitor {
    /// Error type returned by visitor methods.
    type Error;

    /// Called at the start of document traversal.
    fn begin_document(
        &mut self,
        _doc: &Document,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called at the end of document traversal.
    fn end_document(&mut self, _doc: &Document, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for every record, parents before children.
    fn visit_record(&mut self, record: Record<'_>, ctx: &VisitorContext) -> Result<(), Self::Error>;

    /// Called before the sub-records of a record that has any.
    fn begin_children(
        &mut self,
        _record: Record<'_>,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the sub-records of a record that has any.
    fn end_children(
        &mut self,
        _record: Record<'_>,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Traverse a document, calling visitor methods for each record.
///
/// Pointers are not followed, so every record is visited exactly once.
pub fn traverse<V: DocumentVisitor>(doc: &Document, visitor: &mut V) -> Result<(), V::Error> {
    let ctx = VisitorContext::new(doc);
    visitor.begin_document(doc, &ctx)?;

    for record in doc.records0(None) {
        traverse_record(record, visitor, &ctx)?;
    }

    visitor.end_document(doc, &ctx)?;
    Ok(())
}

fn traverse_record<'d, V: DocumentVisitor>(
    record: Record<'d>,
    visitor: &mut V,
    ctx: &VisitorContext<'d>,
) -> Result<(), V::Error> {
    visitor.visit_record(record, ctx)?;

    let mut children = record.sub_records().peekable();
    if children.peek().is_some() {
        visitor.begin_children(record, ctx)?;
        let child_ctx = ctx.child(record.tag());
        for child in children {
            traverse_record(child, visitor, &child_ctx)?;
        }
        visitor.end_children(record, ctx)?;
    }

    Ok(())
}

/// Statistics collector visitor for testing and analysis.
#[derive(Debug, Default)]
pub struct StatsCollector {
    /// Number of records visited.
    pub record_count: usize,
    /// Number of pointer records visited.
    pub pointer_count: usize,
    /// Maximum depth reached.
    pub max_depth: usize,
    /// Records seen per tag.
    pub tag_counts: BTreeMap<String, usize>,
}

impl DocumentVisitor for StatsCollector {
    type Error = std::convert::Infallible;

    fn visit_record(
        &mut self,
        record: Record<'_>,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        self.record_count += 1;
        if record.is_pointer() {
            self.pointer_count += 1;
        }
        self.max_depth = self.max_depth.max(ctx.depth);
        *self.tag_counts.entry(record.tag().to_string()).or_insert(0) += 1;
        Ok(())
    }
}
