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

//! Parsed GEDCOM document.
//!
//! Records live in one arena owned by the [`Document`]. Parent and child
//! links and pointer targets are [`NodeId`] indices into that arena, so a
//! record never owns another record and cyclic pointer graphs cost nothing.

use crate::name::{Dialect, NameParts};
use crate::record::Record;
use crate::registry::XrefRegistry;
use gedcom_codec::Codec;
use gedcom_date::DateValue;
use once_cell::sync::OnceCell;

/// Index of a record in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in file order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Storage for one record.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) level: usize,
    pub(crate) xref_id: Option<String>,
    pub(crate) tag: String,
    pub(crate) value: Option<String>,
    pub(crate) offset: u64,
    pub(crate) line: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) date: OnceCell<DateValue>,
    pub(crate) name: OnceCell<NameParts>,
}

impl Node {
    pub(crate) fn new(
        level: usize,
        xref_id: Option<String>,
        tag: String,
        value: Option<String>,
        offset: u64,
        line: usize,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            level,
            xref_id,
            tag,
            value,
            offset,
            line,
            parent,
            children: Vec::new(),
            date: OnceCell::new(),
            name: OnceCell::new(),
        }
    }
}

/// A parsed GEDCOM file: the level-0 records with their subtrees, the xref
/// index and what was learnt about the source while reading it.
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) xrefs: XrefRegistry,
    pub(crate) encoding: Codec,
    pub(crate) bom_len: usize,
    pub(crate) dialect: Dialect,
}

impl Document {
    /// The resolved encoding of the file body.
    pub fn encoding(&self) -> Codec {
        self.encoding
    }

    /// Number of BOM bytes at the start of the source.
    pub fn bom_len(&self) -> usize {
        self.bom_len
    }

    /// Producer dialect, from the header `SOUR` record unless overridden.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The `HEAD` record, if it is the first record of the file.
    pub fn header(&self) -> Option<Record<'_>> {
        self.roots
            .first()
            .map(|&id| Record::new(self, id))
            .filter(|r| r.tag() == "HEAD")
    }

    /// Level-0 records in file order, optionally only those with `tag`.
    pub fn records0<'d>(&'d self, tag: Option<&'d str>) -> impl Iterator<Item = Record<'d>> + 'd {
        self.roots
            .iter()
            .map(move |&id| Record::new(self, id))
            .filter(move |r| tag.map_or(true, |t| r.tag() == t))
    }

    /// Offset and tag of every level-0 record, in file order.
    pub fn index0(&self) -> impl Iterator<Item = (u64, &str)> + '_ {
        self.roots.iter().map(move |&id| {
            let node = &self.nodes[id.0];
            (node.offset, node.tag.as_str())
        })
    }

    /// Offset and tag of the level-0 record defining `xref`.
    pub fn xref0(&self, xref: &str) -> Option<(u64, &str)> {
        self.xrefs.get(xref).map(|id| {
            let node = &self.nodes[id.0];
            (node.offset, node.tag.as_str())
        })
    }

    /// The level-0 record starting at `offset`.
    pub fn record_at_offset(&self, offset: u64) -> Option<Record<'_>> {
        self.roots
            .binary_search_by_key(&offset, |id| self.nodes[id.0].offset)
            .ok()
            .map(|pos| Record::new(self, self.roots[pos]))
    }

    /// The level-0 record defining `xref`.
    pub fn lookup(&self, xref: &str) -> Option<Record<'_>> {
        self.xrefs.get(xref).map(|id| Record::new(self, id))
    }

    /// Record by arena index.
    pub fn record(&self, id: NodeId) -> Option<Record<'_>> {
        (id.0 < self.nodes.len()).then(|| Record::new(self, id))
    }

    /// The xref registry.
    pub fn xrefs(&self) -> &XrefRegistry {
        &self.xrefs
    }

    /// Number of level-0 records.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of records at every level.
    pub fn record_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
