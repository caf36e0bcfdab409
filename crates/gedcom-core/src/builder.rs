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

//! Tree construction from logical lines.

use crate::document::{Document, Node, NodeId};
use crate::error::{GedError, GedResult};
use crate::limits::Limits;
use crate::line::GedcomLine;
use crate::name::Dialect;
use crate::registry::XrefRegistry;
use gedcom_codec::Codec;
use tracing::debug;

/// Builds the record tree from logical lines in file order.
///
/// The open record at each level sits on a stack; a line at level `n`
/// closes everything at level `n` and deeper and becomes a child of the
/// record at level `n - 1`.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    stack: Vec<NodeId>,
    xrefs: XrefRegistry,
    limits: Limits,
}

impl TreeBuilder {
    pub fn new(limits: Limits) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            stack: Vec::new(),
            xrefs: XrefRegistry::new(),
            limits,
        }
    }

    /// Attach one logical line to the tree.
    pub fn push(&mut self, line: GedcomLine) -> GedResult<()> {
        if self.nodes.len() >= self.limits.max_records {
            return Err(GedError::security(
                format!("too many records (max {})", self.limits.max_records),
                line.line,
            )
            .with_offset(line.offset));
        }
        if line.level > self.stack.len() {
            return Err(GedError::integrity(
                format!(
                    "record at level {} has no parent at level {}",
                    line.level,
                    line.level - 1
                ),
                line.line,
            )
            .with_offset(line.offset));
        }
        self.stack.truncate(line.level);

        let id = NodeId(self.nodes.len());
        let parent = self.stack.last().copied();
        if line.level == 0 {
            if let Some(xref) = &line.xref_id {
                self.xrefs.register(xref, id, line.line)?;
            }
        }
        self.nodes.push(Node::new(
            line.level,
            line.xref_id,
            line.tag,
            line.value,
            line.offset,
            line.line,
            parent,
        ));
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        self.stack.push(id);
        Ok(())
    }

    /// Close all open records and produce the document.
    ///
    /// The dialect comes from the header `SOUR` value unless `dialect`
    /// overrides it.
    pub fn finish(self, encoding: Codec, bom_len: usize, dialect: Option<Dialect>) -> Document {
        let detected = self
            .roots
            .first()
            .map(|id| &self.nodes[id.0])
            .filter(|node| node.tag == "HEAD")
            .and_then(|head| {
                head.children
                    .iter()
                    .map(|id| &self.nodes[id.0])
                    .find(|node| node.tag == "SOUR")
            })
            .and_then(|sour| sour.value.as_deref())
            .map(Dialect::from_source)
            .unwrap_or_default();
        let dialect = dialect.unwrap_or(detected);

        debug!(
            records = self.roots.len(),
            nodes = self.nodes.len(),
            xrefs = self.xrefs.len(),
            %dialect,
            "built document"
        );

        Document {
            nodes: self.nodes,
            roots: self.roots,
            xrefs: self.xrefs,
            encoding,
            bom_len,
            dialect,
        }
    }
}
