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

//! Cross-reference id registry.

use crate::document::NodeId;
use crate::error::{GedError, GedResult};
use std::collections::HashMap;

/// Maps level-0 xref ids to the records that define them.
#[derive(Debug, Clone, Default)]
pub struct XrefRegistry {
    entries: HashMap<String, (NodeId, usize)>,
}

impl XrefRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an xref id defined at `line`.
    pub fn register(&mut self, xref: &str, id: NodeId, line: usize) -> GedResult<()> {
        if let Some((_, prev_line)) = self.entries.get(xref) {
            return Err(GedError::collision(
                format!(
                    "duplicate xref id '{}', previously defined at line {}",
                    xref, prev_line
                ),
                line,
            ));
        }
        self.entries.insert(xref.to_string(), (id, line));
        Ok(())
    }

    /// Look up the record defining `xref`.
    pub fn get(&self, xref: &str) -> Option<NodeId> {
        self.entries.get(xref).map(|(id, _)| *id)
    }

    /// Line where `xref` was defined.
    pub fn line_of(&self, xref: &str) -> Option<usize> {
        self.entries.get(xref).map(|(_, line)| *line)
    }

    pub fn contains(&self, xref: &str) -> bool {
        self.entries.contains_key(xref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
