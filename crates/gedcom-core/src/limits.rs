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

//! Security limits for GEDCOM parsing.

/// Configurable limits for parser security.
///
/// These limits bound the memory a hostile or broken file can make the
/// parser allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum physical line length in bytes (default: 1MB).
    pub max_line_length: usize,
    /// Maximum level number (default: 99).
    pub max_level: usize,
    /// Maximum number of records in the tree (default: 10M).
    pub max_records: usize,
    /// Maximum value length in bytes after CONC/CONT merging (default: 10MB).
    pub max_value_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_length: 1024 * 1024,        // 1MB
            max_level: 99,
            max_records: 10_000_000,             // 10M
            max_value_length: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_line_length: usize::MAX,
            max_level: usize::MAX,
            max_records: usize::MAX,
            max_value_length: usize::MAX,
        }
    }
}
