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

//! Property-based tests for tree construction.

use gedcom_core::{parse_bytes, traverse, DocumentVisitor, GedErrorKind, Record, VisitorContext};
use proptest::prelude::*;

/// Levels where each one is at most one deeper than the previous and the
/// first is 0.
fn levels() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 1..40).prop_map(|steps| {
        let mut out = Vec::with_capacity(steps.len());
        let mut prev = 0usize;
        for (i, step) in steps.into_iter().enumerate() {
            let level = if i == 0 { 0 } else { step.min(prev + 1) };
            out.push(level);
            prev = level;
        }
        out
    })
}

struct TagOrder {
    tags: Vec<(usize, String)>,
}

impl DocumentVisitor for TagOrder {
    type Error = std::convert::Infallible;

    fn visit_record(
        &mut self,
        record: Record<'_>,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        assert_eq!(record.level(), ctx.depth);
        self.tags.push((record.level(), record.tag().to_string()));
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: every well-nested line becomes exactly one record, children
    /// sit one level below their parent and a depth-first walk gives back
    /// file order.
    #[test]
    fn prop_nesting_preserved(levels in levels()) {
        let mut text = String::new();
        for (i, level) in levels.iter().enumerate() {
            text.push_str(&format!("{} T{}\n", level, i));
        }
        let doc = parse_bytes(text.as_bytes()).unwrap();
        prop_assert_eq!(doc.record_count(), levels.len());
        prop_assert_eq!(doc.len(), levels.iter().filter(|l| **l == 0).count());

        let mut order = TagOrder { tags: Vec::new() };
        traverse(&doc, &mut order).unwrap();
        let expected: Vec<(usize, String)> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| (*level, format!("T{}", i)))
            .collect();
        prop_assert_eq!(order.tags, expected);

        for record in doc.records0(None) {
            prop_assert!(record.parent().is_none());
            for child in record.sub_records() {
                prop_assert_eq!(child.parent(), Some(record));
            }
        }
    }

    /// Property: a line more than one level deeper than its predecessor is
    /// an integrity error reported at that line.
    #[test]
    fn prop_level_jump_rejected(levels in levels(), jump in 2usize..5) {
        let last = *levels.last().unwrap();
        let mut text = String::new();
        for level in &levels {
            text.push_str(&format!("{} TAG\n", level));
        }
        text.push_str(&format!("{} BAD\n", last + jump));
        let err = parse_bytes(text.as_bytes()).unwrap_err();
        prop_assert_eq!(err.kind, GedErrorKind::Integrity);
        prop_assert_eq!(err.line, levels.len() + 1);
    }

    /// Property: splitting a value over CONC lines at any points gives the
    /// same value as writing it on one line.
    #[test]
    fn prop_conc_split_points(
        value in "[A-Za-z0-9 ,.]{1,60}",
        cuts in prop::collection::vec(0usize..60, 0..5),
    ) {
        let value = value.trim().to_string();
        prop_assume!(!value.is_empty());
        let mut points: Vec<usize> =
            cuts.into_iter().filter(|c| *c > 0 && *c < value.len()).collect();
        points.sort_unstable();
        points.dedup();

        let mut text = String::from("0 NOTE ");
        let mut start = 0;
        for point in points.iter().chain(std::iter::once(&value.len())) {
            text.push_str(&value[start..*point]);
            text.push('\n');
            if *point < value.len() {
                text.push_str("1 CONC ");
            }
            start = *point;
        }
        let doc = parse_bytes(text.as_bytes()).unwrap();
        let note = doc.records0(None).next().unwrap();
        prop_assert_eq!(note.value(), Some(value.as_str()));
        prop_assert_eq!(doc.record_count(), 1);
    }
}
