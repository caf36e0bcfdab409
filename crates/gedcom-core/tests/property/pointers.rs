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

//! Property-based tests for cross-reference resolution.

use gedcom_core::{parse_bytes, SubTag};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: a pointer resolves to exactly the record registered under
    /// its id, wherever that record sits in the file, and to an unresolved
    /// outcome when the id is never defined.
    #[test]
    fn prop_pointer_resolution(
        count in 1usize..20,
        targets in prop::collection::vec(0usize..40, 1..20),
    ) {
        let mut text = String::from("0 HEAD\n");
        for i in 0..count {
            text.push_str(&format!("0 @I{}@ INDI\n", i));
            if let Some(target) = targets.get(i) {
                text.push_str(&format!("1 ASSO @I{}@\n", target));
            }
        }
        text.push_str("0 TRLR\n");
        let doc = parse_bytes(text.as_bytes()).unwrap();
        prop_assert_eq!(doc.xrefs().len(), count);

        for i in 0..count.min(targets.len()) {
            let source = doc.lookup(&format!("@I{}@", i)).unwrap();
            let target_id = format!("@I{}@", targets[i]);
            match source.sub_tag("ASSO", true) {
                SubTag::Found(record) => {
                    prop_assert!(targets[i] < count);
                    prop_assert_eq!(record.xref_id(), Some(target_id.as_str()));
                    prop_assert_eq!(Some(record), doc.lookup(&target_id));
                }
                SubTag::Unresolved(pointer) => {
                    prop_assert!(targets[i] >= count);
                    prop_assert_eq!(pointer.target_id(), target_id.as_str());
                }
                SubTag::Absent => prop_assert!(false, "ASSO sub-record missing"),
            }
        }
    }
}
