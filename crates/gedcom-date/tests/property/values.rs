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

//! Property-based tests for date values.

use gedcom_date::{DateValue, DateValueKind, MONTHS_FRENCH, MONTHS_GREGORIAN, MONTHS_HEBREW};
use proptest::prelude::*;
use std::cmp::Ordering;

/// Canonical `<DATE>` text in one of the four convertible calendars.
fn calendar_date() -> impl Strategy<Value = String> {
    (
        0..4usize,
        1..3000u32,
        prop::option::of(0..12usize),
        prop::option::of(1..=28u32),
        any::<bool>(),
    )
        .prop_map(|(calendar, year, month, day, bc)| {
            let (escape, months) = match calendar {
                0 => ("", &MONTHS_GREGORIAN[..]),
                1 => ("@#DJULIAN@ ", &MONTHS_GREGORIAN[..]),
                2 => ("@#DHEBREW@ ", &MONTHS_HEBREW[..]),
                _ => ("@#DFRENCH R@ ", &MONTHS_FRENCH[..]),
            };
            let mut text = escape.to_string();
            if let Some(month) = month {
                if let Some(day) = day {
                    text.push_str(&format!("{} ", day));
                }
                text.push_str(months[month]);
                text.push(' ');
            }
            text.push_str(&year.to_string());
            if bc && calendar < 2 {
                text.push_str(" B.C.");
            }
            text
        })
}

/// Canonical `DATE` value text of any kind.
fn date_value() -> impl Strategy<Value = String> {
    prop_oneof![
        calendar_date(),
        (
            prop::sample::select(vec!["FROM", "TO", "BEF", "AFT", "ABT", "CAL", "EST"]),
            calendar_date()
        )
            .prop_map(|(keyword, date)| format!("{} {}", keyword, date)),
        (calendar_date(), calendar_date()).prop_map(|(a, b)| format!("FROM {} TO {}", a, b)),
        (calendar_date(), calendar_date()).prop_map(|(a, b)| format!("BET {} AND {}", a, b)),
        (calendar_date(), "[a-z ]{1,20}").prop_map(|(d, p)| format!("INT {} ({})", d, p)),
        "[a-z ]{1,20}".prop_map(|p| format!("({})", p)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: parsing never fails, and text outside the grammar comes
    /// back verbatim as a phrase.
    #[test]
    fn prop_parse_is_total(text in "\\PC{0,40}") {
        let value = DateValue::parse(&text);
        let trimmed = text.trim();
        if value.kind() == DateValueKind::Phrase && !trimmed.starts_with('(') {
            if trimmed.is_empty() {
                prop_assert_eq!(value.phrase(), None);
            } else {
                prop_assert_eq!(value.phrase(), Some(trimmed));
            }
        }
    }

    /// Property: canonical text parses to a structured value and formats
    /// back to itself.
    #[test]
    fn prop_format_round_trip(text in date_value()) {
        let value = DateValue::parse(&text);
        if !text.starts_with('(') {
            prop_assert_ne!(value.kind(), DateValueKind::Phrase, "{}", text);
        }
        prop_assert_eq!(value.to_string(), text.clone());
        prop_assert_eq!(DateValue::parse(&value.to_string()), value);
    }

    /// Property: ordering is antisymmetric and agrees with equality.
    #[test]
    fn prop_ordering_antisymmetric(a in date_value(), b in date_value()) {
        let a = DateValue::parse(&a);
        let b = DateValue::parse(&b);
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    }

    /// Property: ordering is transitive across mixed kinds.
    #[test]
    fn prop_ordering_transitive(a in date_value(), b in date_value(), c in date_value()) {
        let mut values = [DateValue::parse(&a), DateValue::parse(&b), DateValue::parse(&c)];
        values.sort();
        prop_assert!(values[0] <= values[1]);
        prop_assert!(values[1] <= values[2]);
        prop_assert!(values[0] <= values[2]);
    }

    /// Property: the key pair decides the order when it differs.
    #[test]
    fn prop_key_pair_leads(a in date_value(), b in date_value()) {
        let a = DateValue::parse(&a);
        let b = DateValue::parse(&b);
        if a.key() != b.key() {
            prop_assert_eq!(a.cmp(&b), a.key().cmp(&b.key()));
        }
    }
}
