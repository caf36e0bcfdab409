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

//! Property-based tests for the line reader.

use gedcom_codec::LineReader;
use proptest::prelude::*;
use std::io::Cursor;

fn terminator() -> impl Strategy<Value = &'static [u8]> {
    prop::sample::select(vec![&b"\n"[..], &b"\r\n"[..], &b"\r"[..]])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: a CR directly followed by LF ends one line, not a line and
    /// an empty one.
    #[test]
    fn prop_cr_then_empty_line_is_one_terminator(line in "[ -~]{0,30}") {
        let data = format!("{}\r\n", line);
        let read: Vec<_> = LineReader::new(Cursor::new(data.into_bytes()))
            .map(|l| l.unwrap())
            .collect();
        prop_assert_eq!(read.len(), 1);
        prop_assert_eq!(&read[0].bytes[..], line.as_bytes());
    }

    /// Property: joining lines with any terminators and splitting again
    /// gives back the lines, with offsets pointing at each line start.
    #[test]
    fn prop_lines_and_offsets(
        lines in prop::collection::vec("[ -~]{0,30}", 1..30),
        terminators in prop::collection::vec(terminator(), 30),
    ) {
        let mut data = Vec::new();
        let mut starts = Vec::new();
        for (i, (line, term)) in lines.iter().zip(&terminators).enumerate() {
            starts.push(data.len() as u64);
            data.extend_from_slice(line.as_bytes());
            // a lone CR before an empty LF-terminated line would read as CRLF
            let next_empty = lines.get(i + 1).map_or(false, |next| next.is_empty());
            if *term == b"\r" && next_empty {
                data.extend_from_slice(b"\r\n");
            } else {
                data.extend_from_slice(term);
            }
        }

        let read: Vec<_> = LineReader::new(Cursor::new(data)).map(|l| l.unwrap()).collect();
        prop_assert_eq!(read.len(), lines.len());
        for (i, raw) in read.iter().enumerate() {
            prop_assert_eq!(raw.number, i + 1);
            prop_assert_eq!(raw.offset, starts[i]);
            prop_assert_eq!(&raw.bytes[..], lines[i].as_bytes());
        }
    }
}
