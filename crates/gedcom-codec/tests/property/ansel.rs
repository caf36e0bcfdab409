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

//! Property-based tests for the ANSEL codec.

use gedcom_codec::ansel::{decode, encode, AnselVariant};
use gedcom_codec::ErrorPolicy;
use proptest::prelude::*;
use unicode_normalization::UnicodeNormalization;

/// Characters ANSEL can express, precomposed or via diacritics.
fn ansel_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range(' ', '~'),
        prop::sample::select(vec![
            'é', 'è', 'ê', 'ë', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'ñ', 'ó', 'ö', 'ô', 'ü',
            'ú', 'ý', 'ž', 'š', 'č', 'ř', 'ń', 'ś', 'ź', 'ż', 'ő', 'ű', 'Á', 'É', 'Ö', 'Ü',
            'Ł', 'ł', 'Ø', 'ø', 'Æ', 'æ', 'Œ', 'œ', 'Đ', 'đ', 'Þ', 'þ', 'ð', 'ı', '£', '°',
            'ß', '■', '□', '¯',
        ]),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: encoding then decoding gives back the NFC text.
    #[test]
    fn prop_round_trip(chars in prop::collection::vec(ansel_char(), 0..40)) {
        let text: String = chars.into_iter().collect();
        let bytes = encode(&text, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap();
        let back = decode(&bytes, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap();
        prop_assert_eq!(back, text);
    }

    /// Property: decoded text is already composed.
    #[test]
    fn prop_decoded_text_is_nfc(chars in prop::collection::vec(ansel_char(), 0..40)) {
        let text: String = chars.into_iter().collect();
        let bytes = encode(&text, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap();
        let decoded = decode(&bytes, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap();
        let recomposed: String = decoded.nfc().collect();
        prop_assert_eq!(recomposed, decoded);
    }

    /// Property: decomposed input encodes to the same bytes as composed input.
    #[test]
    fn prop_nfd_input_encodes_like_nfc(chars in prop::collection::vec(ansel_char(), 0..40)) {
        let text: String = chars.into_iter().collect();
        let nfd: String = text.nfd().collect();
        prop_assert_eq!(
            encode(&nfd, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap(),
            encode(&text, AnselVariant::Gedcom, ErrorPolicy::Strict).unwrap()
        );
    }

    /// Property: lenient policies accept any byte string.
    #[test]
    fn prop_lenient_decode_is_total(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        prop_assert!(decode(&bytes, AnselVariant::Standard, ErrorPolicy::Replace).is_ok());
        prop_assert!(decode(&bytes, AnselVariant::Gedcom, ErrorPolicy::Ignore).is_ok());
    }

    /// Property: strict failures point inside the input.
    #[test]
    fn prop_strict_error_offset_in_bounds(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        if let Err(err) = decode(&bytes, AnselVariant::Gedcom, ErrorPolicy::Strict) {
            let offset = err.offset().unwrap();
            prop_assert!((offset as usize) < bytes.len());
        }
    }
}
