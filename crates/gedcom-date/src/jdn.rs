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

//! Julian Day Number arithmetic.
//!
//! Every calendar date is reduced to an integer Julian Day Number (the day
//! that starts at noon of the given date), which gives dates from different
//! calendars a common scale. Years are astronomical where a calendar has a
//! year zero question: 1 B.C. is year 0, 2 B.C. is year -1.
//!
//! All functions accept out-of-range fields and extrapolate; none of them
//! panic for any `i64` year a GEDCOM file can hold.

/// JDN of 1 Tishri AM 1, minus the offset the new-year delays are
/// measured from.
const HEBREW_EPOCH: i64 = 347_996;

/// JDN of 1 Vendémiaire an I (22 September 1792).
const FRENCH_EPOCH: i64 = 2_375_840;

/// JDN of a proleptic Gregorian date.
pub fn gregorian_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Gregorian `(year, month, day)` for a JDN.
pub fn jdn_to_gregorian(jdn: i64) -> (i64, i64, i64) {
    let a = jdn + 32044;
    let b = (4 * a + 3).div_euclid(146_097);
    let c = a - (146_097 * b).div_euclid(4);
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);
    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    let year = 100 * b + d - 4800 + m.div_euclid(10);
    (year, month, day)
}

/// JDN of a proleptic Julian date.
pub fn julian_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32083
}

/// Hebrew leap years have thirteen months.
pub fn hebrew_is_leap(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

/// Number of months in a Hebrew year.
pub fn hebrew_months_in_year(year: i64) -> i64 {
    if hebrew_is_leap(year) {
        13
    } else {
        12
    }
}

fn hebrew_delay_1(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let mut day = months * 29 + parts.div_euclid(25_920);
    if (3 * (day + 1)).rem_euclid(7) < 3 {
        day += 1;
    }
    day
}

fn hebrew_delay_2(year: i64) -> i64 {
    let last = hebrew_delay_1(year - 1);
    let present = hebrew_delay_1(year);
    let next = hebrew_delay_1(year + 1);
    if next - present == 356 {
        2
    } else if present - last == 382 {
        1
    } else {
        0
    }
}

/// Number of days in a Hebrew year.
pub fn hebrew_days_in_year(year: i64) -> i64 {
    hebrew_to_jdn(year + 1, 7, 1) - hebrew_to_jdn(year, 7, 1)
}

/// Number of days in a Hebrew month.
///
/// Months are numbered from Nisan (1) as in the Bible; Tishri is 7, Adar
/// is 12 and Adar II is 13.
pub fn hebrew_days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 | 4 | 6 | 10 | 13 => 29,
        12 if !hebrew_is_leap(year) => 29,
        8 if hebrew_days_in_year(year).rem_euclid(10) != 5 => 29,
        9 if hebrew_days_in_year(year).rem_euclid(10) == 3 => 29,
        _ => 30,
    }
}

/// JDN of a Hebrew date. The year starts with Tishri (month 7).
pub fn hebrew_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    let mut jdn = HEBREW_EPOCH + hebrew_delay_1(year) + hebrew_delay_2(year) + day + 1;
    if month < 7 {
        for m in 7..=hebrew_months_in_year(year) {
            jdn += hebrew_days_in_month(year, m);
        }
        for m in 1..month {
            jdn += hebrew_days_in_month(year, m);
        }
    } else {
        for m in 7..month {
            jdn += hebrew_days_in_month(year, m);
        }
    }
    jdn
}

/// Sextile (leap) years of the French Republican calendar.
///
/// Years III, VII, XI and XV are the ones the calendar actually used; from
/// year XX on, Romme's arithmetic rule applies.
pub fn french_is_sextile(year: i64) -> bool {
    if year < 20 {
        matches!(year, 3 | 7 | 11 | 15)
    } else {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) && year % 4000 != 0
    }
}

fn french_sextiles_before(year: i64) -> i64 {
    if year <= 20 {
        [3, 7, 11, 15].iter().filter(|&&s| s < year).count() as i64
    } else {
        let n = year - 1;
        n.div_euclid(4) - n.div_euclid(100) + n.div_euclid(400) - n.div_euclid(4000)
    }
}

/// JDN of a French Republican date. Month 13 holds the complementary days.
pub fn french_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    FRENCH_EPOCH + 365 * (year - 1) + french_sextiles_before(year) + (month - 1) * 30 + day - 1
}
