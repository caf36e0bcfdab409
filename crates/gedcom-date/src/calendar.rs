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

//! Calendars and single calendar dates.
//!
//! A GEDCOM `<DATE>` is an optional calendar escape followed by a year, a
//! month and a year, or a day, a month and a year:
//!
//! ```text
//! [@#DJULIAN@ ] [[12 ] JAN ] 1699[/00][ B.C.]
//! ```
//!
//! [`CalendarDate`] keeps the fields as written and derives a [`DateKey`]
//! from them for ordering. Two dates compare equal when their keys do, even
//! across calendars: `@#DJULIAN@ 5 OCT 1582` equals `15 OCT 1582`.

use crate::error::{DateError, DateResult};
use crate::jdn;
use crate::visitor::{CalendarDateVisitor, GedcomFormatter};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Month names of the Gregorian and Julian calendars.
pub const MONTHS_GREGORIAN: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Month names of the Hebrew calendar, in civil-year order from Tishri.
pub const MONTHS_HEBREW: [&str; 13] = [
    "TSH", "CSH", "KSL", "TVT", "SHV", "ADR", "ADS", "NSN", "IYR", "SVN", "TMZ", "AAV", "ELL",
];

/// Month names of the French Republican calendar; `COMP` holds the
/// complementary days.
pub const MONTHS_FRENCH: [&str; 13] = [
    "VEND", "BRUM", "FRIM", "NIVO", "PLUV", "VENT", "GERM", "FLOR", "PRAI", "MESS", "THER",
    "FRUC", "COMP",
];

/// Hebrew month numbers as used by the day arithmetic (Nisan = 1), indexed
/// by position in [`MONTHS_HEBREW`].
const HEBREW_MONTH_NUMBERS: [i64; 13] = [7, 8, 9, 10, 11, 12, 13, 1, 2, 3, 4, 5, 6];

/// A `<DATE>` with no capture groups, for embedding in larger patterns.
pub(crate) const DATE_PATTERN: &str =
    r"(?:@#D[\w ]+@\s+)?(?:(?:[0-9]+\s+)?[A-Z]{3,4}\s+)?[0-9]+(?:/[0-9]+)?(?:\s*?B\.C\.)?";

/// Groups: 1 calendar, 2 day, 3 month, 4 year, 5 dual year, 6 B.C.
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:@#D([\w ]+)@\s+)?(?:(?:([0-9]+)\s+)?([A-Z]{3,4})\s+)?([0-9]+)(?:/([0-9]+))?(\s*?B\.C\.)?$",
    )
    .expect("valid date regex")
});

/// Calendar system of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Calendar {
    /// `@#DGREGORIAN@`, the default.
    #[default]
    Gregorian,
    /// `@#DJULIAN@`
    Julian,
    /// `@#DHEBREW@`
    Hebrew,
    /// `@#DFRENCH R@`
    FrenchRepublican,
    /// `@#DROMAN@`
    Roman,
    /// `@#DUNKNOWN@`
    Unknown,
}

impl Calendar {
    /// Name as written inside the calendar escape.
    pub fn escape_name(self) -> &'static str {
        match self {
            Calendar::Gregorian => "GREGORIAN",
            Calendar::Julian => "JULIAN",
            Calendar::Hebrew => "HEBREW",
            Calendar::FrenchRepublican => "FRENCH R",
            Calendar::Roman => "ROMAN",
            Calendar::Unknown => "UNKNOWN",
        }
    }

    /// Calendar for the name inside an escape, case-insensitive.
    pub fn from_escape_name(name: &str) -> Option<Calendar> {
        match name.trim().to_ascii_uppercase().as_str() {
            "GREGORIAN" => Some(Calendar::Gregorian),
            "JULIAN" => Some(Calendar::Julian),
            "HEBREW" => Some(Calendar::Hebrew),
            "FRENCH R" => Some(Calendar::FrenchRepublican),
            "ROMAN" => Some(Calendar::Roman),
            "UNKNOWN" => Some(Calendar::Unknown),
            _ => None,
        }
    }

    /// Month names in calendar order. Empty for calendars without a table.
    pub fn months(self) -> &'static [&'static str] {
        match self {
            Calendar::Gregorian | Calendar::Julian => &MONTHS_GREGORIAN,
            Calendar::Hebrew => &MONTHS_HEBREW,
            Calendar::FrenchRepublican => &MONTHS_FRENCH,
            Calendar::Roman | Calendar::Unknown => &[],
        }
    }

    /// 1-based position of `name` in [`months`](Self::months).
    pub fn month_number(self, name: &str) -> Option<u8> {
        self.months()
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .map(|i| i as u8 + 1)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.escape_name())
    }
}

/// Ordering key of a calendar date.
///
/// `jdn` is the Julian Day Number of the last day of the period the date
/// names: the day itself for a full date, the last day of the month or year
/// for partial ones. `partial` breaks ties so that `1800` sorts after
/// `31 DEC 1800`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateKey {
    /// Julian Day Number.
    pub jdn: i64,
    /// Month or day missing.
    pub partial: bool,
}

/// One date in one calendar.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    calendar: Calendar,
    year: i64,
    dual_year: Option<i64>,
    month: Option<String>,
    day: Option<u32>,
    bc: bool,
    original: Option<String>,
}

impl CalendarDate {
    /// A year-only date.
    pub fn new(calendar: Calendar, year: i64) -> Self {
        Self {
            calendar,
            year,
            dual_year: None,
            month: None,
            day: None,
            bc: false,
            original: None,
        }
    }

    /// Set the month name. Names outside the calendar's table are kept but
    /// treated as missing for ordering.
    pub fn with_month(mut self, month: &str) -> Self {
        self.month = Some(month.to_ascii_uppercase());
        self
    }

    /// Set the day of the month.
    pub fn with_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// Mark the year as B.C.
    pub fn with_bc(mut self) -> Self {
        self.bc = true;
        self
    }

    /// Set the second year of a dual date (`1699/00` has dual year 1700).
    pub fn with_dual_year(mut self, dual_year: i64) -> Self {
        self.dual_year = Some(dual_year);
        self
    }

    /// Parse a `<DATE>`.
    ///
    /// # Errors
    ///
    /// Fails when the text does not follow the grammar, names an unknown
    /// calendar, uses a dual year outside the Gregorian calendar, or holds
    /// numbers too large to represent.
    pub fn parse(text: &str) -> DateResult<CalendarDate> {
        let text = text.trim();
        let caps = DATE_RE
            .captures(text)
            .ok_or_else(|| DateError::Syntax(text.to_string()))?;

        let calendar = match caps.get(1) {
            Some(name) => Calendar::from_escape_name(name.as_str())
                .ok_or_else(|| DateError::UnknownCalendar(name.as_str().trim().to_string()))?,
            None => Calendar::Gregorian,
        };

        let number = |digits: &str| {
            digits
                .parse::<u32>()
                .map_err(|_| DateError::Overflow(text.to_string()))
        };

        let day = caps.get(2).map(|m| number(m.as_str())).transpose()?;
        let year_digits = caps.get(4).map_or("", |m| m.as_str());
        let year = i64::from(number(year_digits)?);
        let dual_year = match caps.get(5) {
            Some(dual) => Some(
                resolve_dual_year(year_digits, dual.as_str())
                    .ok_or_else(|| DateError::Overflow(text.to_string()))?,
            ),
            None => None,
        };
        if dual_year.is_some() && calendar != Calendar::Gregorian {
            return Err(DateError::DualYear {
                calendar: calendar.escape_name().to_string(),
                text: text.to_string(),
            });
        }

        Ok(CalendarDate {
            calendar,
            year,
            dual_year,
            month: caps.get(3).map(|m| m.as_str().to_ascii_uppercase()),
            day,
            bc: caps.get(6).is_some(),
            original: Some(text.to_string()),
        })
    }

    /// Calendar system.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Year as written (the first year of a dual date).
    pub fn year(&self) -> i64 {
        self.year
    }

    /// Second year of a dual date.
    pub fn dual_year(&self) -> Option<i64> {
        self.dual_year
    }

    /// Month name, upper case.
    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    /// 1-based month number within the calendar, if the month name is known.
    pub fn month_number(&self) -> Option<u8> {
        self.month
            .as_deref()
            .and_then(|m| self.calendar.month_number(m))
    }

    /// Day of the month.
    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// True for B.C. years.
    pub fn is_bc(&self) -> bool {
        self.bc
    }

    /// Text the date was parsed from.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Year with dual year and era suffix, e.g. `1699/00` or `44 B.C.`.
    pub fn year_str(&self) -> String {
        let mut out = self.year.to_string();
        if let Some(dual) = self.dual_year {
            let digits = dual.to_string();
            out.push('/');
            out.push_str(&digits[digits.len().saturating_sub(2)..]);
        }
        if self.bc {
            out.push_str(" B.C.");
        }
        out
    }

    /// Ordering key.
    pub fn key(&self) -> DateKey {
        let year = self.dual_year.unwrap_or(self.year);
        let month = self.month_number().map(i64::from);
        let day = self.day.map(i64::from);

        let jdn = match self.calendar {
            Calendar::Hebrew => {
                let year = if self.bc { -year } else { year };
                hebrew_key(year, self.month_number(), day)
            }
            Calendar::FrenchRepublican => {
                let year = if self.bc { -year } else { year };
                french_key(year, month, day)
            }
            Calendar::Julian => {
                solar_key(jdn::julian_to_jdn, astronomical(year, self.bc), month, day)
            }
            Calendar::Gregorian | Calendar::Roman | Calendar::Unknown => {
                solar_key(jdn::gregorian_to_jdn, astronomical(year, self.bc), month, day)
            }
        };

        DateKey {
            jdn,
            partial: month.is_none() || day.is_none(),
        }
    }

    /// Dispatch to the visitor method for this date's calendar.
    pub fn accept<V: CalendarDateVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self.calendar {
            Calendar::Gregorian => visitor.visit_gregorian(self),
            Calendar::Julian => visitor.visit_julian(self),
            Calendar::Hebrew => visitor.visit_hebrew(self),
            Calendar::FrenchRepublican => visitor.visit_french(self),
            Calendar::Roman | Calendar::Unknown => visitor.visit_other(self),
        }
    }
}

/// `1699` + `00` gives 1700, `1650` + `51` gives 1651. A dual part as long
/// as the year is taken literally.
fn resolve_dual_year(year: &str, dual: &str) -> Option<i64> {
    let literal = i64::from(dual.parse::<u32>().ok()?);
    if dual.len() >= year.len() {
        return Some(literal);
    }
    let filled = format!("{}{}", &year[..year.len() - dual.len()], dual);
    let filled = i64::from(filled.parse::<u32>().ok()?);
    let year = i64::from(year.parse::<u32>().ok()?);
    if filled >= year {
        Some(filled)
    } else {
        let centuries = (year - filled + 99) / 100;
        Some(filled + centuries * 100)
    }
}

fn astronomical(year: i64, bc: bool) -> i64 {
    if bc {
        1 - year
    } else {
        year
    }
}

fn solar_key(
    to_jdn: fn(i64, i64, i64) -> i64,
    year: i64,
    month: Option<i64>,
    day: Option<i64>,
) -> i64 {
    match (month, day) {
        (Some(m), Some(d)) => to_jdn(year, m, d),
        (Some(m), None) if m < 12 => to_jdn(year, m + 1, 1) - 1,
        _ => to_jdn(year + 1, 1, 1) - 1,
    }
}

fn hebrew_key(year: i64, month: Option<u8>, day: Option<i64>) -> i64 {
    let month = month.map(|m| HEBREW_MONTH_NUMBERS[usize::from(m - 1)]);
    match (month, day) {
        (Some(m), Some(d)) => jdn::hebrew_to_jdn(year, m, d),
        (Some(m), None) => jdn::hebrew_to_jdn(year, m, 1) + jdn::hebrew_days_in_month(year, m) - 1,
        (None, _) => jdn::hebrew_to_jdn(year + 1, 7, 1) - 1,
    }
}

fn french_key(year: i64, month: Option<i64>, day: Option<i64>) -> i64 {
    match (month, day) {
        (Some(m), Some(d)) => jdn::french_to_jdn(year, m, d),
        (Some(m), None) if m < 13 => jdn::french_to_jdn(year, m, 30),
        _ => jdn::french_to_jdn(year + 1, 1, 1) - 1,
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CalendarDate {}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accept(&mut GedcomFormatter))
    }
}
