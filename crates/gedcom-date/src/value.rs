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

//! Date values: the full `DATE` grammar.
//!
//! A date value wraps one or two calendar dates in a qualifier (`ABT`,
//! `BET ... AND ...`, `FROM ... TO ...`) or holds a free-text phrase.
//! Parsing is total. Text that fits no production becomes a
//! [`DateValue::Phrase`] carrying the text as written.
//!
//! Every value has a key pair `(low, high)` made of [`DateKey`]s; values
//! order by key pair, then by kind, then by phrase text. Open-ended
//! qualifiers use the ends of time as the missing bound, so `BEF 1900`
//! sorts before `1900` and `AFT 1900` after it.

use crate::calendar::{Calendar, CalendarDate, DateKey, DATE_PATTERN};
use crate::visitor::{DateValueVisitor, GedcomFormatter};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Kind of a [`DateValue`], in ordering rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateValueKind {
    /// `date`
    Simple,
    /// `FROM date`
    From,
    /// `TO date`
    To,
    /// `FROM date TO date`
    Period,
    /// `BEF date`
    Before,
    /// `AFT date`
    After,
    /// `BET date AND date`
    Range,
    /// `ABT date`
    About,
    /// `CAL date`
    Calculated,
    /// `EST date`
    Estimated,
    /// `INT date (phrase)`
    Interpreted,
    /// `(phrase)` or unparseable text
    Phrase,
}

impl DateValueKind {
    /// Upper-case name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            DateValueKind::Simple => "SIMPLE",
            DateValueKind::From => "FROM",
            DateValueKind::To => "TO",
            DateValueKind::Period => "PERIOD",
            DateValueKind::Before => "BEFORE",
            DateValueKind::After => "AFTER",
            DateValueKind::Range => "RANGE",
            DateValueKind::About => "ABOUT",
            DateValueKind::Calculated => "CALCULATED",
            DateValueKind::Estimated => "ESTIMATED",
            DateValueKind::Interpreted => "INTERPRETED",
            DateValueKind::Phrase => "PHRASE",
        }
    }
}

impl fmt::Display for DateValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Productions tried in order; the first match wins.
static GRAMMAR: Lazy<Vec<(DateValueKind, Regex)>> = Lazy::new(|| {
    let d = DATE_PATTERN;
    [
        (DateValueKind::Period, format!(r"FROM\s+(?P<date1>{d})\s+TO\s+(?P<date2>{d})")),
        (DateValueKind::From, format!(r"FROM\s+(?P<date>{d})")),
        (DateValueKind::To, format!(r"TO\s+(?P<date>{d})")),
        (DateValueKind::Range, format!(r"BET\s+(?P<date1>{d})\s+AND\s+(?P<date2>{d})")),
        (DateValueKind::Before, format!(r"BEF\s+(?P<date>{d})")),
        (DateValueKind::After, format!(r"AFT\s+(?P<date>{d})")),
        (DateValueKind::About, format!(r"ABT\s+(?P<date>{d})")),
        (DateValueKind::Calculated, format!(r"CAL\s+(?P<date>{d})")),
        (DateValueKind::Estimated, format!(r"EST\s+(?P<date>{d})")),
        (
            DateValueKind::Interpreted,
            format!(r"INT\s+(?P<date>{d})\s+\((?P<phrase>.*)\)"),
        ),
        (DateValueKind::Phrase, r"\((?P<phrase>.*)\)".to_string()),
        (DateValueKind::Simple, format!(r"(?P<date>{d})")),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        let re = Regex::new(&format!(r"(?i)^{}$", pattern)).expect("valid date value regex");
        (kind, re)
    })
    .collect()
});

/// A parsed `DATE` value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateValue {
    /// A single date.
    Simple(CalendarDate),
    /// Start of an open period.
    From(CalendarDate),
    /// End of an open period.
    To(CalendarDate),
    /// A closed period.
    Period {
        /// First date.
        start: CalendarDate,
        /// Last date.
        end: CalendarDate,
    },
    /// Some time before the date.
    Before(CalendarDate),
    /// Some time after the date.
    After(CalendarDate),
    /// Some time between two dates.
    Range {
        /// Lower bound.
        start: CalendarDate,
        /// Upper bound.
        end: CalendarDate,
    },
    /// Approximately the date.
    About(CalendarDate),
    /// Calculated from other data.
    Calculated(CalendarDate),
    /// Estimated from other data.
    Estimated(CalendarDate),
    /// A date interpreted from a phrase.
    Interpreted {
        /// The interpretation.
        date: CalendarDate,
        /// The original phrase.
        phrase: String,
    },
    /// Free text. `None` for an empty value.
    Phrase(Option<String>),
}

impl DateValue {
    /// Parse a `DATE` value. Never fails.
    ///
    /// ```rust
    /// use gedcom_date::{DateValue, DateValueKind};
    ///
    /// let value = DateValue::parse("BET 1 JAN 1800 AND 1801");
    /// assert_eq!(value.kind(), DateValueKind::Range);
    ///
    /// let value = DateValue::parse("Unknown, ask aunt Mary");
    /// assert_eq!(value.phrase(), Some("Unknown, ask aunt Mary"));
    /// ```
    pub fn parse(text: &str) -> DateValue {
        let text = text.trim();
        if text.is_empty() {
            return DateValue::Phrase(None);
        }
        GRAMMAR
            .iter()
            .find_map(|(kind, re)| re.captures(text).map(|caps| (*kind, caps)))
            .and_then(|(kind, caps)| Self::from_captures(kind, &caps))
            .unwrap_or_else(|| DateValue::Phrase(Some(text.to_string())))
    }

    /// Build a value from a grammar match. `None` when a captured date is
    /// rejected by the calendar parser.
    fn from_captures(kind: DateValueKind, caps: &Captures<'_>) -> Option<DateValue> {
        let date = |name: &str| {
            caps.name(name)
                .and_then(|m| CalendarDate::parse(m.as_str()).ok())
        };
        let phrase = || caps.name("phrase").map_or(String::new(), |m| m.as_str().to_string());

        let value = match kind {
            DateValueKind::Simple => DateValue::Simple(date("date")?),
            DateValueKind::From => DateValue::From(date("date")?),
            DateValueKind::To => DateValue::To(date("date")?),
            DateValueKind::Period => DateValue::Period {
                start: date("date1")?,
                end: date("date2")?,
            },
            DateValueKind::Before => DateValue::Before(date("date")?),
            DateValueKind::After => DateValue::After(date("date")?),
            DateValueKind::Range => DateValue::Range {
                start: date("date1")?,
                end: date("date2")?,
            },
            DateValueKind::About => DateValue::About(date("date")?),
            DateValueKind::Calculated => DateValue::Calculated(date("date")?),
            DateValueKind::Estimated => DateValue::Estimated(date("date")?),
            DateValueKind::Interpreted => DateValue::Interpreted {
                date: date("date")?,
                phrase: phrase(),
            },
            DateValueKind::Phrase => DateValue::Phrase(Some(phrase())),
        };
        Some(value)
    }

    /// Kind of this value.
    pub fn kind(&self) -> DateValueKind {
        match self {
            DateValue::Simple(_) => DateValueKind::Simple,
            DateValue::From(_) => DateValueKind::From,
            DateValue::To(_) => DateValueKind::To,
            DateValue::Period { .. } => DateValueKind::Period,
            DateValue::Before(_) => DateValueKind::Before,
            DateValue::After(_) => DateValueKind::After,
            DateValue::Range { .. } => DateValueKind::Range,
            DateValue::About(_) => DateValueKind::About,
            DateValue::Calculated(_) => DateValueKind::Calculated,
            DateValue::Estimated(_) => DateValueKind::Estimated,
            DateValue::Interpreted { .. } => DateValueKind::Interpreted,
            DateValue::Phrase(_) => DateValueKind::Phrase,
        }
    }

    /// The single date of a one-date value.
    pub fn date(&self) -> Option<&CalendarDate> {
        match self {
            DateValue::Simple(d)
            | DateValue::From(d)
            | DateValue::To(d)
            | DateValue::Before(d)
            | DateValue::After(d)
            | DateValue::About(d)
            | DateValue::Calculated(d)
            | DateValue::Estimated(d)
            | DateValue::Interpreted { date: d, .. } => Some(d),
            _ => None,
        }
    }

    /// Both dates of a period or range.
    pub fn bounds(&self) -> Option<(&CalendarDate, &CalendarDate)> {
        match self {
            DateValue::Period { start, end } | DateValue::Range { start, end } => {
                Some((start, end))
            }
            _ => None,
        }
    }

    /// Phrase text of an interpreted or phrase value.
    pub fn phrase(&self) -> Option<&str> {
        match self {
            DateValue::Interpreted { phrase, .. } => Some(phrase),
            DateValue::Phrase(phrase) => phrase.as_deref(),
            _ => None,
        }
    }

    /// Ordering key pair `(low, high)`.
    pub fn key(&self) -> (DateKey, DateKey) {
        match self {
            DateValue::Simple(d)
            | DateValue::About(d)
            | DateValue::Calculated(d)
            | DateValue::Estimated(d)
            | DateValue::Interpreted { date: d, .. } => {
                let k = d.key();
                (k, k)
            }
            DateValue::From(d) | DateValue::After(d) => (d.key(), end_of_time()),
            DateValue::To(d) | DateValue::Before(d) => (start_of_time(), d.key()),
            DateValue::Period { start, end } | DateValue::Range { start, end } => {
                (start.key(), end.key())
            }
            DateValue::Phrase(_) => (end_of_time(), end_of_time()),
        }
    }

    /// Dispatch to the visitor method for this value's kind.
    pub fn accept<V: DateValueVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            DateValue::Simple(d) => visitor.visit_simple(d),
            DateValue::From(d) => visitor.visit_from(d),
            DateValue::To(d) => visitor.visit_to(d),
            DateValue::Period { start, end } => visitor.visit_period(start, end),
            DateValue::Before(d) => visitor.visit_before(d),
            DateValue::After(d) => visitor.visit_after(d),
            DateValue::Range { start, end } => visitor.visit_range(start, end),
            DateValue::About(d) => visitor.visit_about(d),
            DateValue::Calculated(d) => visitor.visit_calculated(d),
            DateValue::Estimated(d) => visitor.visit_estimated(d),
            DateValue::Interpreted { date, phrase } => visitor.visit_interpreted(date, phrase),
            DateValue::Phrase(phrase) => visitor.visit_phrase(phrase.as_deref()),
        }
    }
}

/// Key of the earliest representable date (Gregorian 5000 B.C.).
pub fn start_of_time() -> DateKey {
    CalendarDate::new(Calendar::Gregorian, 5000).with_bc().key()
}

/// Key of the latest representable date (Gregorian 5000).
pub fn end_of_time() -> DateKey {
    CalendarDate::new(Calendar::Gregorian, 5000).key()
}

impl FromStr for DateValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DateValue::parse(s))
    }
}

impl PartialEq for DateValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DateValue {}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key()
            .cmp(&other.key())
            .then_with(|| self.kind().cmp(&other.kind()))
            .then_with(|| self.phrase().cmp(&other.phrase()))
    }
}

impl Hash for DateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
        self.kind().hash(state);
        self.phrase().hash(state);
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accept(&mut GedcomFormatter))
    }
}
