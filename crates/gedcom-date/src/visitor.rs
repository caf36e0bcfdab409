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

//! Visitors over dates.
//!
//! Rendering lives outside the date types: [`CalendarDate::accept`] and
//! [`DateValue::accept`] dispatch to a visitor, and callers that want a
//! different presentation (another language, ISO 8601, a converted
//! calendar) implement the visitor traits instead of touching the parser.
//!
//! Two formatters ship with the crate:
//!
//! - [`GedcomFormatter`]: GEDCOM keyword form (`BET 1 JAN 1800 AND 1801`),
//!   used by the `Display` impls.
//! - [`DescriptiveFormatter`]: spelled-out keywords
//!   (`BETWEEN 1 JAN 1800 AND 1801`).
//!
//! # Example
//!
//! ```rust
//! use gedcom_date::{CalendarDate, CalendarDateVisitor, DateValue, DescriptiveFormatter};
//!
//! struct IsoDates;
//!
//! impl CalendarDateVisitor for IsoDates {
//!     type Output = String;
//!
//!     fn visit_gregorian(&mut self, date: &CalendarDate) -> String {
//!         match (date.month_number(), date.day()) {
//!             (Some(m), Some(d)) => format!("{:04}-{:02}-{:02}", date.year(), m, d),
//!             (Some(m), None) => format!("{:04}-{:02}", date.year(), m),
//!             _ => format!("{:04}", date.year()),
//!         }
//!     }
//!     fn visit_julian(&mut self, date: &CalendarDate) -> String {
//!         format!("{} (Julian)", self.visit_gregorian(date))
//!     }
//!     fn visit_hebrew(&mut self, date: &CalendarDate) -> String {
//!         date.to_string()
//!     }
//!     fn visit_french(&mut self, date: &CalendarDate) -> String {
//!         date.to_string()
//!     }
//! }
//!
//! let value = DateValue::parse("BET 1 JAN 1800 AND 1801");
//! let mut formatter = DescriptiveFormatter::with_dates(IsoDates);
//! assert_eq!(value.accept(&mut formatter), "BETWEEN 1800-01-01 AND 1801");
//! ```
//!
//! [`DateValue::accept`]: crate::DateValue::accept

use crate::calendar::{Calendar, CalendarDate};

/// Visitor over the calendar of a [`CalendarDate`].
pub trait CalendarDateVisitor {
    /// Value produced by each visit.
    type Output;

    /// Gregorian date.
    fn visit_gregorian(&mut self, date: &CalendarDate) -> Self::Output;

    /// Julian date.
    fn visit_julian(&mut self, date: &CalendarDate) -> Self::Output;

    /// Hebrew date.
    fn visit_hebrew(&mut self, date: &CalendarDate) -> Self::Output;

    /// French Republican date.
    fn visit_french(&mut self, date: &CalendarDate) -> Self::Output;

    /// Roman and unknown calendars. Falls back to the Gregorian handler.
    fn visit_other(&mut self, date: &CalendarDate) -> Self::Output {
        self.visit_gregorian(date)
    }
}

/// Visitor over the kinds of [`DateValue`](crate::DateValue).
pub trait DateValueVisitor {
    /// Value produced by each visit.
    type Output;

    /// A single date.
    fn visit_simple(&mut self, date: &CalendarDate) -> Self::Output;

    /// `FROM date`
    fn visit_from(&mut self, date: &CalendarDate) -> Self::Output;

    /// `TO date`
    fn visit_to(&mut self, date: &CalendarDate) -> Self::Output;

    /// `FROM start TO end`
    fn visit_period(&mut self, start: &CalendarDate, end: &CalendarDate) -> Self::Output;

    /// `BEF date`
    fn visit_before(&mut self, date: &CalendarDate) -> Self::Output;

    /// `AFT date`
    fn visit_after(&mut self, date: &CalendarDate) -> Self::Output;

    /// `BET start AND end`
    fn visit_range(&mut self, start: &CalendarDate, end: &CalendarDate) -> Self::Output;

    /// `ABT date`
    fn visit_about(&mut self, date: &CalendarDate) -> Self::Output;

    /// `CAL date`
    fn visit_calculated(&mut self, date: &CalendarDate) -> Self::Output;

    /// `EST date`
    fn visit_estimated(&mut self, date: &CalendarDate) -> Self::Output;

    /// `INT date (phrase)`
    fn visit_interpreted(&mut self, date: &CalendarDate, phrase: &str) -> Self::Output;

    /// Free text. `None` for an empty DATE.
    fn visit_phrase(&mut self, phrase: Option<&str>) -> Self::Output;
}

/// Formats dates the way GEDCOM writes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GedcomFormatter;

impl GedcomFormatter {
    fn plain(date: &CalendarDate) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(month) = date.month() {
            if let Some(day) = date.day() {
                parts.push(day.to_string());
            }
            parts.push(month.to_string());
        }
        parts.push(date.year_str());
        parts.join(" ")
    }

    fn escaped(calendar: Calendar, date: &CalendarDate) -> String {
        format!("@#D{}@ {}", calendar.escape_name(), Self::plain(date))
    }
}

impl CalendarDateVisitor for GedcomFormatter {
    type Output = String;

    fn visit_gregorian(&mut self, date: &CalendarDate) -> String {
        Self::plain(date)
    }

    fn visit_julian(&mut self, date: &CalendarDate) -> String {
        Self::escaped(Calendar::Julian, date)
    }

    fn visit_hebrew(&mut self, date: &CalendarDate) -> String {
        Self::escaped(Calendar::Hebrew, date)
    }

    fn visit_french(&mut self, date: &CalendarDate) -> String {
        Self::escaped(Calendar::FrenchRepublican, date)
    }

    fn visit_other(&mut self, date: &CalendarDate) -> String {
        Self::escaped(date.calendar(), date)
    }
}

impl DateValueVisitor for GedcomFormatter {
    type Output = String;

    fn visit_simple(&mut self, date: &CalendarDate) -> String {
        date.accept(self)
    }

    fn visit_from(&mut self, date: &CalendarDate) -> String {
        format!("FROM {}", date.accept(self))
    }

    fn visit_to(&mut self, date: &CalendarDate) -> String {
        format!("TO {}", date.accept(self))
    }

    fn visit_period(&mut self, start: &CalendarDate, end: &CalendarDate) -> String {
        format!("FROM {} TO {}", start.accept(self), end.accept(self))
    }

    fn visit_before(&mut self, date: &CalendarDate) -> String {
        format!("BEF {}", date.accept(self))
    }

    fn visit_after(&mut self, date: &CalendarDate) -> String {
        format!("AFT {}", date.accept(self))
    }

    fn visit_range(&mut self, start: &CalendarDate, end: &CalendarDate) -> String {
        format!("BET {} AND {}", start.accept(self), end.accept(self))
    }

    fn visit_about(&mut self, date: &CalendarDate) -> String {
        format!("ABT {}", date.accept(self))
    }

    fn visit_calculated(&mut self, date: &CalendarDate) -> String {
        format!("CAL {}", date.accept(self))
    }

    fn visit_estimated(&mut self, date: &CalendarDate) -> String {
        format!("EST {}", date.accept(self))
    }

    fn visit_interpreted(&mut self, date: &CalendarDate, phrase: &str) -> String {
        format!("INT {} ({})", date.accept(self), phrase)
    }

    fn visit_phrase(&mut self, phrase: Option<&str>) -> String {
        phrase.map(|p| format!("({})", p)).unwrap_or_default()
    }
}

/// Formats date values with spelled-out keywords. Calendar dates are
/// rendered by `C`.
#[derive(Debug, Clone, Default)]
pub struct DescriptiveFormatter<C = GedcomFormatter> {
    dates: C,
}

impl DescriptiveFormatter<GedcomFormatter> {
    /// Formatter rendering calendar dates in GEDCOM form.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CalendarDateVisitor<Output = String>> DescriptiveFormatter<C> {
    /// Formatter rendering calendar dates with `dates`.
    pub fn with_dates(dates: C) -> Self {
        Self { dates }
    }

    fn date(&mut self, date: &CalendarDate) -> String {
        date.accept(&mut self.dates)
    }
}

impl<C: CalendarDateVisitor<Output = String>> DateValueVisitor for DescriptiveFormatter<C> {
    type Output = String;

    fn visit_simple(&mut self, date: &CalendarDate) -> String {
        self.date(date)
    }

    fn visit_from(&mut self, date: &CalendarDate) -> String {
        format!("FROM {}", self.date(date))
    }

    fn visit_to(&mut self, date: &CalendarDate) -> String {
        format!("TO {}", self.date(date))
    }

    fn visit_period(&mut self, start: &CalendarDate, end: &CalendarDate) -> String {
        format!("FROM {} TO {}", self.date(start), self.date(end))
    }

    fn visit_before(&mut self, date: &CalendarDate) -> String {
        format!("BEFORE {}", self.date(date))
    }

    fn visit_after(&mut self, date: &CalendarDate) -> String {
        format!("AFTER {}", self.date(date))
    }

    fn visit_range(&mut self, start: &CalendarDate, end: &CalendarDate) -> String {
        format!("BETWEEN {} AND {}", self.date(start), self.date(end))
    }

    fn visit_about(&mut self, date: &CalendarDate) -> String {
        format!("ABOUT {}", self.date(date))
    }

    fn visit_calculated(&mut self, date: &CalendarDate) -> String {
        format!("CALCULATED {}", self.date(date))
    }

    fn visit_estimated(&mut self, date: &CalendarDate) -> String {
        format!("ESTIMATED {}", self.date(date))
    }

    fn visit_interpreted(&mut self, date: &CalendarDate, phrase: &str) -> String {
        format!("INTERPRETED {} ({})", self.date(date), phrase)
    }

    fn visit_phrase(&mut self, phrase: Option<&str>) -> String {
        phrase.map(|p| format!("({})", p)).unwrap_or_default()
    }
}
