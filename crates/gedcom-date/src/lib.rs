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

//! GEDCOM dates and calendars.
//!
//! This crate parses the values of GEDCOM `DATE` records into a typed,
//! comparable model:
//!
//! - [`CalendarDate`]: one date in the Gregorian, Julian, Hebrew, French
//!   Republican, Roman or unknown calendar, possibly partial (year only, or
//!   month and year), with dual years and B.C. years
//! - [`DateValue`]: the qualifiers around dates (`ABT`, `BEF`, `AFT`,
//!   `BET ... AND ...`, `FROM ... TO ...`, `INT ... (...)`) and free-text
//!   phrases
//!
//! Parsing a [`DateValue`] never fails; text outside the grammar becomes a
//! phrase. Values of every kind share one total order, so a mixed
//! collection can be sorted directly.
//!
//! # Formatting
//!
//! Rendering goes through the visitor traits in [`visitor`].
//! [`GedcomFormatter`] backs the `Display` impls; [`DescriptiveFormatter`]
//! spells the keywords out.
//!
//! # Example
//!
//! ```rust
//! use gedcom_date::{Calendar, DateValue, DateValueKind};
//!
//! let value = DateValue::parse("BET 1 JAN 1800 AND 1801");
//! assert_eq!(value.kind(), DateValueKind::Range);
//!
//! let (start, end) = value.bounds().unwrap();
//! assert_eq!(start.calendar(), Calendar::Gregorian);
//! assert_eq!((start.day(), start.month(), start.year()), (Some(1), Some("JAN"), 1800));
//! assert_eq!((end.day(), end.month(), end.year()), (None, None, 1801));
//!
//! let mut dates = vec![
//!     DateValue::parse("AFT 1900"),
//!     DateValue::parse("Unknown, ask aunt Mary"),
//!     DateValue::parse("BEF 1900"),
//! ];
//! dates.sort();
//! assert_eq!(dates[0].to_string(), "BEF 1900");
//! ```

mod calendar;
mod error;
pub mod jdn;
mod value;
pub mod visitor;

pub use calendar::{
    Calendar, CalendarDate, DateKey, MONTHS_FRENCH, MONTHS_GREGORIAN, MONTHS_HEBREW,
};
pub use error::{DateError, DateResult};
pub use value::{end_of_time, start_of_time, DateValue, DateValueKind};
pub use visitor::{CalendarDateVisitor, DateValueVisitor, DescriptiveFormatter, GedcomFormatter};
