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

//! Errors for calendar date parsing.
//!
//! These never escape [`DateValue::parse`](crate::DateValue::parse), which
//! turns any failure into a phrase. They are returned by the lower-level
//! [`CalendarDate::parse`](crate::CalendarDate::parse).

use thiserror::Error;

/// Why a string is not a calendar date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The text does not follow the `[@#D...@] [[day] MONTH] year` grammar.
    #[error("not a GEDCOM date: '{0}'")]
    Syntax(String),

    /// The calendar escape names no known calendar.
    #[error("unknown calendar escape '@#D{0}@'")]
    UnknownCalendar(String),

    /// Dual years (`1699/00`) are only defined for the Gregorian calendar.
    #[error("dual year is not allowed in the {calendar} calendar: '{text}'")]
    DualYear {
        /// Calendar name.
        calendar: String,
        /// The date text.
        text: String,
    },

    /// A number does not fit.
    #[error("number out of range in '{0}'")]
    Overflow(String),
}

/// Result type for date parsing.
pub type DateResult<T> = Result<T, DateError>;
