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

//! Personal names and producer dialects.
//!
//! A NAME value is `given /surname/ given`. How the pieces map onto a
//! person's first, last and maiden names depends on the application that
//! wrote the file, which is announced in the header `SOUR` record.

use crate::record::NameRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static ALTREE_MAIDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+\(([^-()][^()]*)\)$").expect("valid maiden regex"));

/// Producer application conventions that change how records are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    /// Plain GEDCOM 5.5.1.
    #[default]
    Default,
    /// myheritage.com: `_MARNM` carries the married surname.
    MyHeritage,
    /// Agelong Tree: maiden name in parentheses after the surname.
    Altree,
    /// ancestris.org.
    Ancestris,
}

impl Dialect {
    /// Dialect for a header `SOUR` value.
    pub fn from_source(source: &str) -> Dialect {
        match source.trim() {
            s if s.eq_ignore_ascii_case("MYHERITAGE") => Dialect::MyHeritage,
            s if s.eq_ignore_ascii_case("ALTREE") => Dialect::Altree,
            s if s.eq_ignore_ascii_case("ANCESTRIS") => Dialect::Ancestris,
            _ => Dialect::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Default => "default",
            Dialect::MyHeritage => "myheritage",
            Dialect::Altree => "altree",
            Dialect::Ancestris => "ancestris",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a NAME value at its slashes into `(given1, surname, given2)`.
///
/// Every piece is trimmed; missing pieces are empty.
///
/// ```rust
/// use gedcom_core::split_name;
///
/// assert_eq!(split_name("First /Last/ II"), ("First", "Last", "II"));
/// assert_eq!(split_name("/Last/ Karl II"), ("", "Last", "Karl II"));
/// assert_eq!(split_name("First Name Only"), ("First Name Only", "", ""));
/// ```
pub fn split_name(name: &str) -> (&str, &str, &str) {
    let (given1, rest) = name.split_once('/').unwrap_or((name, ""));
    let (surname, given2) = rest.split_once('/').unwrap_or((rest, ""));
    (given1.trim(), surname.trim(), given2.trim())
}

/// The pieces of one NAME record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameParts {
    /// Given name text before the surname.
    pub given1: String,
    /// Last name.
    pub surname: String,
    /// Given name text after the surname.
    pub given2: String,
    /// Maiden name, when the dialect records one inside the NAME itself.
    pub maiden: Option<String>,
}

impl NameParts {
    /// Decompose a NAME value. `married` is the value of a `_MARNM`
    /// sub-record and only matters for [`Dialect::MyHeritage`].
    pub fn decompose(value: &str, dialect: Dialect, married: Option<&str>) -> NameParts {
        let (given1, surname, given2) = split_name(value);
        let mut parts = NameParts {
            given1: given1.to_string(),
            surname: surname.to_string(),
            given2: given2.to_string(),
            maiden: None,
        };
        match dialect {
            Dialect::Altree => {
                if let Some(caps) = ALTREE_MAIDEN.captures(surname) {
                    parts.surname = caps[1].to_string();
                    parts.maiden = Some(caps[2].trim().to_string());
                }
            }
            Dialect::MyHeritage => {
                if let Some(married) = married.map(str::trim).filter(|m| !m.is_empty()) {
                    parts.maiden = Some(std::mem::replace(&mut parts.surname, married.to_string()));
                }
            }
            Dialect::Default | Dialect::Ancestris => {}
        }
        parts
    }

    /// Given name: both given pieces joined by a space.
    pub fn given(&self) -> String {
        match (self.given1.is_empty(), self.given2.is_empty()) {
            (false, false) => format!("{} {}", self.given1, self.given2),
            (false, true) => self.given1.clone(),
            _ => self.given2.clone(),
        }
    }
}

/// Sort orders for [`Name::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameOrder {
    /// Surname first, then given name.
    SurnameGiven,
    /// Given name first, then surname.
    GivenSurname,
    /// Maiden name (or surname) first, then given name.
    MaidenGiven,
    /// Given name first, then maiden name (or surname).
    GivenMaiden,
}

/// Summary of all NAME records of one individual.
///
/// The primary name is the first NAME without a `TYPE` sub-record, or the
/// first NAME when every one has a type.
#[derive(Debug, Clone)]
pub struct Name<'d> {
    names: Vec<NameRecord<'d>>,
    primary: Option<NameRecord<'d>>,
    dialect: Dialect,
}

impl<'d> Name<'d> {
    pub(crate) fn new(names: Vec<NameRecord<'d>>, dialect: Dialect) -> Self {
        let primary = names
            .iter()
            .copied()
            .find(|n| n.name_type().map_or(true, str::is_empty))
            .or_else(|| names.first().copied());
        Self {
            names,
            primary,
            dialect,
        }
    }

    /// All NAME records, in file order.
    pub fn records(&self) -> &[NameRecord<'d>] {
        &self.names
    }

    /// The record the other accessors read from.
    pub fn primary(&self) -> Option<NameRecord<'d>> {
        self.primary
    }

    fn parts(&self) -> Option<&'d NameParts> {
        self.primary.map(|r| r.parts())
    }

    pub fn surname(&self) -> &'d str {
        self.parts().map_or("", |p| p.surname.as_str())
    }

    /// Given name, first and middle names included.
    pub fn given(&self) -> String {
        self.parts().map(NameParts::given).unwrap_or_default()
    }

    /// First word of the given name.
    pub fn first(&self) -> String {
        self.given()
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string()
    }

    /// Maiden name, empty when unknown.
    pub fn maiden(&self) -> &'d str {
        if self.dialect == Dialect::Default {
            let maiden = self.names.iter().find(|n| n.name_type() == Some("maiden"));
            if let Some(record) = maiden {
                return record.parts().surname.as_str();
            }
        }
        self.parts()
            .and_then(|p| p.maiden.as_deref())
            .unwrap_or("")
    }

    /// Collation key: a pair of strings that compare the way names should
    /// sort. Empty pieces sort after non-empty ones.
    pub fn order(&self, order: NameOrder) -> (String, String) {
        let surname = match order {
            NameOrder::MaidenGiven | NameOrder::GivenMaiden => {
                let maiden = self.maiden();
                if maiden.is_empty() {
                    self.surname()
                } else {
                    maiden
                }
            }
            NameOrder::SurnameGiven | NameOrder::GivenSurname => self.surname(),
        };
        let key = |piece: &str| {
            if piece.is_empty() {
                "2".to_string()
            } else {
                format!("1{}", piece)
            }
        };
        let given = key(&self.given());
        let surname = key(surname);
        match order {
            NameOrder::SurnameGiven | NameOrder::MaidenGiven => (surname, given),
            NameOrder::GivenSurname | NameOrder::GivenMaiden => (given, surname),
        }
    }

    /// Name for display: given, surname, suffix.
    pub fn format(&self) -> String {
        match self.parts() {
            Some(p) => [p.given1.as_str(), p.surname.as_str(), p.given2.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" "),
            None => String::new(),
        }
    }
}

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
