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

//! Record views and their specialized variants.
//!
//! A [`Record`] is a cheap, copyable handle into a [`Document`]. The
//! specialized variants wrap the same handle and only add accessors; the
//! variant is picked from the tag and value by [`Record::specialize`].

use crate::document::{Document, NodeId};
use crate::line::is_pointer;
use crate::name::{Dialect, Name, NameParts};
use gedcom_date::DateValue;
use std::fmt;
use std::ops::Deref;

/// Which specialized variant a record becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Generic,
    Name,
    Date,
    Individual,
    Pointer,
}

impl RecordKind {
    /// Dispatch on tag and value. A pointer value wins over the tag.
    pub fn of(tag: &str, value: Option<&str>) -> RecordKind {
        if value.map_or(false, is_pointer) {
            return RecordKind::Pointer;
        }
        match tag {
            "INDI" => RecordKind::Individual,
            "NAME" => RecordKind::Name,
            "DATE" => RecordKind::Date,
            _ => RecordKind::Generic,
        }
    }
}

/// A record narrowed to its most specific variant.
#[derive(Debug, Clone, Copy)]
pub enum Specialized<'d> {
    Generic(Record<'d>),
    Name(NameRecord<'d>),
    Date(DateRecord<'d>),
    Individual(Individual<'d>),
    Pointer(Pointer<'d>),
}

/// Outcome of a tag-path lookup.
///
/// A path that matched but ran into a pointer with no target is reported
/// separately from a path that did not match at all.
#[derive(Debug, Clone, Copy)]
pub enum SubTag<'d, T = Record<'d>> {
    /// The path matched.
    Found(T),
    /// The path matched up to a pointer whose target is not defined.
    Unresolved(Pointer<'d>),
    /// Some step of the path had no matching sub-record.
    Absent,
}

impl<'d, T> SubTag<'d, T> {
    pub fn found(self) -> Option<T> {
        match self {
            SubTag::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SubTag::Found(_))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, SubTag::Unresolved(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SubTag::Absent)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SubTag<'d, U> {
        match self {
            SubTag::Found(value) => SubTag::Found(f(value)),
            SubTag::Unresolved(pointer) => SubTag::Unresolved(pointer),
            SubTag::Absent => SubTag::Absent,
        }
    }
}

/// A record in a [`Document`].
#[derive(Clone, Copy)]
pub struct Record<'d> {
    doc: &'d Document,
    id: NodeId,
}

impl<'d> Record<'d> {
    pub(crate) fn new(doc: &'d Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document this record belongs to.
    pub fn document(&self) -> &'d Document {
        self.doc
    }

    pub fn level(&self) -> usize {
        self.doc.node(self.id).level
    }

    /// Cross-reference id including the `@` delimiters.
    pub fn xref_id(&self) -> Option<&'d str> {
        self.doc.node(self.id).xref_id.as_deref()
    }

    pub fn tag(&self) -> &'d str {
        &self.doc.node(self.id).tag
    }

    /// The value as written, continuations merged.
    pub fn value(&self) -> Option<&'d str> {
        self.doc.node(self.id).value.as_deref()
    }

    /// Byte offset of the record's first line.
    pub fn offset(&self) -> u64 {
        self.doc.node(self.id).offset
    }

    /// Line number of the record's first line.
    pub fn line(&self) -> usize {
        self.doc.node(self.id).line
    }

    /// Dialect the record is read with. Header records always use the
    /// default dialect.
    pub fn dialect(&self) -> Dialect {
        if self.root().tag() == "HEAD" {
            Dialect::Default
        } else {
            self.doc.dialect()
        }
    }

    /// Direct sub-records in file order.
    pub fn sub_records(&self) -> impl Iterator<Item = Record<'d>> + 'd {
        let doc = self.doc;
        doc.node(self.id)
            .children
            .iter()
            .map(move |&id| Record::new(doc, id))
    }

    pub fn parent(&self) -> Option<Record<'d>> {
        self.doc
            .node(self.id)
            .parent
            .map(|id| Record::new(self.doc, id))
    }

    /// The level-0 record this record belongs to.
    pub fn root(&self) -> Record<'d> {
        let mut current = *self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    pub fn is_pointer(&self) -> bool {
        self.value().map_or(false, is_pointer)
    }

    pub fn kind(&self) -> RecordKind {
        RecordKind::of(self.tag(), self.value())
    }

    /// Narrow the record to its specialized variant.
    pub fn specialize(self) -> Specialized<'d> {
        match self.kind() {
            RecordKind::Generic => Specialized::Generic(self),
            RecordKind::Name => Specialized::Name(NameRecord(self)),
            RecordKind::Date => Specialized::Date(DateRecord(self)),
            RecordKind::Individual => Specialized::Individual(Individual(self)),
            RecordKind::Pointer => Specialized::Pointer(Pointer(self)),
        }
    }

    pub fn as_pointer(self) -> Option<Pointer<'d>> {
        self.is_pointer().then_some(Pointer(self))
    }

    pub fn as_name(self) -> Option<NameRecord<'d>> {
        (self.kind() == RecordKind::Name).then_some(NameRecord(self))
    }

    pub fn as_date(self) -> Option<DateRecord<'d>> {
        (self.kind() == RecordKind::Date).then_some(DateRecord(self))
    }

    pub fn as_individual(self) -> Option<Individual<'d>> {
        (self.kind() == RecordKind::Individual).then_some(Individual(self))
    }

    /// The record itself, or its target when it is a pointer. `None` for a
    /// pointer whose target is not defined.
    pub fn dereference(self) -> Option<Record<'d>> {
        match self.as_pointer() {
            Some(pointer) => pointer.resolve(),
            None => Some(self),
        }
    }

    /// Walk a slash-separated tag path, taking the first matching
    /// sub-record at each step.
    ///
    /// With `follow`, pointers met along the way are replaced by their
    /// targets.
    pub fn sub_tag(&self, path: &str, follow: bool) -> SubTag<'d> {
        let mut steps = path.split('/').filter(|s| !s.is_empty()).peekable();
        if steps.peek().is_none() {
            return SubTag::Absent;
        }
        let mut current = *self;
        for step in steps {
            let Some(child) = current.sub_records().find(|r| r.tag() == step) else {
                return SubTag::Absent;
            };
            current = child;
            if follow {
                if let Some(pointer) = child.as_pointer() {
                    match pointer.resolve() {
                        Some(target) => current = target,
                        None => return SubTag::Unresolved(pointer),
                    }
                }
            }
        }
        SubTag::Found(current)
    }

    /// [`sub_tag`](Self::sub_tag) projected onto the value.
    pub fn sub_tag_value(&self, path: &str, follow: bool) -> SubTag<'d, Option<&'d str>> {
        self.sub_tag(path, follow).map(|r| r.value())
    }

    /// Collect sub-records matching any of the tag paths.
    ///
    /// With no paths this is every direct sub-record. Otherwise every
    /// descendant whose tag path from this record equals one of `tags` is
    /// returned, in file order. With `follow`, pointers are resolved along
    /// the way and unresolved ones are dropped.
    pub fn sub_tags(&self, tags: &[&str], follow: bool) -> Vec<Record<'d>> {
        if tags.is_empty() {
            return self
                .sub_records()
                .filter_map(|r| if follow { r.dereference() } else { Some(r) })
                .collect();
        }
        let paths: Vec<Vec<&str>> = tags
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| t.split('/').collect())
            .collect();
        let mut out = Vec::new();
        collect_sub_tags(*self, &paths, &[], follow, &mut out);
        out
    }

    /// Parsed DATE value, computed on first access.
    pub(crate) fn date_value(&self) -> &'d DateValue {
        self.doc
            .node(self.id)
            .date
            .get_or_init(|| DateValue::parse(self.value().unwrap_or("")))
    }

    /// Decomposed NAME value, computed on first access.
    pub(crate) fn name_parts(&self) -> &'d NameParts {
        self.doc.node(self.id).name.get_or_init(|| {
            let dialect = self.dialect();
            let married = match dialect {
                Dialect::MyHeritage => self
                    .sub_records()
                    .find(|r| r.tag() == "_MARNM")
                    .and_then(|r| r.value()),
                _ => None,
            };
            NameParts::decompose(self.value().unwrap_or(""), dialect, married)
        })
    }
}

fn collect_sub_tags<'d>(
    record: Record<'d>,
    paths: &[Vec<&str>],
    prefix: &[&str],
    follow: bool,
    out: &mut Vec<Record<'d>>,
) {
    for child in record.sub_records() {
        let mut tag_path = prefix.to_vec();
        tag_path.push(child.tag());
        let Some(path) = paths.iter().find(|p| p.starts_with(&tag_path)) else {
            continue;
        };
        let target = if follow { child.dereference() } else { Some(child) };
        if let Some(target) = target {
            if path.len() == tag_path.len() {
                out.push(target);
            } else {
                collect_sub_tags(target, paths, &tag_path, follow, out);
            }
        }
    }
}

impl PartialEq for Record<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Record<'_> {}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.doc.node(self.id);
        f.debug_struct("Record")
            .field("level", &node.level)
            .field("xref_id", &node.xref_id)
            .field("tag", &node.tag)
            .field("value", &node.value)
            .field("offset", &node.offset)
            .field("sub_records", &node.children.len())
            .finish()
    }
}

macro_rules! record_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'d>(Record<'d>);

        impl<'d> $name<'d> {
            /// The underlying record.
            pub fn record(&self) -> Record<'d> {
                self.0
            }
        }

        impl<'d> Deref for $name<'d> {
            type Target = Record<'d>;

            fn deref(&self) -> &Record<'d> {
                &self.0
            }
        }
    };
}

record_view!(
    /// A record whose value is a cross-reference id.
    Pointer
);
record_view!(
    /// A `DATE` record.
    DateRecord
);
record_view!(
    /// A `NAME` record.
    NameRecord
);
record_view!(
    /// An `INDI` record.
    Individual
);

impl<'d> Pointer<'d> {
    /// The referenced id, `@` delimiters included.
    pub fn target_id(&self) -> &'d str {
        self.0.value().unwrap_or("")
    }

    /// The level-0 record the pointer names, if it is defined.
    pub fn resolve(&self) -> Option<Record<'d>> {
        self.0.document().lookup(self.target_id())
    }
}

impl<'d> DateRecord<'d> {
    /// The parsed date. Unparseable text becomes a phrase.
    pub fn date(&self) -> &'d DateValue {
        self.0.date_value()
    }
}

impl<'d> NameRecord<'d> {
    pub fn parts(&self) -> &'d NameParts {
        self.0.name_parts()
    }

    /// Value of the `TYPE` sub-record: "aka", "birth", "maiden" and so on.
    pub fn name_type(&self) -> Option<&'d str> {
        self.0.sub_tag_value("TYPE", false).found().flatten()
    }
}

impl<'d> Individual<'d> {
    /// Summary of the individual's NAME records.
    pub fn name(&self) -> Name<'d> {
        let names = self.0.sub_records().filter_map(Record::as_name).collect();
        Name::new(names, self.0.dialect())
    }

    /// Value of `SEX`, `"U"` when missing.
    pub fn sex(&self) -> &'d str {
        self.0
            .sub_tag_value("SEX", false)
            .found()
            .flatten()
            .unwrap_or("U")
    }

    pub fn father(&self) -> Option<Individual<'d>> {
        self.parent_via("FAMC/HUSB")
    }

    pub fn mother(&self) -> Option<Individual<'d>> {
        self.parent_via("FAMC/WIFE")
    }

    fn parent_via(&self, path: &str) -> Option<Individual<'d>> {
        self.0
            .sub_tag(path, true)
            .found()
            .and_then(Record::as_individual)
    }

    pub fn birth_date(&self) -> Option<&'d DateValue> {
        self.event_date("BIRT")
    }

    pub fn death_date(&self) -> Option<&'d DateValue> {
        self.event_date("DEAT")
    }

    fn event_date(&self, event: &str) -> Option<&'d DateValue> {
        self.0
            .sub_tag(&format!("{}/DATE", event), false)
            .found()
            .and_then(Record::as_date)
            .map(|d| d.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_bytes;

    const FAMILY: &[u8] = b"0 HEAD
1 SOUR PAF
0 @I1@ INDI
1 NAME John /Smith/
1 SEX M
1 FAMS @F1@
0 @I2@ INDI
1 NAME Mary /Jones/
1 SEX F
1 FAMS @F1@
0 @I3@ INDI
1 NAME Bob /Smith/
1 BIRT
2 DATE ABT 1900
1 FAMC @F1@
1 FAMC @F9@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 NOTE @N1@
0 TRLR
";

    // ==================== Dispatch tests ====================

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(RecordKind::of("INDI", None), RecordKind::Individual);
        assert_eq!(RecordKind::of("NAME", Some("John /Smith/")), RecordKind::Name);
        assert_eq!(RecordKind::of("DATE", Some("1900")), RecordKind::Date);
        assert_eq!(RecordKind::of("NOTE", Some("text")), RecordKind::Generic);
        assert_eq!(RecordKind::of("NAME", Some("@I1@")), RecordKind::Pointer);
        assert_eq!(RecordKind::of("HUSB", Some("@I1@")), RecordKind::Pointer);
    }

    #[test]
    fn test_specialize() {
        let doc = parse_bytes(FAMILY).unwrap();
        let indi = doc.lookup("@I3@").unwrap();
        assert!(matches!(indi.specialize(), Specialized::Individual(_)));
        let famc = indi.sub_records().find(|r| r.tag() == "FAMC").unwrap();
        match famc.specialize() {
            Specialized::Pointer(p) => assert_eq!(p.target_id(), "@F1@"),
            other => panic!("expected pointer, got {:?}", other),
        }
    }

    // ==================== sub_tag tests ====================

    #[test]
    fn test_sub_tag_follow() {
        let doc = parse_bytes(FAMILY).unwrap();
        let bob = doc.lookup("@I3@").unwrap();

        let fam = bob.sub_tag("FAMC", true).found().unwrap();
        assert_eq!(fam.tag(), "FAM");
        assert_eq!(fam.xref_id(), Some("@F1@"));

        let famc = bob.sub_tag("FAMC", false).found().unwrap();
        assert_eq!(famc.tag(), "FAMC");
        assert_eq!(famc.level(), 1);

        let husb = bob.sub_tag("FAMC/HUSB", true).found().unwrap();
        assert_eq!(husb.xref_id(), Some("@I1@"));
    }

    #[test]
    fn test_sub_tag_outcomes() {
        let doc = parse_bytes(FAMILY).unwrap();
        let fam = doc.lookup("@F1@").unwrap();
        assert!(fam.sub_tag("MARR", true).is_absent());
        assert!(fam.sub_tag("HUSB/NAME/GIVN", true).is_absent());
        match fam.sub_tag("NOTE", true) {
            SubTag::Unresolved(p) => assert_eq!(p.target_id(), "@N1@"),
            other => panic!("expected unresolved, got {:?}", other),
        }
        assert!(fam.sub_tag("", true).is_absent());
    }

    #[test]
    fn test_sub_tag_value() {
        let doc = parse_bytes(FAMILY).unwrap();
        let bob = doc.lookup("@I3@").unwrap();
        assert_eq!(bob.sub_tag_value("BIRT/DATE", false).found(), Some(Some("ABT 1900")));
        assert_eq!(bob.sub_tag_value("BIRT", false).found(), Some(None));
        assert!(bob.sub_tag_value("DEAT/DATE", false).is_absent());
        assert_eq!(
            bob.sub_tag_value("FAMC/HUSB/SEX", true).found().flatten(),
            Some("M")
        );
    }

    // ==================== sub_tags tests ====================

    #[test]
    fn test_sub_tags_direct() {
        let doc = parse_bytes(FAMILY).unwrap();
        let fam = doc.lookup("@F1@").unwrap();
        let targets: Vec<Option<&str>> =
            fam.sub_tags(&[], true).iter().map(|r| r.xref_id()).collect();
        assert_eq!(targets, vec![Some("@I1@"), Some("@I2@"), Some("@I3@")]);
        assert_eq!(fam.sub_tags(&[], false).len(), 4);
    }

    #[test]
    fn test_sub_tags_paths() {
        let doc = parse_bytes(FAMILY).unwrap();
        let bob = doc.lookup("@I3@").unwrap();
        let parents: Vec<&str> = bob
            .sub_tags(&["FAMC/HUSB", "FAMC/WIFE"], true)
            .iter()
            .filter_map(|r| r.xref_id())
            .collect();
        assert_eq!(parents, vec!["@I1@", "@I2@"]);

        let dates = bob.sub_tags(&["BIRT/DATE", ""], false);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].value(), Some("ABT 1900"));

        let famc = bob.sub_tags(&["FAMC"], false);
        assert_eq!(famc.len(), 2);
    }

    // ==================== Variant accessor tests ====================

    #[test]
    fn test_individual_accessors() {
        let doc = parse_bytes(FAMILY).unwrap();
        let bob = doc.lookup("@I3@").unwrap().as_individual().unwrap();
        assert_eq!(bob.sex(), "U");
        assert_eq!(bob.father().unwrap().name().format(), "John Smith");
        assert_eq!(bob.mother().unwrap().sex(), "F");
        assert_eq!(
            bob.birth_date().map(|d| d.to_string()),
            Some("ABT 1900".to_string())
        );
        assert!(bob.death_date().is_none());

        let john = doc.lookup("@I1@").unwrap().as_individual().unwrap();
        assert!(john.father().is_none());
    }

    #[test]
    fn test_date_record_is_memoized() {
        let doc = parse_bytes(FAMILY).unwrap();
        let bob = doc.lookup("@I3@").unwrap();
        let date = bob.sub_tag("BIRT/DATE", false).found().unwrap().as_date().unwrap();
        assert!(std::ptr::eq(date.date(), date.date()));
    }

    #[test]
    fn test_header_dialect_is_default() {
        let doc = parse_bytes(b"0 HEAD\n1 SOUR ALTREE\n2 NAME App /X (Y)/\n0 @I1@ INDI\n0 TRLR\n")
            .unwrap();
        assert_eq!(doc.dialect(), Dialect::Altree);
        let sour = doc.header().unwrap().sub_tag("SOUR", false).found().unwrap();
        assert_eq!(sour.dialect(), Dialect::Default);
        assert_eq!(doc.lookup("@I1@").unwrap().dialect(), Dialect::Altree);
    }

    #[test]
    fn test_parent_and_root() {
        let doc = parse_bytes(FAMILY).unwrap();
        let date = doc
            .lookup("@I3@")
            .unwrap()
            .sub_tag("BIRT/DATE", false)
            .found()
            .unwrap();
        assert_eq!(date.parent().unwrap().tag(), "BIRT");
        assert_eq!(date.root().xref_id(), Some("@I3@"));
        assert!(date.root().parent().is_none());
    }
}
