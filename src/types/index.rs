//! Grade-bucketed result of one resolution pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::familiar::{Familiar, Grade};
use super::person::PersonId;
use crate::canonical::{canonical_hash_hex, CanonicalError};

/// Everyone reachable from a root, bucketed by closeness grade.
///
/// Buckets are ordered by ascending grade; entries inside a bucket keep
/// the order in which the traversal discovered them. Only grades that hold
/// at least one entry are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipIndex {
    root: PersonId,
    grades: BTreeMap<Grade, Vec<Familiar>>,
}

impl RelationshipIndex {
    /// An index with no entries.
    pub fn empty(root: PersonId) -> Self {
        Self { root, grades: BTreeMap::new() }
    }

    pub(crate) fn push(&mut self, familiar: Familiar) {
        self.grades.entry(familiar.grade).or_default().push(familiar);
    }

    /// The root this index was resolved for.
    pub fn root(&self) -> &PersonId {
        &self.root
    }

    /// Buckets by grade.
    pub fn grades(&self) -> &BTreeMap<Grade, Vec<Familiar>> {
        &self.grades
    }

    /// Entries of one grade (empty if none).
    pub fn bucket(&self, grade: Grade) -> &[Familiar] {
        self.grades.get(&grade).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entry for a person, if reachable.
    pub fn familiar(&self, id: &PersonId) -> Option<&Familiar> {
        self.iter().find(|familiar| familiar.id() == id)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.grades.values().map(Vec::len).sum()
    }

    /// Whether nothing was reachable (root missing from the graph).
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// All entries, by grade then discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Familiar> {
        self.grades.values().flatten()
    }

    /// Entries no classification rule covered.
    pub fn unclassified(&self) -> impl Iterator<Item = &Familiar> {
        self.iter().filter(|familiar| familiar.is_unclassified())
    }

    /// Highest grade present.
    pub fn deepest_grade(&self) -> Option<Grade> {
        self.grades.keys().next_back().copied()
    }

    /// Content fingerprint (xxh64 of the canonical JSON form).
    pub fn fingerprint(&self) -> Result<String, CanonicalError> {
        canonical_hash_hex(self)
    }

    /// Take the buckets.
    pub fn into_grades(self) -> BTreeMap<Grade, Vec<Familiar>> {
        self.grades
    }
}
