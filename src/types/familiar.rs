//! Resolved relationship records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::path::RelationPath;
use super::person::{LabelBranch, Person, PersonId};

/// Closeness grade: 0 is self, growing with relational distance.
pub type Grade = u8;

/// Grade assigned to every path beyond the enumerated table depth.
pub const DEEPEST_TABLE_GRADE: Grade = 5;

/// Grade assigned to paths nothing can classify.
pub const UNCLASSIFIED_GRADE: Grade = 6;

/// Stable category of a relationship, independent of label wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationCode {
    /// The root itself.
    #[serde(rename = "self")]
    Myself,
    /// Current or former partner.
    Spouse,
    /// Sibling.
    Sibling,
    /// Parent.
    Parent,
    /// Child.
    Child,
    /// Grandparent.
    Grandparent,
    /// Great-grandparent.
    GreatGrandparent,
    /// Great-great-grandparent.
    GreatGreatGrandparent,
    /// Great-great-great-grandparent and beyond.
    GreatGreatGreatGrandparent,
    /// Grandchild.
    Grandchild,
    /// Great-grandchild.
    GreatGrandchild,
    /// Great-great-grandchild.
    GreatGreatGrandchild,
    /// Great-great-great-grandchild and beyond.
    GreatGreatGreatGrandchild,
    /// Uncle or aunt, by blood or marriage.
    Uncle,
    /// Nephew or niece.
    Nephew,
    /// Cousin.
    Cousin,
    /// Child of a step-parent.
    StepSibling,
    /// Child of a partner.
    StepChild,
    /// Partner of a parent.
    StepParent,
    /// Parent of a partner.
    ParentInLaw,
    /// Partner of a child.
    ChildInLaw,
    /// Partner of a sibling, or sibling of a partner.
    SiblingInLaw,
    /// Anything else.
    Other,
}

impl RelationCode {
    /// Wire name of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Myself => "self",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Grandparent => "grandparent",
            Self::GreatGrandparent => "great_grandparent",
            Self::GreatGreatGrandparent => "great_great_grandparent",
            Self::GreatGreatGreatGrandparent => "great_great_great_grandparent",
            Self::Grandchild => "grandchild",
            Self::GreatGrandchild => "great_grandchild",
            Self::GreatGreatGrandchild => "great_great_grandchild",
            Self::GreatGreatGreatGrandchild => "great_great_great_grandchild",
            Self::Uncle => "uncle",
            Self::Nephew => "nephew",
            Self::Cousin => "cousin",
            Self::StepSibling => "step_sibling",
            Self::StepChild => "step_child",
            Self::StepParent => "step_parent",
            Self::ParentInLaw => "parent_in_law",
            Self::ChildInLaw => "child_in_law",
            Self::SiblingInLaw => "sibling_in_law",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for RelationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label with masculine and feminine wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenderedLabel {
    /// Masculine wording.
    pub male: &'static str,
    /// Feminine wording.
    pub female: &'static str,
}

impl GenderedLabel {
    /// Create a label pair.
    pub const fn new(male: &'static str, female: &'static str) -> Self {
        Self { male, female }
    }

    /// Wording for a branch.
    pub fn pick(&self, branch: LabelBranch) -> &'static str {
        match branch {
            LabelBranch::Male => self.male,
            LabelBranch::Female => self.female,
        }
    }
}

/// How one person is related to the root.
///
/// Created once per resolution pass for every reachable person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Familiar {
    /// Relationship category.
    pub relation_code: RelationCode,
    /// Human-readable label, absent for unclassifiable paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Shortest path from the root.
    pub relation_path: RelationPath,
    /// Closeness grade.
    pub grade: Grade,
    /// The related person.
    #[serde(rename = "data")]
    pub person: Person,
}

impl Familiar {
    /// Id of the related person.
    pub fn id(&self) -> &PersonId {
        &self.person.id
    }

    /// Label or a placeholder for unlabeled entries.
    pub fn relation_or_default(&self) -> &str {
        self.relation.as_deref().unwrap_or("?")
    }

    /// Whether this entry fell through every classification rule.
    pub fn is_unclassified(&self) -> bool {
        self.relation.is_none() && self.grade == UNCLASSIFIED_GRADE
    }
}
