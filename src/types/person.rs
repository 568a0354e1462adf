//! Person records for the family graph.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt;

use super::hop::HopKind;

/// Unique identifier for a person in the family graph.
///
/// Wraps the backend-assigned document id and implements `Ord` for
/// deterministic ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Create a new PersonId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random PersonId (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty (not yet assigned by a store).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Gender of a person.
///
/// Parsing is lenient: any value other than `male` or `female`
/// (case-insensitive) becomes `Unknown`, including `null` and non-string
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Not recorded or unrecognized.
    #[default]
    Unknown,
}

/// Which side of a gendered label pair to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelBranch {
    /// Masculine wording.
    Male,
    /// Feminine wording.
    Female,
}

impl Gender {
    /// Parse a gender value, case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// Label branch used for table lookups.
    ///
    /// Only `Female` selects the feminine wording; `Unknown` falls back to
    /// the masculine branch.
    pub fn label_branch(&self) -> LabelBranch {
        match self {
            Self::Female => LabelBranch::Female,
            Self::Male | Self::Unknown => LabelBranch::Male,
        }
    }
}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
            Some(serde_json::Value::String(s)) => Self::parse(&s),
            _ => Self::Unknown,
        })
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A marriage or partnership of a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marriage {
    /// The partner, absent when the partner is not recorded.
    #[serde(rename = "spouseID", default, skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<PersonId>,
    /// Current (`true`) or former partnership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Children born to this partnership.
    #[serde(rename = "childrenIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub children_ids: Vec<PersonId>,
}

impl Marriage {
    /// Create a marriage to a recorded spouse.
    pub fn with_spouse(spouse_id: impl Into<PersonId>, active: bool) -> Self {
        Self {
            spouse_id: Some(spouse_id.into()),
            active: Some(active),
            children_ids: Vec::new(),
        }
    }

    /// Add a child of this partnership.
    pub fn child(mut self, child_id: impl Into<PersonId>) -> Self {
        self.children_ids.push(child_id.into());
        self
    }

    /// Whether the partnership is current. Absent counts as former.
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }
}

/// Adjacency record of a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    /// First parent.
    #[serde(rename = "firstParentID", default, skip_serializing_if = "Option::is_none")]
    pub first_parent_id: Option<PersonId>,
    /// Second parent.
    #[serde(rename = "secondParentID", default, skip_serializing_if = "Option::is_none")]
    pub second_parent_id: Option<PersonId>,
    /// Explicitly declared siblings.
    #[serde(rename = "siblingsIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub siblings_ids: Vec<PersonId>,
    /// Marriages in recorded order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marriages: Vec<Marriage>,
}

impl Relationships {
    /// Every declared neighbor with the hop that reaches it.
    ///
    /// Order is fixed: first parent, second parent, then for each marriage
    /// its spouse followed by its children, then siblings. The resolver
    /// relies on this order to break ties between equally short paths.
    pub fn neighbors(&self) -> impl Iterator<Item = (HopKind, &PersonId)> + '_ {
        let parents = self
            .first_parent_id
            .iter()
            .chain(self.second_parent_id.iter())
            .map(|id| (HopKind::Parent, id));

        let marriages = self.marriages.iter().flat_map(|marriage| {
            marriage
                .spouse_id
                .iter()
                .map(|id| (HopKind::Spouse, id))
                .chain(marriage.children_ids.iter().map(|id| (HopKind::Child, id)))
        });

        let siblings = self.siblings_ids.iter().map(|id| (HopKind::Sibling, id));

        parents.chain(marriages).chain(siblings)
    }

    /// The marriage whose spouse is `spouse_id`.
    pub fn marriage_with(&self, spouse_id: &PersonId) -> Option<&Marriage> {
        self.marriages
            .iter()
            .find(|m| m.spouse_id.as_ref() == Some(spouse_id))
    }

    /// The marriage that lists `child_id` among its children.
    pub fn marriage_of_child(&self, child_id: &PersonId) -> Option<&Marriage> {
        self.marriages
            .iter()
            .find(|m| m.children_ids.contains(child_id))
    }
}

/// A person in the family graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier.
    #[serde(default = "empty_id")]
    pub id: PersonId,
    /// Given name.
    #[serde(default)]
    pub name: String,
    /// First surname.
    #[serde(default)]
    pub first_surname: String,
    /// Second surname.
    #[serde(default)]
    pub second_surname: String,
    /// Gender, drives label selection.
    #[serde(default)]
    pub gender: Gender,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Graph adjacency.
    #[serde(default)]
    pub relationships: Relationships,
}

fn empty_id() -> PersonId {
    PersonId::new("")
}

impl Person {
    /// Create a person with no relationships.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            first_surname: String::new(),
            second_surname: String::new(),
            gender,
            notes: None,
            relationships: Relationships::default(),
        }
    }

    /// Set both surnames.
    pub fn with_surnames(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.first_surname = first.into();
        self.second_surname = second.into();
        self
    }

    /// Set the parents.
    pub fn with_parents(mut self, first: Option<&str>, second: Option<&str>) -> Self {
        self.relationships.first_parent_id = first.map(PersonId::from);
        self.relationships.second_parent_id = second.map(PersonId::from);
        self
    }

    /// Add a declared sibling.
    pub fn with_sibling(mut self, sibling_id: impl Into<PersonId>) -> Self {
        self.relationships.siblings_ids.push(sibling_id.into());
        self
    }

    /// Add a marriage.
    pub fn with_marriage(mut self, marriage: Marriage) -> Self {
        self.relationships.marriages.push(marriage);
        self
    }

    /// Name followed by the non-empty surnames.
    pub fn display_name(&self) -> String {
        [&self.name, &self.first_surname, &self.second_surname]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
