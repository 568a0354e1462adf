//! Hop kinds: the edges a relationship path is made of.

use serde::{Deserialize, Serialize};

/// One edge traversal in the family graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HopKind {
    /// From a person to one of their parents.
    Parent,
    /// From a person to one of their children.
    Child,
    /// From a person to a declared sibling.
    Sibling,
    /// From a person to a partner.
    Spouse,
}

impl HopKind {
    /// All hop kinds, in declaration order.
    ///
    /// Traversal order is set by `Relationships::neighbors`, not by this list.
    pub const ALL: [HopKind; 4] = [Self::Parent, Self::Child, Self::Sibling, Self::Spouse];

    /// Parse a hop kind from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "parent" => Some(Self::Parent),
            "child" => Some(Self::Child),
            "sibling" => Some(Self::Sibling),
            "spouse" => Some(Self::Spouse),
            _ => None,
        }
    }

    /// Path token for this hop.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Sibling => "sibling",
            Self::Spouse => "spouse",
        }
    }
}

impl std::fmt::Display for HopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
