//! Relationship paths.
//!
//! A path is the ordered hop sequence from the root to a person. It is kept
//! as a typed sequence and only rendered as `self -> parent -> parent` at
//! the edges (display, serialization).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::hop::HopKind;

const ROOT_TOKEN: &str = "self";
const SEPARATOR: &str = " -> ";

/// Error parsing a rendered relationship path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    /// The path does not start at `self`.
    #[error("Relation path must start with 'self': {0}")]
    MissingRoot(String),
    /// A token is not a known hop kind.
    #[error("Unknown hop in relation path: {0}")]
    UnknownHop(String),
}

/// Hop sequence from the root to a person.
///
/// The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelationPath(Vec<HopKind>);

impl RelationPath {
    /// The path of the root (`self`).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a path from hops.
    pub fn new(hops: Vec<HopKind>) -> Self {
        Self(hops)
    }

    /// The hops of the path.
    pub fn hops(&self) -> &[HopKind] {
        &self.0
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a hop in place.
    pub fn push(&mut self, hop: HopKind) {
        self.0.push(hop);
    }

    /// A copy of this path with one more hop.
    pub fn extended(&self, hop: HopKind) -> Self {
        let mut hops = Vec::with_capacity(self.0.len() + 1);
        hops.extend_from_slice(&self.0);
        hops.push(hop);
        Self(hops)
    }

    /// Length and kind of the trailing run of identical hops.
    ///
    /// Returns `None` for the root path.
    pub fn trailing_run(&self) -> Option<(HopKind, usize)> {
        let last = *self.0.last()?;
        let run = self.0.iter().rev().take_while(|hop| **hop == last).count();
        Some((last, run))
    }

    /// Whether every hop is `kind`.
    pub fn is_chain_of(&self, kind: HopKind) -> bool {
        !self.0.is_empty() && self.0.iter().all(|hop| *hop == kind)
    }
}

impl From<Vec<HopKind>> for RelationPath {
    fn from(hops: Vec<HopKind>) -> Self {
        Self(hops)
    }
}

impl From<&[HopKind]> for RelationPath {
    fn from(hops: &[HopKind]) -> Self {
        Self(hops.to_vec())
    }
}

impl fmt::Display for RelationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_TOKEN)?;
        for hop in &self.0 {
            write!(f, "{SEPARATOR}{hop}")?;
        }
        Ok(())
    }
}

impl FromStr for RelationPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split("->").map(str::trim);
        match tokens.next() {
            Some(ROOT_TOKEN) => {}
            _ => return Err(PathParseError::MissingRoot(s.to_string())),
        }

        let hops = tokens
            .map(|token| {
                HopKind::parse(token).ok_or_else(|| PathParseError::UnknownHop(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(hops))
    }
}

impl TryFrom<String> for RelationPath {
    type Error = PathParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RelationPath> for String {
    fn from(path: RelationPath) -> Self {
        path.to_string()
    }
}
