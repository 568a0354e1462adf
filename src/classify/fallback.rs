//! Generated labels for ancestor and descendant chains deeper than the table.
//!
//! A pure chain of `parent` (or `child`) hops longer than
//! [`MAX_ENUMERATED_CHAIN`] takes the deepest enumerated term and prefixes it
//! with `tras` once per extra hop: six parent hops read
//! "Trastrastatarabuelo", seven read "Trastrastrastatarabuelo".

use crate::types::{
    GenderedLabel, HopKind, LabelBranch, RelationCode, RelationPath, DEEPEST_TABLE_GRADE,
};
use super::table::MAX_ENUMERATED_CHAIN;
use super::Classification;

const MODIFIER: &str = "tras";

const DEEPEST_ANCESTOR: GenderedLabel = GenderedLabel::new("Trastatarabuelo", "Trastatarabuela");
const DEEPEST_DESCENDANT: GenderedLabel = GenderedLabel::new("Trastataranieto", "Trastataranieta");

/// Number of hops a pure chain runs past the table, if it is one.
pub fn extra_depth(path: &RelationPath) -> Option<(HopKind, usize)> {
    let (kind, run) = path.trailing_run()?;
    if run != path.len() || run <= MAX_ENUMERATED_CHAIN {
        return None;
    }
    match kind {
        HopKind::Parent | HopKind::Child => Some((kind, run - MAX_ENUMERATED_CHAIN)),
        HopKind::Sibling | HopKind::Spouse => None,
    }
}

/// Prefix `base` with the modifier `extra` times, keeping it capitalized.
pub fn deepen(base: &str, extra: usize) -> String {
    let mut label = String::with_capacity(base.len() + MODIFIER.len() * extra);
    for _ in 0..extra {
        label.push_str(MODIFIER);
    }
    label.push_str(&base.to_lowercase());
    capitalize(&label)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Classify a chain deeper than the table, or `None` if the path is not one.
pub fn classify_deep_chain(path: &RelationPath, branch: LabelBranch) -> Option<Classification> {
    let (kind, extra) = extra_depth(path)?;
    let (base, code) = match kind {
        HopKind::Parent => (DEEPEST_ANCESTOR, RelationCode::GreatGreatGreatGrandparent),
        _ => (DEEPEST_DESCENDANT, RelationCode::GreatGreatGreatGrandchild),
    };

    Some(Classification {
        code,
        grade: DEEPEST_TABLE_GRADE,
        label: Some(deepen(base.pick(branch), extra)),
    })
}
