//! Path classification: relationship path to label, code and grade.

pub mod table;
pub mod fallback;

pub use table::{canonical_entries, lookup, LabelRule, PathEntry, MAX_ENUMERATED_CHAIN};
pub use fallback::{classify_deep_chain, deepen};

use crate::types::{Grade, LabelBranch, RelationCode, RelationPath, UNCLASSIFIED_GRADE};

/// Outcome of classifying one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Relationship category.
    pub code: RelationCode,
    /// Closeness grade.
    pub grade: Grade,
    /// Label, absent when the path is unclassifiable.
    pub label: Option<String>,
}

impl Classification {
    /// The degraded result for paths no rule covers.
    pub fn unclassified() -> Self {
        Self {
            code: RelationCode::Other,
            grade: UNCLASSIFIED_GRADE,
            label: None,
        }
    }
}

/// Classify a relationship path.
///
/// Tries the canonical table first, then the deep-chain fallback, and
/// degrades to [`Classification::unclassified`] otherwise. `marriage_active`
/// is only called for entries whose wording depends on the marriage.
pub fn classify(
    path: &RelationPath,
    branch: LabelBranch,
    marriage_active: impl FnOnce() -> bool,
) -> Classification {
    if let Some(entry) = lookup(path.hops()) {
        let active = entry.label.needs_marriage() && marriage_active();
        return Classification {
            code: entry.code,
            grade: entry.grade,
            label: Some(entry.label.render(branch, active).to_string()),
        };
    }

    classify_deep_chain(path, branch).unwrap_or_else(Classification::unclassified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HopKind::*;

    #[test]
    fn test_table_hit() {
        let c = classify(&RelationPath::new(vec![Parent, Sibling, Child]), LabelBranch::Female, || false);
        assert_eq!(c.code, RelationCode::Cousin);
        assert_eq!(c.grade, 4);
        assert_eq!(c.label.as_deref(), Some("Prima"));
    }

    #[test]
    fn test_marriage_state_only_read_when_needed() {
        let c = classify(&RelationPath::new(vec![Parent]), LabelBranch::Male, || {
            panic!("marriage state must not be read for a parent")
        });
        assert_eq!(c.label.as_deref(), Some("Padre"));

        let c = classify(&RelationPath::new(vec![Spouse]), LabelBranch::Male, || true);
        assert_eq!(c.label.as_deref(), Some("Esposo"));
        let c = classify(&RelationPath::new(vec![Child, Parent]), LabelBranch::Male, || false);
        assert_eq!(c.code, RelationCode::Spouse);
        assert_eq!(c.label.as_deref(), Some("Pareja"));
    }

    #[test]
    fn test_fallback_chain() {
        let c = classify(&RelationPath::new(vec![Child; 6]), LabelBranch::Male, || false);
        assert_eq!(c.grade, 5);
        assert_eq!(c.label.as_deref(), Some("Trastrastataranieto"));
    }

    #[test]
    fn test_unclassified() {
        let c = classify(&RelationPath::new(vec![Spouse, Spouse, Spouse]), LabelBranch::Male, || false);
        assert_eq!(c, Classification::unclassified());
        assert_eq!(c.grade, 6);
        assert_eq!(c.code, RelationCode::Other);
        assert!(c.label.is_none());
    }
}
