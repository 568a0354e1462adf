//! The closed table of canonical relationship paths.
//!
//! Each entry maps one hop sequence to a relation code, a closeness grade and
//! a gendered label. Entries cover direct ancestry and descent up to five
//! hops plus the common lateral combinations (siblings, steps, in-laws,
//! uncles, nephews, cousins).
//!
//! Codes: collateral variants (great-, second-, by-marriage) share the code
//! of their base relation. Step and in-law relations without a code of their
//! own (step-grandparents, step-grandchildren, grandparents-in-law,
//! co-parents-in-law) use `Other`.

use crate::types::{GenderedLabel, Grade, HopKind, LabelBranch, RelationCode};
use HopKind::{Child as C, Parent as P, Sibling as S, Spouse as M};

/// Deepest pure ancestor or descendant chain the table enumerates.
pub const MAX_ENUMERATED_CHAIN: usize = 5;

/// How an entry's label is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// Same wording regardless of marriage state.
    Fixed(GenderedLabel),
    /// Wording depends on whether the root's marriage to the person is active.
    ByMarriage {
        /// Active marriage.
        married: GenderedLabel,
        /// Former or unrecorded partnership.
        partner: GenderedLabel,
    },
}

impl LabelRule {
    /// Whether rendering needs the marriage state.
    pub fn needs_marriage(&self) -> bool {
        matches!(self, Self::ByMarriage { .. })
    }

    /// Render the label for a gender branch.
    pub fn render(&self, branch: LabelBranch, marriage_active: bool) -> &'static str {
        match self {
            Self::Fixed(label) => label.pick(branch),
            Self::ByMarriage { married, partner } => {
                if marriage_active {
                    married.pick(branch)
                } else {
                    partner.pick(branch)
                }
            }
        }
    }
}

/// One canonical path and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry {
    /// Hops from the root.
    pub hops: &'static [HopKind],
    /// Relationship category.
    pub code: RelationCode,
    /// Closeness grade.
    pub grade: Grade,
    /// Label wording.
    pub label: LabelRule,
}

const fn fixed(
    hops: &'static [HopKind],
    code: RelationCode,
    grade: Grade,
    male: &'static str,
    female: &'static str,
) -> PathEntry {
    PathEntry { hops, code, grade, label: LabelRule::Fixed(GenderedLabel::new(male, female)) }
}

const fn by_marriage(hops: &'static [HopKind]) -> PathEntry {
    PathEntry {
        hops,
        code: RelationCode::Spouse,
        grade: 0,
        label: LabelRule::ByMarriage {
            married: GenderedLabel::new("Esposo", "Esposa"),
            partner: GenderedLabel::new("Pareja", "Pareja"),
        },
    }
}

use RelationCode as R;

static CANONICAL_PATHS: &[PathEntry] = &[
    // grade 0
    fixed(&[], R::Myself, 0, "Yo", "Yo"),
    by_marriage(&[M]),
    by_marriage(&[C, P]),
    // grade 1
    fixed(&[P], R::Parent, 1, "Padre", "Madre"),
    fixed(&[C], R::Child, 1, "Hijo", "Hija"),
    fixed(&[P, M], R::StepParent, 1, "Padrastro", "Madrastra"),
    fixed(&[M, C], R::StepChild, 1, "Hijastro", "Hijastra"),
    fixed(&[M, P], R::ParentInLaw, 1, "Suegro", "Suegra"),
    // grade 2
    fixed(&[P, P], R::Grandparent, 2, "Abuelo", "Abuela"),
    fixed(&[C, C], R::Grandchild, 2, "Nieto", "Nieta"),
    fixed(&[S], R::Sibling, 2, "Hermano", "Hermana"),
    fixed(&[P, C], R::Sibling, 2, "Hermano", "Hermana"),
    fixed(&[S, S], R::Sibling, 2, "Hermano", "Hermana"),
    fixed(&[P, M, C], R::StepSibling, 2, "Hermanastro", "Hermanastra"),
    fixed(&[C, M], R::ChildInLaw, 2, "Yerno", "Nuera"),
    fixed(&[C, C, P], R::ChildInLaw, 2, "Yerno", "Nuera"),
    fixed(&[S, M], R::SiblingInLaw, 2, "Cuñado", "Cuñada"),
    fixed(&[M, S], R::SiblingInLaw, 2, "Cuñado", "Cuñada"),
    fixed(&[P, C, M], R::SiblingInLaw, 2, "Cuñado", "Cuñada"),
    fixed(&[M, P, C], R::SiblingInLaw, 2, "Cuñado", "Cuñada"),
    fixed(&[P, P, M], R::Other, 2, "Abuelastro", "Abuelastra"),
    fixed(&[M, P, P], R::Other, 2, "Abuelo político", "Abuela política"),
    fixed(&[M, C, C], R::Other, 2, "Nietastro", "Nietastra"),
    // grade 3
    fixed(&[P, P, P], R::GreatGrandparent, 3, "Bisabuelo", "Bisabuela"),
    fixed(&[C, C, C], R::GreatGrandchild, 3, "Bisnieto", "Bisnieta"),
    fixed(&[P, S], R::Uncle, 3, "Tío", "Tía"),
    fixed(&[P, P, C], R::Uncle, 3, "Tío", "Tía"),
    fixed(&[P, S, M], R::Uncle, 3, "Tío político", "Tía política"),
    fixed(&[P, P, C, M], R::Uncle, 3, "Tío político", "Tía política"),
    fixed(&[S, C], R::Nephew, 3, "Sobrino", "Sobrina"),
    fixed(&[P, C, C], R::Nephew, 3, "Sobrino", "Sobrina"),
    fixed(&[M, S, C], R::Nephew, 3, "Sobrino político", "Sobrina política"),
    fixed(&[M, S, M], R::SiblingInLaw, 3, "Concuñado", "Concuñada"),
    fixed(&[C, M, P], R::Other, 3, "Consuegro", "Consuegra"),
    // grade 4
    fixed(&[P, P, P, P], R::GreatGreatGrandparent, 4, "Tatarabuelo", "Tatarabuela"),
    fixed(&[C, C, C, C], R::GreatGreatGrandchild, 4, "Tataranieto", "Tataranieta"),
    fixed(&[P, S, C], R::Cousin, 4, "Primo", "Prima"),
    fixed(&[P, P, C, C], R::Cousin, 4, "Primo", "Prima"),
    fixed(&[P, P, S], R::Uncle, 4, "Tío abuelo", "Tía abuela"),
    fixed(&[P, P, P, C], R::Uncle, 4, "Tío abuelo", "Tía abuela"),
    fixed(&[S, C, C], R::Nephew, 4, "Sobrino nieto", "Sobrina nieta"),
    fixed(&[P, C, C, C], R::Nephew, 4, "Sobrino nieto", "Sobrina nieta"),
    // grade 5
    fixed(&[P, P, P, P, P], R::GreatGreatGreatGrandparent, 5, "Trastatarabuelo", "Trastatarabuela"),
    fixed(&[C, C, C, C, C], R::GreatGreatGreatGrandchild, 5, "Trastataranieto", "Trastataranieta"),
    fixed(&[P, S, C, C], R::Cousin, 5, "Sobrino segundo", "Sobrina segunda"),
    fixed(&[P, P, C, C, C], R::Cousin, 5, "Sobrino segundo", "Sobrina segunda"),
    fixed(&[P, P, S, C], R::Uncle, 5, "Tío segundo", "Tía segunda"),
    fixed(&[P, P, P, C, C], R::Uncle, 5, "Tío segundo", "Tía segunda"),
    fixed(&[P, P, S, C, C], R::Cousin, 5, "Primo segundo", "Prima segunda"),
    fixed(&[P, P, P, C, C, C], R::Cousin, 5, "Primo segundo", "Prima segunda"),
];

/// Every canonical path entry.
pub fn canonical_entries() -> &'static [PathEntry] {
    CANONICAL_PATHS
}

/// Find the entry for an exact hop sequence.
pub fn lookup(hops: &[HopKind]) -> Option<&'static PathEntry> {
    CANONICAL_PATHS.iter().find(|entry| entry.hops == hops)
}
