//! Core types for the kinship kernel.

pub mod person;
pub mod hop;
pub mod path;
pub mod familiar;
pub mod index;

pub use person::{PersonId, Person, Gender, LabelBranch, Relationships, Marriage};
pub use hop::HopKind;
pub use path::{RelationPath, PathParseError};
pub use familiar::{
    Familiar, RelationCode, GenderedLabel, Grade,
    DEEPEST_TABLE_GRADE, UNCLASSIFIED_GRADE,
};
pub use index::RelationshipIndex;
