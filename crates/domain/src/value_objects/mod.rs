//! Value objects - Immutable objects defined by their attributes

mod ability;
mod formula;
mod proficiency;
mod source_path;

pub use ability::{Ability, AbilityScores, UNASSIGNED_SCORE};

// Closed formula AST for prepared-spell limits
pub use formula::{Formula, FormulaContext, FormulaError, FormulaVar};

pub use proficiency::{Proficiency, ProficiencyKind, ProficiencyTarget};

// Structured choice slot addresses
pub use source_path::{OriginKind, SourcePath};
