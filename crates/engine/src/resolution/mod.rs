//! Character build resolution.
//!
//! Pure functions over an immutable draft and catalog:
//!
//! - `slots` - reachable choice nodes and the recursive slot walk
//! - `completeness` - which required choices are still open
//! - `aggregator` - fixed grants and chosen values merged into one snapshot
//! - `calculators` - HP, AC, spellcasting, modifiers and resource pools
//! - `resolver` - all of the above behind one [`ResolutionEngine`]

pub mod aggregator;
pub mod calculators;
pub mod completeness;
pub mod resolver;
pub mod slots;

pub use aggregator::Aggregator;
pub use completeness::{ChoicePath, CompletenessValidator, IncompleteChoice, Selection};
pub use resolver::{ResolutionEngine, ResolvedCharacter};
pub use slots::Page;
