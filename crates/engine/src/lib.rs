//! charbldr engine library.
//!
//! Resolves character drafts against a rules catalog and keeps live drafts
//! persisted.
//!
//! ## Structure
//!
//! - `resolution/` - Pure resolution: slot walking, aggregation, completeness, derived stats
//! - `use_cases/` - Draft sessions with debounced persistence
//! - `infrastructure/` - Draft repos, catalog loading, settings, logging (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod resolution;
pub mod use_cases;

/// Shared catalog and draft builders for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use resolution::{ResolutionEngine, ResolvedCharacter};
