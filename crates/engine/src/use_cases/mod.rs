//! Use cases - User story orchestration.
//!
//! Resolution itself is pure and lives in [`crate::resolution`]; use cases
//! add persistence around it.

pub mod draft_session;

pub use draft_session::DraftSession;
