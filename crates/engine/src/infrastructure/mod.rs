//! Infrastructure implementations.
//!
//! Draft storage adapters, catalog loading, settings and logging.

pub mod catalog_loader;
pub mod draft_store;
pub mod logging;
pub mod ports;
pub mod settings;

pub use catalog_loader::{CatalogError, CatalogLoader};
pub use draft_store::{InMemoryDraftRepo, JsonFileDraftRepo, LayeredDraftRepo};
pub use ports::{DraftRepo, RepoError};
pub use settings::EngineSettings;
