//! Application state and composition.

use std::sync::Arc;

use charbldr_domain::{Catalog, CharacterDraft, DraftId};

use crate::infrastructure::{
    CatalogError, CatalogLoader, DraftRepo, EngineSettings, JsonFileDraftRepo, RepoError,
};
use crate::resolution::ResolutionEngine;
use crate::use_cases::DraftSession;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Main application state: the resolution engine, the draft store and the
/// settings they were built from.
#[derive(Clone)]
pub struct App {
    pub engine: ResolutionEngine,
    pub repo: Arc<dyn DraftRepo>,
    pub settings: EngineSettings,
}

impl App {
    pub fn new(engine: ResolutionEngine, repo: Arc<dyn DraftRepo>, settings: EngineSettings) -> Self {
        Self {
            engine,
            repo,
            settings,
        }
    }

    /// Wire the app from settings: catalog from `catalog_path` and a JSON
    /// draft store in `data_dir`.
    pub async fn from_settings(settings: EngineSettings) -> Result<Self, AppError> {
        let catalog = match &settings.catalog_path {
            Some(path) => CatalogLoader::new(path).load().await?,
            None => {
                tracing::warn!("No catalog configured, starting with an empty catalog");
                Catalog::new()
            }
        };
        let engine = ResolutionEngine::new(Arc::new(catalog))
            .with_default_ability_cap(settings.default_ability_cap);
        let repo = Arc::new(JsonFileDraftRepo::new(&settings.data_dir));

        tracing::info!(data_dir = %settings.data_dir.display(), "Draft store ready");
        Ok(Self::new(engine, repo, settings))
    }

    /// Start a session on a new draft.
    pub fn new_session(&self, draft: CharacterDraft) -> DraftSession {
        DraftSession::start(
            self.engine.clone(),
            self.repo.clone(),
            draft,
            self.settings.save_debounce(),
        )
    }

    /// Resume a saved draft.
    pub async fn open_session(&self, id: DraftId) -> Result<DraftSession, AppError> {
        let session = DraftSession::open(
            self.engine.clone(),
            self.repo.clone(),
            id,
            self.settings.save_debounce(),
        )
        .await?;
        Ok(session)
    }
}
