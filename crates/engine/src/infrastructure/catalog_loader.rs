//! Loads the rules catalog from a JSON file.
//!
//! The file mirrors [`CatalogData`]: one array per entity type. Missing
//! arrays are empty; missing `skills` and `languages` fall back to the
//! standard 5e lists.

use std::path::{Path, PathBuf};

use charbldr_domain::{Catalog, CatalogData};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found at {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        if !fs::try_exists(&self.path).await? {
            return Err(CatalogError::NotFound(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path).await?;
        let data: CatalogData = serde_json::from_str(&content)?;

        tracing::info!(
            path = %self.path.display(),
            races = data.races.len(),
            classes = data.classes.len(),
            backgrounds = data.backgrounds.len(),
            feats = data.feats.len(),
            "Loaded catalog"
        );
        Ok(data.into())
    }

    /// Parse a catalog already in memory.
    pub fn parse(json: &str) -> Result<Catalog, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}
