//! Port traits for infrastructure boundaries.
//!
//! Draft persistence is the only abstraction in the engine. Resolution
//! never touches it; only [`DraftSession`](crate::use_cases::DraftSession)
//! and the binary do.

use async_trait::async_trait;
use charbldr_domain::{CharacterDraft, DraftId};

// =============================================================================
// Error Types
// =============================================================================

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Draft not found: {0}")]
    NotFound(DraftId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The remote store rejected or failed the request.
    #[error("Remote store error: {0}")]
    Remote(String),
}

impl RepoError {
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn remote(message: impl ToString) -> Self {
        Self::Remote(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

// =============================================================================
// Draft Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftRepo: Send + Sync {
    /// `Ok(None)` when no draft with this id was ever saved.
    async fn load(&self, id: DraftId) -> Result<Option<CharacterDraft>, RepoError>;
    async fn save(&self, draft: &CharacterDraft) -> Result<(), RepoError>;
}
