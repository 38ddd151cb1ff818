//! Draft persistence adapters.
//!
//! - [`InMemoryDraftRepo`]: process-local, for tests and one-shot runs
//! - [`JsonFileDraftRepo`]: one `{id}.json` file per draft, the local cache
//! - [`LayeredDraftRepo`]: local cache in front of a remote store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use charbldr_domain::{CharacterDraft, DraftId};
use dashmap::DashMap;
use tokio::fs;

use super::ports::{DraftRepo, RepoError};

// =============================================================================
// In-memory
// =============================================================================

#[derive(Debug, Default)]
pub struct InMemoryDraftRepo {
    drafts: DashMap<DraftId, CharacterDraft>,
}

impl InMemoryDraftRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[async_trait]
impl DraftRepo for InMemoryDraftRepo {
    async fn load(&self, id: DraftId) -> Result<Option<CharacterDraft>, RepoError> {
        Ok(self.drafts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, draft: &CharacterDraft) -> Result<(), RepoError> {
        self.drafts.insert(draft.id(), draft.clone());
        Ok(())
    }
}

// =============================================================================
// JSON files
// =============================================================================

/// Stores each draft as pretty-printed JSON in `dir`.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-save leaves the previous version intact.
#[derive(Debug, Clone)]
pub struct JsonFileDraftRepo {
    dir: PathBuf,
}

impl JsonFileDraftRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: DraftId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl DraftRepo for JsonFileDraftRepo {
    async fn load(&self, id: DraftId) -> Result<Option<CharacterDraft>, RepoError> {
        let path = self.path_for(id);
        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let draft = serde_json::from_str(&json)?;
        Ok(Some(draft))
    }

    async fn save(&self, draft: &CharacterDraft) -> Result<(), RepoError> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(draft.id());
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(draft)?;
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &path).await?;

        tracing::debug!(draft_id = %draft.id(), path = %path.display(), "Saved draft");
        Ok(())
    }
}

// =============================================================================
// Local cache + remote
// =============================================================================

/// Writes through to both stores. Reads prefer the local cache and fall back
/// to the remote, warming the cache on a remote hit.
#[derive(Clone)]
pub struct LayeredDraftRepo {
    local: Arc<dyn DraftRepo>,
    remote: Arc<dyn DraftRepo>,
}

impl LayeredDraftRepo {
    pub fn new(local: Arc<dyn DraftRepo>, remote: Arc<dyn DraftRepo>) -> Self {
        Self { local, remote }
    }
}

#[async_trait]
impl DraftRepo for LayeredDraftRepo {
    async fn load(&self, id: DraftId) -> Result<Option<CharacterDraft>, RepoError> {
        match self.local.load(id).await {
            Ok(Some(draft)) => return Ok(Some(draft)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(draft_id = %id, error = %e, "Local draft cache unreadable");
            }
        }

        let Some(draft) = self.remote.load(id).await? else {
            return Ok(None);
        };
        if let Err(e) = self.local.save(&draft).await {
            tracing::warn!(draft_id = %id, error = %e, "Failed to warm local draft cache");
        }
        Ok(Some(draft))
    }

    /// The remote is written even when the local cache fails; its result is
    /// the one returned.
    async fn save(&self, draft: &CharacterDraft) -> Result<(), RepoError> {
        if let Err(e) = self.local.save(draft).await {
            tracing::warn!(draft_id = %draft.id(), error = %e, "Failed to write local draft cache");
        }
        self.remote.save(draft).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::infrastructure::ports::MockDraftRepo;
    use crate::test_fixtures::drafts;

    #[tokio::test]
    async fn in_memory_round_trip() {
        let repo = InMemoryDraftRepo::new();
        let draft = drafts::complete_dwarf_fighter();

        assert!(repo.load(draft.id()).await.expect("load").is_none());
        repo.save(&draft).await.expect("save");
        assert_eq!(repo.load(draft.id()).await.expect("load"), Some(draft));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn json_files_survive_a_new_repo_instance() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let dir = temp_dir.path().join("drafts");
        let draft = drafts::complete_dwarf_fighter();

        JsonFileDraftRepo::new(&dir).save(&draft).await.expect("save");

        let reopened = JsonFileDraftRepo::new(&dir);
        let loaded = reopened.load(draft.id()).await.expect("load");
        assert_eq!(loaded, Some(draft.clone()));
        assert!(dir.join(format!("{}.json", draft.id())).exists());
        assert!(!dir.join(format!("{}.json.tmp", draft.id())).exists());
    }

    #[tokio::test]
    async fn json_file_missing_is_none() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonFileDraftRepo::new(temp_dir.path());
        assert!(repo.load(DraftId::new()).await.expect("load").is_none());
    }

    #[tokio::test]
    async fn json_file_garbage_is_a_serialization_error() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonFileDraftRepo::new(temp_dir.path());
        let id = DraftId::new();
        std::fs::write(temp_dir.path().join(format!("{id}.json")), "{ nope").expect("write");

        let err = repo.load(id).await.expect_err("should fail");
        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[tokio::test]
    async fn layered_load_prefers_local() {
        let draft = drafts::complete_dwarf_fighter();
        let local = InMemoryDraftRepo::new();
        local.save(&draft).await.expect("seed");

        // No expectations: any remote call fails the test.
        let remote = MockDraftRepo::new();
        let repo = LayeredDraftRepo::new(Arc::new(local), Arc::new(remote));
        assert_eq!(repo.load(draft.id()).await.expect("load"), Some(draft));
    }

    #[tokio::test]
    async fn layered_load_falls_back_and_warms_cache() {
        let draft = drafts::complete_dwarf_fighter();
        let id = draft.id();

        let mut remote = MockDraftRepo::new();
        let remote_copy = draft.clone();
        remote
            .expect_load()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(remote_copy.clone())));

        let local = Arc::new(InMemoryDraftRepo::new());
        let repo = LayeredDraftRepo::new(local.clone(), Arc::new(remote));

        assert_eq!(repo.load(id).await.expect("load"), Some(draft.clone()));
        assert_eq!(local.load(id).await.expect("cached"), Some(draft.clone()));
        // Second load is served locally; the mock would panic on a second call.
        assert_eq!(repo.load(id).await.expect("load"), Some(draft));
    }

    #[tokio::test]
    async fn layered_save_writes_both() {
        let draft = drafts::complete_dwarf_fighter();
        let mut remote = MockDraftRepo::new();
        remote.expect_save().times(1).returning(|_| Ok(()));

        let local = Arc::new(InMemoryDraftRepo::new());
        let repo = LayeredDraftRepo::new(local.clone(), Arc::new(remote));
        repo.save(&draft).await.expect("save");
        assert_eq!(local.len(), 1);
    }

    #[tokio::test]
    async fn layered_save_reports_remote_failure_after_caching() {
        let draft = drafts::complete_dwarf_fighter();
        let mut remote = MockDraftRepo::new();
        remote
            .expect_save()
            .returning(|_| Err(RepoError::remote("503 from draft service")));

        let local = Arc::new(InMemoryDraftRepo::new());
        let repo = LayeredDraftRepo::new(local.clone(), Arc::new(remote));

        let err = repo.save(&draft).await.expect_err("remote down");
        assert!(matches!(err, RepoError::Remote(_)));
        assert_eq!(local.load(draft.id()).await.expect("load"), Some(draft));
    }

    #[tokio::test]
    async fn layered_save_reaches_remote_when_local_fails() {
        let draft = drafts::complete_dwarf_fighter();
        let id = draft.id();

        let mut local = MockDraftRepo::new();
        local
            .expect_save()
            .times(1)
            .returning(|_| Err(RepoError::Io(std::io::Error::other("disk full"))));
        let mut remote = MockDraftRepo::new();
        remote
            .expect_save()
            .withf(move |saved| saved.id() == id)
            .times(1)
            .returning(|_| Ok(()));

        let repo = LayeredDraftRepo::new(Arc::new(local), Arc::new(remote));
        repo.save(&draft).await.expect("remote accepted the draft");
    }
}
