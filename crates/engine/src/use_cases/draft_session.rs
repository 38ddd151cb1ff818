//! Draft session: the live editing loop for one draft.
//!
//! Every edit is resolved synchronously so the caller always holds an
//! up-to-date [`ResolvedCharacter`]. Persistence happens off to the side: the
//! latest draft is published on a `watch` channel and a background saver
//! writes it once edits have been quiet for the debounce window. Bursts of
//! edits collapse into one write, and a failing repo never holds up
//! resolution.

use std::sync::Arc;
use std::time::Duration;

use charbldr_domain::{CharacterDraft, ChoiceType, DraftId, SourcePath};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::infrastructure::ports::{DraftRepo, RepoError};
use crate::resolution::{ResolutionEngine, ResolvedCharacter};

type FlushAck = oneshot::Sender<Result<(), RepoError>>;

pub struct DraftSession {
    engine: ResolutionEngine,
    repo: Arc<dyn DraftRepo>,
    drafts: watch::Sender<CharacterDraft>,
    resolved: ResolvedCharacter,
    flushes: mpsc::Sender<FlushAck>,
    saver: JoinHandle<()>,
}

impl DraftSession {
    /// Start a session on `draft`. The draft as given counts as saved.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        engine: ResolutionEngine,
        repo: Arc<dyn DraftRepo>,
        draft: CharacterDraft,
        debounce: Duration,
    ) -> Self {
        let resolved = engine.resolve(&draft);
        let saved = draft.clone();
        let (drafts, receiver) = watch::channel(draft);
        let (flushes, flush_requests) = mpsc::channel(4);

        let saver = tokio::spawn(
            Saver {
                repo: repo.clone(),
                drafts: receiver,
                flush_requests,
                debounce,
            }
            .run(saved),
        );

        tracing::debug!(draft_id = %resolved.draft_id, ?debounce, "Draft session started");
        Self {
            engine,
            repo,
            drafts,
            resolved,
            flushes,
            saver,
        }
    }

    /// Load a saved draft and start a session on it.
    pub async fn open(
        engine: ResolutionEngine,
        repo: Arc<dyn DraftRepo>,
        id: DraftId,
        debounce: Duration,
    ) -> Result<Self, RepoError> {
        let draft = repo.load(id).await?.ok_or(RepoError::NotFound(id))?;
        Ok(Self::start(engine, repo, draft, debounce))
    }

    pub fn id(&self) -> DraftId {
        self.resolved.draft_id
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> CharacterDraft {
        self.drafts.borrow().clone()
    }

    pub fn resolved(&self) -> &ResolvedCharacter {
        &self.resolved
    }

    /// Watch every accepted edit.
    pub fn subscribe(&self) -> watch::Receiver<CharacterDraft> {
        self.drafts.subscribe()
    }

    /// Replace the draft with `edit(draft)` and resolve it.
    pub fn update(
        &mut self,
        edit: impl FnOnce(CharacterDraft) -> CharacterDraft,
    ) -> &ResolvedCharacter {
        let next = edit(self.draft());
        self.resolved = self.engine.resolve(&next);
        self.drafts.send_replace(next);
        &self.resolved
    }

    /// Record the selections for one slot.
    pub fn record_choice<S: Into<String>>(
        &mut self,
        path: SourcePath,
        kind: ChoiceType,
        values: impl IntoIterator<Item = S>,
    ) -> &ResolvedCharacter {
        self.update(|draft| draft.with_choice(path, kind, values))
    }

    /// Save the current draft now, skipping the debounce.
    pub async fn flush(&self) -> Result<(), RepoError> {
        let (ack, done) = oneshot::channel();
        if self.flushes.send(ack).await.is_ok() {
            if let Ok(result) = done.await {
                return result;
            }
        }
        // Saver is gone; write directly.
        tracing::warn!(draft_id = %self.id(), "Draft saver stopped, saving inline");
        self.repo.save(&self.draft()).await
    }

    /// Flush and stop the saver.
    ///
    /// Dropping a session also writes any pending draft, but only `close`
    /// waits for it and reports the outcome.
    pub async fn close(self) -> Result<(), RepoError> {
        let result = self.flush().await;
        let Self {
            drafts,
            flushes,
            saver,
            ..
        } = self;
        drop(drafts);
        drop(flushes);
        if let Err(e) = saver.await {
            tracing::error!(error = %e, "Draft saver task failed");
        }
        result
    }
}

/// Background writer owned by one session.
struct Saver {
    repo: Arc<dyn DraftRepo>,
    drafts: watch::Receiver<CharacterDraft>,
    flush_requests: mpsc::Receiver<FlushAck>,
    debounce: Duration,
}

impl Saver {
    async fn run(mut self, mut last_saved: CharacterDraft) {
        let mut pending = false;
        let mut deadline = Instant::now();

        loop {
            tokio::select! {
                changed = self.drafts.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    pending = true;
                    deadline = Instant::now() + self.debounce;
                }
                _ = sleep_until(deadline), if pending => {
                    pending = false;
                    if let Err(e) = self.save_latest(&mut last_saved).await {
                        tracing::warn!(
                            draft_id = %last_saved.id(),
                            error = %e,
                            "Debounced draft save failed"
                        );
                    }
                }
                Some(ack) = self.flush_requests.recv() => {
                    pending = false;
                    let _ = ack.send(self.save_latest(&mut last_saved).await);
                }
            }
        }

        // Session dropped: write whatever is still unsaved.
        if let Err(e) = self.save_latest(&mut last_saved).await {
            tracing::warn!(draft_id = %last_saved.id(), error = %e, "Final draft save failed");
        }
    }

    /// Save the newest draft unless it matches what was last written.
    async fn save_latest(&self, last_saved: &mut CharacterDraft) -> Result<(), RepoError> {
        let latest = self.drafts.borrow().clone();
        if latest == *last_saved {
            return Ok(());
        }
        self.repo.save(&latest).await?;
        tracing::debug!(draft_id = %latest.id(), "Draft saved");
        *last_saved = latest;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use charbldr_domain::Ability;

    use super::*;
    use crate::infrastructure::draft_store::InMemoryDraftRepo;
    use crate::infrastructure::ports::MockDraftRepo;
    use crate::test_fixtures::{catalog, drafts};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    #[derive(Default)]
    struct RecordingRepo {
        saved: Mutex<Vec<CharacterDraft>>,
    }

    impl RecordingRepo {
        fn saves(&self) -> Vec<CharacterDraft> {
            self.saved.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl DraftRepo for RecordingRepo {
        async fn load(&self, _id: DraftId) -> Result<Option<CharacterDraft>, RepoError> {
            Ok(None)
        }

        async fn save(&self, draft: &CharacterDraft) -> Result<(), RepoError> {
            self.saved.lock().expect("lock").push(draft.clone());
            Ok(())
        }
    }

    fn engine() -> ResolutionEngine {
        ResolutionEngine::new(Arc::new(catalog::srd()))
    }

    fn session(repo: Arc<RecordingRepo>) -> DraftSession {
        DraftSession::start(engine(), repo, drafts::dwarf_fighter(1), DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_collapses_bursts() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo.clone());

        session.update(|d| d.with_level(2));
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.update(|d| d.with_level(3));
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.update(|d| d.with_level(4));

        tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
        let saves = repo.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].level(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn each_edit_restarts_the_quiet_window() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo.clone());

        session.update(|d| d.with_name("Brottor"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(repo.saves().is_empty());

        session.update(|d| d.with_level(2));
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(repo.saves().is_empty());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(repo.saves().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_save_separately() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo.clone());

        session.update(|d| d.with_level(2));
        tokio::time::sleep(DEBOUNCE * 2).await;
        session.update(|d| d.with_level(3));
        tokio::time::sleep(DEBOUNCE * 2).await;

        let levels: Vec<u8> = repo.saves().iter().map(CharacterDraft::level).collect();
        assert_eq!(levels, vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_saves_without_waiting() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo.clone());

        session.update(|d| d.with_level(5));
        session.flush().await.expect("flush");
        assert_eq!(repo.saves().len(), 1);

        // Nothing new to write after the window passes.
        tokio::time::sleep(DEBOUNCE * 2).await;
        assert_eq!(repo.saves().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn untouched_session_never_saves() {
        let repo = Arc::new(RecordingRepo::default());
        let session = session(repo.clone());
        session.close().await.expect("close");
        assert!(repo.saves().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn close_writes_the_pending_draft() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo.clone());
        session.update(|d| d.with_name("Brottor"));
        session.close().await.expect("close");

        let saves = repo.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].basics().name, "Brottor");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_session_writes_the_pending_draft() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo.clone());
        session.update(|d| d.with_level(7));
        drop(session);

        tokio::time::sleep(Duration::from_millis(10)).await;
        let saves = repo.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].level(), 7);
    }

    #[tokio::test]
    async fn updates_resolve_immediately() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo);
        assert_eq!(session.resolved().ability_scores.score(Ability::Con), 15);

        let resolved = session.update(|d| d.with_ability_score(Ability::Con, 16));
        // 16 + 2 (dwarf)
        assert_eq!(resolved.ability_scores.score(Ability::Con), 18);
        assert_eq!(session.draft().basics().ability_scores.score(Ability::Con), 16);
    }

    #[tokio::test]
    async fn recording_choices_completes_the_draft() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo);
        let before = session.resolved().incomplete.len();
        assert!(before > 0);

        session.record_choice(SourcePath::race("dwarf", 0), ChoiceType::Tool, ["smiths-tools"]);
        session.record_choice(
            SourcePath::class("fighter", 1, 0),
            ChoiceType::Skill,
            ["athletics", "perception"],
        );
        session.record_choice(SourcePath::class("fighter", 1, 1), ChoiceType::Feature, ["defense"]);
        let resolved = session.record_choice(
            SourcePath::background("soldier", 0),
            ChoiceType::Tool,
            ["dice-set"],
        );
        assert!(resolved.is_complete());
    }

    #[tokio::test]
    async fn subscribers_see_each_edit() {
        let repo = Arc::new(RecordingRepo::default());
        let mut session = session(repo);
        let mut rx = session.subscribe();

        session.update(|d| d.with_level(3));
        rx.changed().await.expect("changed");
        assert_eq!(rx.borrow().level(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn save_failures_do_not_block_resolution() {
        let mut repo = MockDraftRepo::new();
        repo.expect_save()
            .returning(|_| Err(RepoError::remote("connection refused")));

        let mut session =
            DraftSession::start(engine(), Arc::new(repo), drafts::dwarf_fighter(1), DEBOUNCE);
        session.update(|d| d.with_level(2));
        tokio::time::sleep(DEBOUNCE * 2).await;

        let resolved = session.update(|d| d.with_level(3));
        assert_eq!(resolved.level, 3);

        let err = session.flush().await.expect_err("repo is down");
        assert!(matches!(err, RepoError::Remote(_)));
    }

    #[tokio::test]
    async fn open_loads_a_saved_draft() {
        let repo = Arc::new(InMemoryDraftRepo::new());
        let draft = drafts::complete_dwarf_fighter();
        repo.save(&draft).await.expect("seed");

        let session = DraftSession::open(engine(), repo, draft.id(), DEBOUNCE)
            .await
            .expect("open");
        assert_eq!(session.id(), draft.id());
        assert!(session.resolved().is_complete());
    }

    #[tokio::test]
    async fn open_unknown_draft_is_not_found() {
        let repo = Arc::new(InMemoryDraftRepo::new());
        let id = DraftId::new();
        let err = DraftSession::open(engine(), repo, id, DEBOUNCE)
            .await
            .err()
            .expect("missing draft");
        assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
    }
}
