//! Single-writer editing session for one page.
//!
//! All mutations of the page go through one `Mutex<Editor>`. Async
//! operations copy what they need out of the editor, release the lock, await
//! the collaborator, then lock again to apply the result; the lock is never
//! held across an `.await`.

use std::sync::Arc;

use parking_lot::Mutex;

use kumitate_doc::{ApplyMode, BlockRegistry, Editor};
use kumitate_types::{BlockId, BlockRecord, PageId, SessionId};

use crate::config::SessionConfig;
use crate::error::{GenerateError, SessionResult};
use crate::generate::BlockGenerator;
use crate::store::PageStore;

/// Editing session: one page, one editor, its collaborators.
///
/// Cheap to clone; clones share the same editor.
#[derive(Clone)]
pub struct EditorSession {
    id: SessionId,
    page: PageId,
    editor: Arc<Mutex<Editor>>,
    store: Arc<dyn PageStore>,
    generator: Option<Arc<dyn BlockGenerator>>,
}

impl EditorSession {
    /// Start a session over an empty page. Call [`EditorSession::load`] to
    /// pull the stored version.
    pub fn new(
        page: PageId,
        registry: Arc<BlockRegistry>,
        config: &SessionConfig,
        store: Arc<dyn PageStore>,
    ) -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id.short(), %page, store = store.name(), "session created");
        Self {
            id,
            page,
            editor: Arc::new(Mutex::new(Editor::with_config(registry, config.editor_config()))),
            store,
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn BlockGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    /// Run a synchronous operation against the editor.
    ///
    /// The closure runs under the session lock; keep it short and never
    /// block inside it.
    pub fn with_editor<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> R {
        f(&mut *self.editor.lock())
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.lock().is_dirty()
    }

    /// Boundary form of the current page.
    pub fn records(&self) -> Vec<BlockRecord> {
        self.editor.lock().records()
    }

    /// Replace the editor contents with the stored page.
    ///
    /// On success history is cleared and the page is clean. A page that fails
    /// validation (for example one that references a removed block type) is
    /// rejected whole and the editor is left as it was.
    #[tracing::instrument(skip(self), fields(session = %self.id.short(), page = %self.page))]
    pub async fn load(&self) -> SessionResult<usize> {
        let records = self.store.load(self.page).await?;
        let count = records.len();
        self.editor
            .lock()
            .load(records)
            .inspect_err(|e| tracing::warn!("rejected stored page: {e}"))?;
        tracing::info!(count, "page loaded");
        Ok(count)
    }

    /// Persist the current page. Returns the version that was saved.
    ///
    /// The page is marked clean only if nothing changed while the store was
    /// writing; edits made in the meantime keep it dirty.
    #[tracing::instrument(skip(self), fields(session = %self.id.short(), page = %self.page))]
    pub async fn save(&self) -> SessionResult<u64> {
        let (records, version) = {
            let editor = self.editor.lock();
            (editor.records(), editor.version())
        };

        self.store
            .save(self.page, &records)
            .await
            .inspect_err(|e| tracing::warn!("save failed: {e}"))?;

        let clean = self.editor.lock().mark_saved(version);
        tracing::info!(version, blocks = records.len(), clean, "page saved");
        Ok(version)
    }

    /// Save only if there are unsaved changes. Returns whether it saved.
    pub async fn save_if_dirty(&self) -> SessionResult<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.save().await?;
        Ok(true)
    }

    /// Ask the generator for blocks and apply them as one undoable step.
    ///
    /// Generator failures leave the page untouched. Returns the IDs of the
    /// applied blocks.
    #[tracing::instrument(skip(self), fields(session = %self.id.short(), page = %self.page))]
    pub async fn generate(&self, prompt: &str, mode: ApplyMode) -> SessionResult<Vec<BlockId>> {
        let generator = self
            .generator
            .clone()
            .ok_or_else(|| GenerateError::Unavailable("no generator configured".into()))?;
        let current = self.records();

        let proposals = generator
            .generate(prompt, &current)
            .await
            .inspect_err(|e| tracing::warn!(generator = generator.name(), "generation failed: {e}"))?;

        let ids = self
            .editor
            .lock()
            .apply_generated(proposals, mode)
            .inspect_err(|e| tracing::warn!("rejected generated blocks: {e}"))?;
        tracing::info!(count = ids.len(), ?mode, "generated blocks applied");
        Ok(ids)
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("id", &self.id)
            .field("page", &self.page)
            .field("store", &self.store.name())
            .field("generator", &self.generator.as_ref().map(|g| g.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use kumitate_doc::DocError;
    use kumitate_types::BlockType;

    use super::*;
    use crate::error::{SessionError, StoreError};
    use crate::generate::{CatalogGenerator, GenerateResult};
    use crate::store::{JsonFilePageStore, MemoryPageStore, StoreResult};

    fn registry() -> Arc<BlockRegistry> {
        Arc::new(BlockRegistry::builtin().unwrap())
    }

    fn session(store: Arc<dyn PageStore>) -> EditorSession {
        EditorSession::new(PageId::new(), registry(), &SessionConfig::default(), store)
    }

    /// Store whose saves always fail.
    struct DownStore;

    #[async_trait]
    impl PageStore for DownStore {
        fn name(&self) -> &str {
            "down"
        }
        async fn load(&self, page: PageId) -> StoreResult<Vec<BlockRecord>> {
            Err(StoreError::NotFound(page))
        }
        async fn save(&self, _: PageId, _: &[BlockRecord]) -> StoreResult<()> {
            Err(StoreError::failure("connection reset"))
        }
        async fn list(&self) -> StoreResult<Vec<PageId>> {
            Ok(Vec::new())
        }
    }

    /// Store whose save pauses until released.
    #[derive(Default)]
    struct GatedStore {
        inner: MemoryPageStore,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl PageStore for GatedStore {
        fn name(&self) -> &str {
            "gated"
        }
        async fn load(&self, page: PageId) -> StoreResult<Vec<BlockRecord>> {
            self.inner.load(page).await
        }
        async fn save(&self, page: PageId, blocks: &[BlockRecord]) -> StoreResult<()> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.save(page, blocks).await
        }
        async fn list(&self) -> StoreResult<Vec<PageId>> {
            self.inner.list().await
        }
    }

    struct ThrottledGenerator;

    #[async_trait]
    impl BlockGenerator for ThrottledGenerator {
        fn name(&self) -> &str {
            "throttled"
        }
        async fn generate(&self, _: &str, _: &[BlockRecord]) -> GenerateResult<Vec<BlockRecord>> {
            Err(GenerateError::RateLimited("try again in 30s".into()))
        }
    }

    struct FixedGenerator(Vec<BlockRecord>);

    #[async_trait]
    impl BlockGenerator for FixedGenerator {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn generate(&self, _: &str, _: &[BlockRecord]) -> GenerateResult<Vec<BlockRecord>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let store: Arc<dyn PageStore> = Arc::new(MemoryPageStore::new());
        let s = session(store.clone());
        s.with_editor(|e| {
            e.insert("hero", None).unwrap();
            e.insert("footer", None).unwrap();
        });
        assert!(s.is_dirty());

        s.save().await.unwrap();
        assert!(!s.is_dirty());

        let other = EditorSession::new(s.page(), registry(), &SessionConfig::default(), store);
        assert_eq!(other.load().await.unwrap(), 2);
        assert_eq!(other.records(), s.records());
        assert!(!other.is_dirty());
        assert!(!other.with_editor(|e| e.can_undo()));
    }

    #[tokio::test]
    async fn test_non_finite_edit_never_reaches_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn PageStore> = Arc::new(JsonFilePageStore::open(dir.path()).await.unwrap());
        let s = session(store.clone());
        let hero = s.with_editor(|e| e.insert("hero", None).unwrap().id);

        let rejected = s.with_editor(|e| e.update_style(&hero, "padding", f64::NAN));
        assert!(matches!(rejected, Err(DocError::InvalidValue { .. })));
        s.with_editor(|e| e.update_style(&hero, "padding", 32.0).unwrap());
        s.save().await.unwrap();

        let other = EditorSession::new(s.page(), registry(), &SessionConfig::default(), store);
        assert_eq!(other.load().await.unwrap(), 1);
        assert_eq!(other.records(), s.records());
    }

    #[tokio::test]
    async fn test_generated_non_finite_value_is_rejected() {
        let generator = FixedGenerator(vec![BlockRecord::new("hero").with_style("padding", f64::INFINITY)]);
        let s = session(Arc::new(MemoryPageStore::new())).with_generator(Arc::new(generator));

        let err = s.generate("anything", ApplyMode::Append).await.unwrap_err();
        assert!(matches!(err, SessionError::Doc(DocError::InvalidValue { .. })));
        assert!(s.records().is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_page() {
        let s = session(Arc::new(MemoryPageStore::new()));
        assert!(matches!(
            s.load().await,
            Err(SessionError::Store(StoreError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_removed_block_type() {
        let page = PageId::new();
        let store = Arc::new(MemoryPageStore::with_pages([(
            page,
            vec![BlockRecord::new("hero"), BlockRecord::new("marquee")],
        )]));
        let s = EditorSession::new(page, registry(), &SessionConfig::default(), store);
        s.with_editor(|e| e.insert("text", None).unwrap());
        let before = s.records();

        let err = s.load().await.unwrap_err();
        assert!(matches!(err, SessionError::Doc(DocError::UnknownBlockType { .. })));
        assert_eq!(s.records(), before);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_dirty() {
        let s = session(Arc::new(DownStore));
        s.with_editor(|e| e.insert("hero", None).unwrap());

        let err = s.save().await.unwrap_err();
        assert!(err.is_collaborator());
        assert!(s.is_dirty());
        assert_eq!(s.records().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_during_save_keeps_dirty() {
        let store = Arc::new(GatedStore::default());
        let s = session(store.clone());
        s.with_editor(|e| e.insert("hero", None).unwrap());

        let saving = {
            let s = s.clone();
            tokio::spawn(async move { s.save().await })
        };
        store.entered.notified().await;
        s.with_editor(|e| e.insert("faq", None).unwrap());
        store.release.notify_one();

        let saved_version = saving.await.unwrap().unwrap();
        assert!(s.is_dirty());
        assert!(s.with_editor(|e| e.version()) > saved_version);

        // A second save catches up.
        store.release.notify_one();
        assert!(s.save_if_dirty().await.unwrap());
        assert!(!s.is_dirty());
    }

    #[tokio::test]
    async fn test_save_if_dirty_skips_clean_page() {
        let s = session(Arc::new(DownStore));
        assert!(!s.save_if_dirty().await.unwrap());
    }

    #[tokio::test]
    async fn test_generate_without_generator() {
        let s = session(Arc::new(MemoryPageStore::new()));
        let err = s.generate("landing page", ApplyMode::Append).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Generate(GenerateError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_failure_leaves_page_untouched() {
        let s = session(Arc::new(MemoryPageStore::new())).with_generator(Arc::new(ThrottledGenerator));
        s.with_editor(|e| e.insert("hero", None).unwrap());
        let before = s.records();

        let err = s.generate("pricing", ApplyMode::Replace).await.unwrap_err();
        match err {
            SessionError::Generate(e) => assert!(e.is_retryable()),
            other => panic!("expected generate error, got {other:?}"),
        }
        assert_eq!(s.records(), before);
    }

    #[tokio::test]
    async fn test_generated_batch_with_unknown_type_is_rejected() {
        let generator = FixedGenerator(vec![BlockRecord::new("faq"), BlockRecord::new("hologram")]);
        let s = session(Arc::new(MemoryPageStore::new())).with_generator(Arc::new(generator));

        let err = s.generate("anything", ApplyMode::Append).await.unwrap_err();
        assert!(matches!(err, SessionError::Doc(DocError::UnknownBlockType { .. })));
        assert!(s.records().is_empty());
        assert!(!s.is_dirty());
    }

    #[tokio::test]
    async fn test_generate_with_catalog_is_undoable() {
        let reg = registry();
        let s = EditorSession::new(
            PageId::new(),
            reg.clone(),
            &SessionConfig::default(),
            Arc::new(MemoryPageStore::new()),
        )
        .with_generator(Arc::new(CatalogGenerator::new(reg)));

        let ids = s.generate("team and testimonials", ApplyMode::Append).await.unwrap();
        assert!(!ids.is_empty());
        let types: Vec<BlockType> = s.with_editor(|e| e.blocks().iter().map(|b| b.block_type).collect());
        assert!(types.contains(&BlockType::Team));
        assert!(types.contains(&BlockType::Testimonials));

        s.with_editor(|e| e.undo().unwrap());
        assert!(s.records().is_empty());
    }
}
