//! Block generation collaborators.
//!
//! A generator turns a natural-language prompt into proposed blocks. The
//! proposals are plain boundary records; the editor validates them like any
//! other batch before anything is applied.

use std::sync::Arc;

use async_trait::async_trait;

use kumitate_doc::BlockRegistry;
use kumitate_types::{BlockRecord, BlockType};

use crate::error::GenerateError;

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Text-to-blocks service.
#[async_trait]
pub trait BlockGenerator: Send + Sync {
    /// Generator name for logs.
    fn name(&self) -> &str;

    /// Propose blocks for `prompt`. `current` is the page as it stands.
    async fn generate(&self, prompt: &str, current: &[BlockRecord]) -> GenerateResult<Vec<BlockRecord>>;
}

/// Offline generator that matches prompt words against the registry.
///
/// Every block type whose label, description, or category contains a word of
/// the prompt is proposed once, in registry order. Navbars and footers are
/// skipped when the page already has one. If nothing matches, a hero and a
/// call-to-action are proposed, with the hero titled after the prompt.
#[derive(Debug, Clone)]
pub struct CatalogGenerator {
    registry: Arc<BlockRegistry>,
}

/// Words shorter than this are ignored.
const MIN_WORD_LEN: usize = 3;

impl CatalogGenerator {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self { registry }
    }

    fn words(prompt: &str) -> Vec<String> {
        prompt
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= MIN_WORD_LEN)
            .map(str::to_lowercase)
            .collect()
    }

    fn starter(prompt: &str) -> Vec<BlockRecord> {
        let mut hero = BlockRecord::new(BlockType::Hero.as_str());
        let title = prompt.trim();
        if !title.is_empty() {
            hero = hero.with_content("title", title);
        }
        vec![hero, BlockRecord::new(BlockType::CallToAction.as_str())]
    }
}

#[async_trait]
impl BlockGenerator for CatalogGenerator {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn generate(&self, prompt: &str, current: &[BlockRecord]) -> GenerateResult<Vec<BlockRecord>> {
        let words = Self::words(prompt);
        let present = |ty: BlockType| current.iter().any(|r| r.known_type() == Some(ty));

        let proposals: Vec<BlockRecord> = self
            .registry
            .definitions()
            .iter()
            .filter(|def| words.iter().any(|w| def.matches(w)))
            .filter(|def| {
                !matches!(def.block_type, BlockType::Navbar | BlockType::Footer)
                    || !present(def.block_type)
            })
            .map(|def| BlockRecord::new(def.block_type.as_str()))
            .collect();

        if proposals.is_empty() {
            tracing::debug!(prompt, "no catalog match, proposing starter blocks");
            return Ok(Self::starter(prompt));
        }
        Ok(proposals)
    }
}
