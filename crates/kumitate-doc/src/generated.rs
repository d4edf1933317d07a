//! Applying externally proposed blocks (e.g. from a generator).
//!
//! Proposals arrive in boundary form. They are validated as a batch against
//! the registry; nothing is applied unless every proposal is acceptable.

use serde::{Deserialize, Serialize};

use kumitate_types::{BlockId, BlockInstance, BlockRecord};

use crate::editor::Editor;
use crate::order;
use crate::Result;

/// How proposals combine with the existing page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    /// Add after the last block, keeping everything already there.
    #[default]
    Append,
    /// Discard the current blocks.
    Replace,
}

impl Editor {
    /// Apply proposed blocks as one undoable step.
    ///
    /// In append mode each proposal is seeded from its type's default content
    /// with the proposed keys laid over it, and always gets a fresh ID.
    /// Replace mode behaves exactly like [`Editor::replace_all`]. Returns the
    /// IDs of the applied blocks in document order.
    pub fn apply_generated(
        &mut self,
        proposals: Vec<BlockRecord>,
        mode: ApplyMode,
    ) -> Result<Vec<BlockId>> {
        if mode == ApplyMode::Replace {
            self.replace_all(proposals)?;
            return Ok(self.document().ordered_ids());
        }

        let typed = Self::classify(proposals)?;
        let policy = self.config().unknown_keys;
        let mut blocks = Vec::with_capacity(typed.len());
        for (block_type, record) in typed {
            let mut content = self.registry().get(block_type).default_content.clone();
            content.extend(record.content);
            self.registry()
                .check_maps(block_type, &content, &record.styles, policy)?;
            blocks.push(BlockInstance {
                id: BlockId::new(),
                block_type,
                content,
                styles: record.styles,
                order: 0.0,
                hidden: record.hidden,
            });
        }
        if blocks.is_empty() {
            return Ok(Vec::new());
        }

        let mut sequence = self.document().ordered_ids();
        let mut last = self.document().sequence().last().map(|b| b.order);
        let mut exhausted = false;
        for block in &mut blocks {
            match order::after_last(last) {
                Some(key) => {
                    block.order = key;
                    last = Some(key);
                }
                None => exhausted = true,
            }
        }

        let ids: Vec<BlockId> = blocks.iter().map(|b| b.id).collect();
        for block in blocks {
            self.doc_mut().insert(block);
        }
        if exhausted {
            tracing::debug!("order keys exhausted while appending, renumbering");
            sequence.extend(&ids);
            self.doc_mut().renumber_as(&sequence);
        }
        self.commit("generate");
        tracing::debug!(count = ids.len(), "appended generated blocks");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kumitate_types::{BlockType, Value};

    use super::*;
    use crate::{BlockRegistry, DocError};

    fn test_editor() -> Editor {
        Editor::new(Arc::new(BlockRegistry::builtin().unwrap()))
    }

    #[test]
    fn test_append_overlays_defaults() {
        let mut ed = test_editor();
        let hero = ed.insert("hero", None).unwrap();

        let ids = ed
            .apply_generated(
                vec![
                    BlockRecord::new("call-to-action").with_content("title", "Book a demo"),
                    BlockRecord::new("footer"),
                ],
                ApplyMode::Append,
            )
            .unwrap();
        assert_eq!(ids.len(), 2);

        let blocks = ed.blocks();
        assert_eq!(blocks[0].id, hero.id);
        assert_eq!(blocks[1].id, ids[0]);
        assert_eq!(blocks[2].id, ids[1]);
        assert_eq!(blocks[1].content_value("title"), Some(&Value::text("Book a demo")));

        let defaults = &ed.registry().get(BlockType::CallToAction).default_content;
        assert_eq!(blocks[1].content_value("text"), defaults.get("text"));
    }

    #[test]
    fn test_append_is_one_history_step() {
        let mut ed = test_editor();
        ed.insert("navbar", None).unwrap();
        let before = ed.snapshot();

        ed.apply_generated(
            vec![BlockRecord::new("hero"), BlockRecord::new("faq"), BlockRecord::new("footer")],
            ApplyMode::Append,
        )
        .unwrap();
        assert_eq!(ed.len(), 4);

        ed.undo().unwrap();
        assert_eq!(ed.snapshot(), before);
    }

    #[test]
    fn test_append_ignores_proposed_ids() {
        let mut ed = test_editor();
        let existing = ed.insert("hero", None).unwrap();
        let ids = ed
            .apply_generated(
                vec![BlockRecord::new("hero").with_id(existing.id)],
                ApplyMode::Append,
            )
            .unwrap();
        assert_ne!(ids[0], existing.id);
        assert_eq!(ed.len(), 2);
    }

    #[test]
    fn test_append_rejects_whole_batch() {
        let mut ed = test_editor();
        ed.insert("hero", None).unwrap();
        let before = ed.snapshot();
        let version = ed.version();

        let err = ed
            .apply_generated(
                vec![BlockRecord::new("faq"), BlockRecord::new("hologram")],
                ApplyMode::Append,
            )
            .unwrap_err();
        assert!(matches!(err, DocError::UnknownBlockType { .. }));

        let err = ed
            .apply_generated(
                vec![
                    BlockRecord::new("faq"),
                    BlockRecord::new("stats").with_content("items", "not a list"),
                ],
                ApplyMode::Append,
            )
            .unwrap_err();
        assert!(matches!(err, DocError::InvalidValue { .. }));

        assert_eq!(ed.snapshot(), before);
        assert_eq!(ed.version(), version);
    }

    #[test]
    fn test_empty_append_is_noop() {
        let mut ed = test_editor();
        assert!(ed.apply_generated(Vec::new(), ApplyMode::Append).unwrap().is_empty());
        assert!(!ed.is_dirty());
        assert!(!ed.can_undo());
    }

    #[test]
    fn test_replace_mode() {
        let mut ed = test_editor();
        ed.insert("hero", None).unwrap();
        let ids = ed
            .apply_generated(
                vec![BlockRecord::new("navbar"), BlockRecord::new("footer")],
                ApplyMode::Replace,
            )
            .unwrap();
        assert_eq!(ids, ed.document().ordered_ids());
        let types: Vec<BlockType> = ed.blocks().iter().map(|b| b.block_type).collect();
        assert_eq!(types, vec![BlockType::Navbar, BlockType::Footer]);
    }
}
