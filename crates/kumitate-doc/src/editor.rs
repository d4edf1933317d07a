//! Document mutation engine.
//!
//! [`Editor`] is the only writer of a [`Document`]. Every operation checks
//! its inputs first and mutates second, so a failed call leaves the document
//! untouched. Each applied operation bumps the version, marks the document
//! dirty, and pushes one history snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use kumitate_types::{BlockId, BlockInstance, BlockRecord, BlockType, Record, Value};

use crate::document::Document;
use crate::error::UnknownBlock;
use crate::history::History;
use crate::order;
use crate::registry::{BlockRegistry, UnknownKeyPolicy};
use crate::{DocError, Result};

/// Default number of undo steps kept per editor.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Editor tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo steps; `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Handling of content/style keys a block type does not declare.
    pub unknown_keys: UnknownKeyPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            unknown_keys: UnknownKeyPolicy::Reject,
        }
    }
}

/// Direction for single-step moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Single-writer editing state for one page.
pub struct Editor {
    registry: Arc<BlockRegistry>,
    config: EditorConfig,
    doc: Document,
    history: History,
    /// Bumped on every applied mutation, undo, redo, and load.
    version: u64,
    /// Version last confirmed persisted.
    saved_version: u64,
}

impl Editor {
    /// Create an editor over an empty document.
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self::with_config(registry, EditorConfig::default())
    }

    pub fn with_config(registry: Arc<BlockRegistry>, config: EditorConfig) -> Self {
        let history = History::new(Vec::new(), config.history_limit);
        Self {
            registry,
            config,
            doc: Document::new(),
            history,
            version: 0,
            saved_version: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> Vec<&BlockInstance> {
        self.doc.sequence()
    }

    /// Owned copy of the block sequence.
    pub fn snapshot(&self) -> Vec<BlockInstance> {
        self.doc.snapshot()
    }

    /// Block sequence in boundary form, for saving.
    pub fn records(&self) -> Vec<BlockRecord> {
        self.doc.sequence().into_iter().map(BlockRecord::from).collect()
    }

    pub fn get(&self, id: &BlockId) -> Option<&BlockInstance> {
        self.doc.get(id)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.doc.index_of(id)
    }

    pub fn len(&self) -> usize {
        self.doc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Unsaved changes since the last confirmed save (or load).
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    /// Record that `version` was persisted.
    ///
    /// Clears the dirty flag only if nothing changed since that version was
    /// read; returns whether it did.
    pub fn mark_saved(&mut self, version: u64) -> bool {
        if version == self.version {
            self.saved_version = version;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require(&self, id: &BlockId) -> Result<&BlockInstance> {
        self.doc.get(id).ok_or(DocError::BlockNotFound(*id))
    }

    pub(crate) fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub(crate) fn commit(&mut self, label: &'static str) {
        if self.doc.resolve_ties() {
            tracing::debug!("renumbered tied order keys after {label}");
        }
        self.version += 1;
        self.history.snapshot(label, self.doc.snapshot());
    }

    /// Put `block` at `index` in the sorted sequence.
    ///
    /// Takes a key between the neighbours; if none is representable, the
    /// whole sequence is renumbered with the block spliced in.
    fn place(&mut self, mut block: BlockInstance, index: usize) {
        let mut ids = self.doc.ordered_ids();
        let key_at = |i: usize| ids.get(i).and_then(|id| self.doc.get(id)).map(|b| b.order);
        let prev = index.checked_sub(1).and_then(key_at);
        let next = key_at(index);

        match order::between(prev, next) {
            Some(key) => {
                block.order = key;
                self.doc.insert(block);
            }
            None => {
                tracing::debug!("order keys exhausted at index {index}, renumbering");
                ids.insert(index, block.id);
                self.doc.insert(block);
                self.doc.renumber_as(&ids);
            }
        }
    }

    /// Split boundary records into known types, collecting every unknown tag.
    pub(crate) fn classify(records: Vec<BlockRecord>) -> Result<Vec<(BlockType, BlockRecord)>> {
        let mut offenders = Vec::new();
        let mut typed = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match record.known_type() {
                Some(block_type) => typed.push((block_type, record)),
                None => offenders.push(UnknownBlock {
                    index,
                    id: record.id,
                    block_type: record.block_type,
                }),
            }
        }
        if offenders.is_empty() {
            Ok(typed)
        } else {
            tracing::warn!(
                count = offenders.len(),
                "rejecting batch with unknown block types"
            );
            Err(DocError::UnknownBlockType { offenders })
        }
    }

    /// Validate a whole batch and turn it into instances, without touching the document.
    fn admit(&self, records: Vec<BlockRecord>) -> Result<Vec<BlockInstance>> {
        let typed = Self::classify(records)?;
        let mut seen = HashSet::with_capacity(typed.len());
        let mut blocks = Vec::with_capacity(typed.len());

        for (block_type, record) in typed {
            self.registry.check_maps(
                block_type,
                &record.content,
                &record.styles,
                self.config.unknown_keys,
            )?;
            let id = match record.id {
                Some(id) if !seen.insert(id) => return Err(DocError::DuplicateBlock(id)),
                Some(id) => id,
                None => BlockId::new(),
            };
            blocks.push(BlockInstance {
                id,
                block_type,
                content: record.content,
                styles: record.styles,
                order: record.order.unwrap_or(f64::NAN),
                hidden: record.hidden,
            });
        }

        // Trust stored keys when they are all usable; otherwise keep batch order.
        if blocks.iter().all(|b| b.order.is_finite()) {
            blocks.sort_by(|a, b| a.order.total_cmp(&b.order));
        }
        let keys: Vec<f64> = blocks.iter().map(|b| b.order).collect();
        if !order::strictly_increasing(&keys) {
            order::renumber(blocks.iter_mut());
        }
        Ok(blocks)
    }

    // =========================================================================
    // Block Operations
    // =========================================================================

    /// Insert a new block of type `tag` seeded with its default content.
    ///
    /// `at` is a position in `0..=len`; `None` appends.
    pub fn insert(&mut self, tag: &str, at: Option<usize>) -> Result<BlockInstance> {
        let block_type = self.registry.lookup(tag)?.block_type;
        self.insert_type(block_type, at)
    }

    /// Insert a new block of a known type.
    pub fn insert_type(&mut self, block_type: BlockType, at: Option<usize>) -> Result<BlockInstance> {
        let len = self.doc.len();
        let index = at.unwrap_or(len);
        if index > len {
            return Err(DocError::IndexOutOfRange { index, len });
        }

        let block = BlockInstance {
            id: BlockId::new(),
            block_type,
            content: self.registry.get(block_type).default_content.clone(),
            styles: Record::new(),
            order: 0.0,
            hidden: false,
        };
        let id = block.id;
        self.place(block, index);
        self.commit("insert");
        tracing::debug!(block = %id, %block_type, index, "inserted block");
        self.require(&id).cloned()
    }

    /// Replace one content key.
    pub fn update_content(&mut self, id: &BlockId, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let block_type = self.require(id)?.block_type;
        self.registry
            .check_content(block_type, key, &value, self.config.unknown_keys)?;

        if let Some(block) = self.doc.get_mut(id) {
            block.content.insert(key.to_string(), value);
        }
        self.commit("edit");
        tracing::debug!(block = %id, key, "updated content");
        Ok(())
    }

    /// Replace one style key.
    pub fn update_style(&mut self, id: &BlockId, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let block_type = self.require(id)?.block_type;
        self.registry
            .check_style(block_type, key, &value, self.config.unknown_keys)?;

        if let Some(block) = self.doc.get_mut(id) {
            block.styles.insert(key.to_string(), value);
        }
        self.commit("style");
        tracing::debug!(block = %id, key, "updated style");
        Ok(())
    }

    /// Copy a block (fresh ID) directly after the source.
    pub fn duplicate(&mut self, id: &BlockId) -> Result<BlockInstance> {
        let source = self.require(id)?.clone();
        let index = self.doc.index_of(id).ok_or(DocError::BlockNotFound(*id))?;

        let copy = BlockInstance {
            id: BlockId::new(),
            ..source
        };
        let copy_id = copy.id;
        self.place(copy, index + 1);
        self.commit("duplicate");
        tracing::debug!(source = %id, block = %copy_id, "duplicated block");
        self.require(&copy_id).cloned()
    }

    /// Remove a block. Returns the removed instance.
    pub fn delete(&mut self, id: &BlockId) -> Result<BlockInstance> {
        let removed = self.doc.remove(id).ok_or(DocError::BlockNotFound(*id))?;
        self.commit("delete");
        tracing::debug!(block = %id, block_type = %removed.block_type, "deleted block");
        Ok(removed)
    }

    /// Swap a block with its neighbour. Returns false (no-op) at the boundary.
    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> Result<bool> {
        let ids = self.doc.ordered_ids();
        let index = ids
            .iter()
            .position(|x| x == id)
            .ok_or(DocError::BlockNotFound(*id))?;
        let neighbour = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => (index + 1 < ids.len()).then_some(index + 1),
        };
        let Some(neighbour) = neighbour else {
            return Ok(false);
        };

        let other = ids[neighbour];
        let mine = self.require(id)?.order;
        let theirs = self.require(&other)?.order;
        if let Some(block) = self.doc.get_mut(id) {
            block.order = theirs;
        }
        if let Some(block) = self.doc.get_mut(&other) {
            block.order = mine;
        }
        self.commit("move");
        tracing::debug!(block = %id, ?direction, "moved block");
        Ok(true)
    }

    /// Move a block to `new_index` in `0..len`, renumbering the sequence.
    ///
    /// Out-of-range targets are rejected, not clamped. Returns false (no-op)
    /// if the block is already there.
    pub fn reorder(&mut self, id: &BlockId, new_index: usize) -> Result<bool> {
        let mut ids = self.doc.ordered_ids();
        let from = ids
            .iter()
            .position(|x| x == id)
            .ok_or(DocError::BlockNotFound(*id))?;
        if new_index >= ids.len() {
            return Err(DocError::IndexOutOfRange {
                index: new_index,
                len: ids.len(),
            });
        }
        if from == new_index {
            return Ok(false);
        }

        let moved = ids.remove(from);
        ids.insert(new_index, moved);
        self.doc.renumber_as(&ids);
        self.commit("reorder");
        tracing::debug!(block = %id, from, to = new_index, "reordered block");
        Ok(true)
    }

    /// Flip the hidden flag. Returns the new value.
    pub fn toggle_hidden(&mut self, id: &BlockId) -> Result<bool> {
        let block = self.doc.get_mut(id).ok_or(DocError::BlockNotFound(*id))?;
        block.hidden = !block.hidden;
        let hidden = block.hidden;
        self.commit("toggle-hidden");
        tracing::debug!(block = %id, hidden, "toggled visibility");
        Ok(hidden)
    }

    /// Replace every block in one step (all-or-nothing).
    ///
    /// Records without an ID get a fresh one; records without usable order
    /// keys keep their batch order.
    pub fn replace_all(&mut self, records: Vec<BlockRecord>) -> Result<()> {
        let blocks = self.admit(records)?;
        let count = blocks.len();
        self.doc.restore(blocks);
        self.commit("replace");
        tracing::debug!(count, "replaced all blocks");
        Ok(())
    }

    /// Replace every block with a persisted page and start a clean history.
    ///
    /// Validation is identical to [`Editor::replace_all`]; afterwards there is
    /// nothing to undo and the document is not dirty.
    pub fn load(&mut self, records: Vec<BlockRecord>) -> Result<()> {
        let blocks = self.admit(records)?;
        self.doc.restore(blocks);
        self.version += 1;
        self.saved_version = self.version;
        self.history.reset(self.doc.snapshot());
        tracing::debug!(count = self.doc.len(), "loaded page");
        Ok(())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Restore the previous snapshot.
    pub fn undo(&mut self) -> Result<()> {
        let blocks = self
            .history
            .undo()
            .inspect_err(|e| tracing::debug!("{e}"))?
            .blocks
            .clone();
        self.doc.restore(blocks);
        self.version += 1;
        Ok(())
    }

    /// Reapply the next snapshot.
    pub fn redo(&mut self) -> Result<()> {
        let blocks = self
            .history
            .redo()
            .inspect_err(|e| tracing::debug!("{e}"))?
            .blocks
            .clone();
        self.doc.restore(blocks);
        self.version += 1;
        Ok(())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("blocks", &self.doc.len())
            .field("version", &self.version)
            .field("dirty", &self.is_dirty())
            .field("history", &self.history.len())
            .finish()
    }
}

// =========================================================================
// Tests
// =========================================================================
