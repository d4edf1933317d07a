//! The page being edited: a set of block instances read as a sequence.
//!
//! Blocks are stored by ID (so an ID can never appear twice) and always read
//! sorted by `(order, id)`. The ID tiebreak makes reads deterministic even if
//! two keys ever compare equal; the editor renumbers after structural
//! mutations so that never survives a commit.

use std::collections::BTreeMap;

use kumitate_types::{BlockId, BlockInstance};

use crate::order;

/// Ordered collection of block instances for one page.
#[derive(Clone, Debug, Default)]
pub struct Document {
    blocks: BTreeMap<BlockId, BlockInstance>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from instances (callers guarantee unique IDs).
    pub(crate) fn from_blocks(blocks: Vec<BlockInstance>) -> Self {
        Self {
            blocks: blocks.into_iter().map(|b| (b.id, b)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&BlockInstance> {
        self.blocks.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &BlockId) -> Option<&mut BlockInstance> {
        self.blocks.get_mut(id)
    }

    /// Blocks in document order.
    pub fn sequence(&self) -> Vec<&BlockInstance> {
        let mut seq: Vec<&BlockInstance> = self.blocks.values().collect();
        seq.sort_by(|a, b| a.order.total_cmp(&b.order).then(a.id.cmp(&b.id)));
        seq
    }

    /// Block IDs in document order.
    pub fn ordered_ids(&self) -> Vec<BlockId> {
        self.sequence().into_iter().map(|b| b.id).collect()
    }

    /// Blocks that render (not hidden), in document order.
    pub fn visible(&self) -> Vec<&BlockInstance> {
        self.sequence().into_iter().filter(|b| !b.hidden).collect()
    }

    /// Position of a block in document order.
    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.sequence().iter().position(|b| &b.id == id)
    }

    /// Block at a position in document order.
    pub fn at(&self, index: usize) -> Option<&BlockInstance> {
        self.sequence().get(index).copied()
    }

    /// Owned copy of the sequence, for history and persistence.
    pub fn snapshot(&self) -> Vec<BlockInstance> {
        self.sequence().into_iter().cloned().collect()
    }

    /// Replace every block with the given sequence.
    pub(crate) fn restore(&mut self, blocks: Vec<BlockInstance>) {
        *self = Self::from_blocks(blocks);
    }

    pub(crate) fn insert(&mut self, block: BlockInstance) {
        self.blocks.insert(block.id, block);
    }

    pub(crate) fn remove(&mut self, id: &BlockId) -> Option<BlockInstance> {
        self.blocks.remove(id)
    }

    /// Assign contiguous keys following the given ID order.
    pub(crate) fn renumber_as(&mut self, ids: &[BlockId]) {
        let blocks = &mut self.blocks;
        for (i, id) in ids.iter().enumerate() {
            if let Some(block) = blocks.get_mut(id) {
                block.order = i as f64;
            }
        }
    }

    /// Renumber the current sequence if any adjacent keys tie. Returns true if it did.
    pub(crate) fn resolve_ties(&mut self) -> bool {
        let keys: Vec<f64> = self.sequence().into_iter().map(|b| b.order).collect();
        if order::strictly_increasing(&keys) {
            return false;
        }
        let ids = self.ordered_ids();
        self.renumber_as(&ids);
        true
    }
}
