//! Drag-and-drop placement.
//!
//! A tiny state machine: `Idle`, dragging a new block from the palette, or
//! dragging an existing block. [`Placement::drop`] is the single terminal
//! transition; it turns the gesture into at most one editor call and always
//! returns to `Idle`, whatever the result.

use serde::Serialize;

use kumitate_types::{BlockId, BlockInstance, BlockType, Category};

use crate::editor::Editor;
use crate::registry::BlockRegistry;
use crate::Result;

/// What the user picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// A palette entry.
    Palette(BlockType),
    /// A block already on the canvas.
    Canvas(BlockId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingNew(BlockType),
    DraggingExisting(BlockId),
}

/// A slot on the canvas, as a position in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropTarget {
    pub index: usize,
}

/// Result of a finished drag.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    Inserted(BlockInstance),
    Reordered { id: BlockId, from: usize, to: usize },
    /// Dropped outside the canvas, onto the same slot, or nothing was dragged.
    NoOp,
}

/// Transient drag state for one canvas.
#[derive(Debug, Default)]
pub struct Placement {
    state: DragState,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Start a drag, replacing any drag already in progress.
    pub fn begin(&mut self, source: DragSource) {
        self.state = match source {
            DragSource::Palette(block_type) => DragState::DraggingNew(block_type),
            DragSource::Canvas(id) => DragState::DraggingExisting(id),
        };
        tracing::trace!(state = ?self.state, "drag started");
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finish the drag.
    ///
    /// `None` means the pointer left every valid target. Target indexes past
    /// the end are clamped to the last valid slot. A canvas block that no
    /// longer exists yields `BlockNotFound`; the drag is cleared either way.
    pub fn drop(&mut self, target: Option<DropTarget>, editor: &mut Editor) -> Result<DropOutcome> {
        let state = std::mem::take(&mut self.state);
        let Some(target) = target else {
            return Ok(DropOutcome::NoOp);
        };

        match state {
            DragState::Idle => Ok(DropOutcome::NoOp),
            DragState::DraggingNew(block_type) => {
                let index = target.index.min(editor.len());
                let block = editor.insert_type(block_type, Some(index))?;
                Ok(DropOutcome::Inserted(block))
            }
            DragState::DraggingExisting(id) => {
                let from = editor
                    .index_of(&id)
                    .ok_or(crate::DocError::BlockNotFound(id))?;
                let to = target.index.min(editor.len().saturating_sub(1));
                if editor.reorder(&id, to)? {
                    Ok(DropOutcome::Reordered { id, from, to })
                } else {
                    Ok(DropOutcome::NoOp)
                }
            }
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// One draggable palette item.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaletteEntry {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub label: String,
    pub description: String,
}

/// Palette items under one category heading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaletteSection {
    pub category: Category,
    pub label: &'static str,
    pub entries: Vec<PaletteEntry>,
}

/// Palette grouped by category, optionally filtered by a search query.
///
/// Sections follow category first appearance, entries follow registry
/// declaration order, and empty sections are left out.
pub fn palette(registry: &BlockRegistry, query: Option<&str>) -> Vec<PaletteSection> {
    let matches = |def: &&kumitate_types::BlockTypeDefinition| query.is_none_or(|q| def.matches(q));
    registry
        .categories()
        .into_iter()
        .filter_map(|category| {
            let entries: Vec<PaletteEntry> = registry
                .list_by_category(category)
                .into_iter()
                .filter(matches)
                .map(|def| PaletteEntry {
                    block_type: def.block_type,
                    label: def.label.clone(),
                    description: def.description.clone(),
                })
                .collect();
            (!entries.is_empty()).then(|| PaletteSection {
                category,
                label: category.label(),
                entries,
            })
        })
        .collect()
}
