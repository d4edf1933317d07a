//! Error types for document operations.

use thiserror::Error;

use kumitate_types::{BlockId, BlockType, Violation};

/// A boundary block whose type tag the registry does not know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownBlock {
    /// Position in the submitted batch.
    pub index: usize,
    /// ID carried by the record, if any.
    pub id: Option<BlockId>,
    /// The offending type tag.
    pub block_type: String,
}

impl std::fmt::Display for UnknownBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} '{}'", self.index, self.block_type)
    }
}

fn list(offenders: &[UnknownBlock]) -> String {
    offenders
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during document operations.
///
/// Every operation validates before it mutates, so an `Err` always means the
/// document is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocError {
    /// One or more blocks reference a type outside the registry.
    #[error("unknown block type: {}", list(.offenders))]
    UnknownBlockType { offenders: Vec<UnknownBlock> },

    /// Block not found in document (stale ID).
    #[error("block not found: {0:?}")]
    BlockNotFound(BlockId),

    /// Content key not declared by the block's type.
    #[error("{block_type} has no field '{key}'")]
    UnknownFieldKey { block_type: BlockType, key: String },

    /// Style key not declared by the block's type.
    #[error("{block_type} has no style '{key}'")]
    UnknownStyleKey { block_type: BlockType, key: String },

    /// Value does not fit the declared field or style spec.
    #[error("invalid value for '{key}': {violation}")]
    InvalidValue { key: String, violation: Violation },

    /// Target index outside the document.
    #[error("index {index} out of range for document with {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    /// Two blocks in one batch share an ID.
    #[error("duplicate block id: {0:?}")]
    DuplicateBlock(BlockId),

    /// History cursor is at the oldest entry.
    #[error("nothing to undo")]
    NothingToUndo,

    /// History cursor is at the newest entry.
    #[error("nothing to redo")]
    NothingToRedo,

    /// Registry definitions violate their own invariants.
    #[error("invalid block schema: {0}")]
    InvalidSchema(String),
}

impl DocError {
    /// Create an UnknownBlockType error for a single tag.
    pub fn unknown_type(block_type: impl Into<String>) -> Self {
        Self::UnknownBlockType {
            offenders: vec![UnknownBlock {
                index: 0,
                id: None,
                block_type: block_type.into(),
            }],
        }
    }

    /// Expected boundary conditions (undo/redo at the ends of history).
    ///
    /// These are not failures and are not logged as errors.
    pub fn is_boundary(&self) -> bool {
        matches!(self, DocError::NothingToUndo | DocError::NothingToRedo)
    }

    /// Caller should refresh its view and retry (stale reference).
    pub fn is_stale(&self) -> bool {
        matches!(self, DocError::BlockNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_lists_offenders() {
        let err = DocError::UnknownBlockType {
            offenders: vec![
                UnknownBlock { index: 1, id: None, block_type: "carousel".into() },
                UnknownBlock { index: 4, id: None, block_type: "marquee".into() },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("#1 'carousel'"));
        assert!(msg.contains("#4 'marquee'"));
    }

    #[test]
    fn test_boundary_classification() {
        assert!(DocError::NothingToUndo.is_boundary());
        assert!(DocError::NothingToRedo.is_boundary());
        assert!(!DocError::BlockNotFound(BlockId::new()).is_boundary());
        assert!(DocError::BlockNotFound(BlockId::new()).is_stale());
    }
}
