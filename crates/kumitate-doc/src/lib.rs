//! Block document model and editing engine for Kumitate.
//!
//! A page is an ordered list of typed blocks. Each block type is declared
//! once in the [`BlockRegistry`]; the [`Editor`] is the single writer of the
//! page and validates every change against the registry before applying it.
//!
//! # Layers
//!
//! - **Registry** ([`registry`], [`catalog`]): the closed set of block types,
//!   their fields, styles, and default content
//! - **Document** ([`document`]): blocks keyed by ID, read sorted by order key
//! - **Editor** ([`editor`], [`generated`]): insert, edit, duplicate, delete,
//!   move, reorder, hide, bulk replace, apply generated proposals
//! - **History** ([`history`]): linear undo/redo over full snapshots
//! - **Placement** ([`placement`]): drag-and-drop state machine and palette
//!
//! # Ordering
//!
//! Order keys are `f64`. New blocks take a key between their neighbours, so
//! unrelated blocks keep their keys; reorders renumber the whole sequence to
//! `0, 1, 2, …`. Reads always sort by `(order, id)`.

pub mod catalog;
pub mod document;
pub mod editor;
mod error;
pub mod generated;
pub mod history;
mod order;
pub mod placement;
pub mod registry;

pub use document::Document;
pub use editor::{DEFAULT_HISTORY_LIMIT, Direction, Editor, EditorConfig};
pub use error::{DocError, UnknownBlock};
pub use generated::ApplyMode;
pub use history::{History, HistoryEntry};
pub use placement::{
    DragSource, DragState, DropOutcome, DropTarget, PaletteEntry, PaletteSection, Placement,
    palette,
};
pub use registry::{BlockRegistry, UnknownKeyPolicy};

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocError>;
