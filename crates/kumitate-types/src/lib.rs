//! Shared identity, schema, and block types for Kumitate.
//!
//! This crate is the foundation the page builder is assembled on: typed IDs,
//! the closed block-type enumeration, field/style specs, tagged values, and
//! block instances. It has **no internal kumitate dependencies**: a pure
//! leaf crate that other crates build on.
//!
//! # Relationship Overview
//!
//! ```text
//! Page (PageId) ← one persisted document
//!     └── contains BlockInstance (BlockId, ordered by `order`)
//!             └── is a BlockType → BlockTypeDefinition (registry)
//!                     └── declares FieldSpec (content) + StyleSpec (presentation)
//!             └── content / styles: key → Value
//!
//! BlockRecord ← boundary form (storage, generators), validated on the way in
//! ```
//!
//! # Key Types
//!
//! |-------------------------|------------------------------------------------|
//! | Type                    | Purpose                                        |
//! |-------------------------|------------------------------------------------|
//! | [`BlockId`]             | Opaque, never-reused block identity            |
//! | [`PageId`]              | Which page (= document)                        |
//! | [`SessionId`]           | Which editing session                          |
//! | [`BlockType`]           | Closed enumeration of block kinds              |
//! | [`BlockTypeDefinition`] | Fields, styles, and default content of a type  |
//! | [`Value`]               | Tagged content/style value                     |
//! | [`BlockInstance`]       | A placed block                                 |
//! | [`BlockRecord`]         | Unvalidated block from storage or a generator  |
//! |-------------------------|------------------------------------------------|

pub mod block;
pub mod ids;
pub mod schema;
pub mod value;

pub use block::{BlockInstance, BlockRecord};
pub use ids::{BlockId, PageId, SessionId};
pub use schema::{
    BlockType, BlockTypeDefinition, Category, FieldKind, FieldSpec, StyleKind, StyleSpec,
    Violation,
};
pub use value::{Record, Value, record};
