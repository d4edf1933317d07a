//! Editing sessions for Kumitate pages.
//!
//! Wraps the synchronous [`kumitate_doc::Editor`] in an [`EditorSession`]
//! that serializes access from UI callbacks and async tasks, and connects it
//! to two external collaborators:
//!
//! - [`PageStore`]: loads and saves pages ([`MemoryPageStore`], [`JsonFilePageStore`])
//! - [`BlockGenerator`]: proposes blocks from a prompt ([`CatalogGenerator`])
//!
//! Collaborator failures are returned to the caller and never change the
//! page being edited.

pub mod config;
pub mod error;
pub mod generate;
pub mod session;
pub mod store;
pub mod telemetry;

pub use config::SessionConfig;
pub use error::{ConfigError, GenerateError, SessionError, SessionResult, StoreError};
pub use generate::{BlockGenerator, CatalogGenerator, GenerateResult};
pub use session::EditorSession;
pub use store::{JsonFilePageStore, MemoryPageStore, PageStore, StoreResult};
pub use telemetry::init_tracing;
