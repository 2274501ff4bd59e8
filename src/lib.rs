#![warn(missing_docs)]

//! # Abacus
//!
//! A terminal UI for browsing and mutating a local issue-tracking database
//! ("beads"): a hierarchical tree of issues, a markdown-rendered detail pane,
//! and a family of modal overlays for search, status changes, labels,
//! comments, creation, edit, and delete.
//!
//! Abacus is built on the same reactive core ([`app`]) as the rest of this
//! crate: an [`App`] implementation ([`eventcore::AbacusApp`]) whose `State`
//! is mutated only by `update`, with all side effects expressed as
//! [`Command`]s the runtime executes off the main thread.
//!
//! ```rust,ignore
//! fn main() -> error::Result<()> {
//!     let config = cli::resolve()?;
//!     eventcore::configure(config);
//!     Runtime::<eventcore::AbacusApp>::new_terminal()?.run()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module map
//!
//! - [`model`]: the issue record and the arena-indexed `Forest`/`Node` graph.
//! - [`tree`]: flattens the forest into a scrollable, filterable row list.
//! - [`store`]: the `BackendClient` trait and its SQLite/subprocess impls.
//! - [`refresh`]: polls the store, diffs snapshots, transfers UI state across swaps.
//! - [`overlays`]: the modal family (status/labels/create/edit/delete/comment).
//! - [`eventcore`]: wires state/message/update into the `App` trait.
//! - [`render`]: the view half — header/tree/detail/footer bands plus overlays and toasts.

mod annotation;
pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod eventcore;
pub mod harness;
pub mod input;
pub mod model;
pub mod overlay;
pub mod overlays;
pub mod refresh;
pub mod render;
pub mod store;
pub mod theme;
pub mod tree;

// Re-export the public surface most callers need.
pub use app::{App, Command, Runtime, RuntimeConfig};
pub use backend::{CaptureBackend, EnhancedCell, FrameSnapshot};
pub use error::{AbacusError, Result};
pub use eventcore::{AbacusApp, AppConfig, AppState};
pub use harness::{AppHarness, Assertion, Snapshot, TestHarness};
pub use input::{Event, EventQueue};
pub use model::{Comment, Forest, Issue, IssueType, Node, Priority, Status};
pub use store::BackendClient;
pub use theme::Theme;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use abacus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{App, Command, Runtime, RuntimeConfig};
    pub use crate::error::{AbacusError, Result};
    pub use crate::eventcore::{AbacusApp, AppConfig, AppState};
    pub use crate::input::{Event, EventQueue, KeyCode, KeyModifiers};
    pub use crate::model::{Comment, Forest, Issue, IssueType, Node, Priority, Status};
    pub use crate::theme::Theme;

    // Testing essentials
    pub use crate::backend::{CaptureBackend, EnhancedCell};
    pub use crate::harness::{AppHarness, TestHarness};

    // Ratatui re-export
    pub use ratatui::prelude::*;
}
