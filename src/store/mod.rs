//! The issue-store abstraction: everything EventCore needs from "beads",
//! behind one async trait with two concrete backends.

mod fake;
mod locate;
mod subprocess;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use fake::FakeBackendClient;
pub use locate::{locate_database, DbLocation};
pub use subprocess::SubprocessClient;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Comment, Issue, IssueType, Priority};

/// A partial update to an existing issue; `None` fields are left unchanged.
#[derive(Clone, Debug, Default)]
pub struct IssueMutations {
    pub title: Option<String>,
    pub description: Option<String>,
    pub design: Option<String>,
    pub acceptance: Option<String>,
    pub priority: Option<Priority>,
    pub issue_type: Option<IssueType>,
    pub assignee: Option<Option<String>>,
}

/// Abstract interface the core depends on, so the concrete backend
/// (subprocess or direct SQLite) can be swapped freely.
///
/// Implementations must be safe for concurrent read calls (`export`,
/// `comments`).
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Returns the full issue list for one refresh pass.
    async fn export(&self) -> Result<Vec<Issue>>;

    /// Returns comments for one issue.
    async fn comments(&self, issue_id: &str) -> Result<Vec<Comment>>;

    async fn update_status(&self, id: &str, status: crate::model::Status) -> Result<()>;

    async fn close(&self, id: &str) -> Result<()>;

    async fn reopen(&self, id: &str) -> Result<()>;

    async fn add_label(&self, id: &str, label: &str) -> Result<()>;

    async fn remove_label(&self, id: &str, label: &str) -> Result<()>;

    /// Creates a new issue, returning its assigned id.
    async fn create(&self, title: &str, issue_type: IssueType, priority: Priority) -> Result<String>;

    /// Adds a "parent-child" dependency edge: `child_id` depends on `parent_id`.
    async fn add_dependency(&self, child_id: &str, parent_id: &str) -> Result<()>;

    async fn add_comment(&self, id: &str, text: &str) -> Result<()>;

    async fn update_bead(&self, id: &str, mutations: &IssueMutations) -> Result<()>;

    /// Deletes an issue; `cascade` also removes issues that depend solely on it.
    async fn delete(&self, id: &str, cascade: bool) -> Result<()>;
}
