//! An in-memory [`BackendClient`] used by integration tests and unit tests
//! that exercise the refresh/mutation flow without a real `bd` binary.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{AbacusError, Result};
use crate::model::{Comment, Issue, IssueType, Priority, Status};

use super::{BackendClient, IssueMutations};

/// Holds a mutable issue list behind a `Mutex` so it can be shared across
/// the async handlers that exercise it concurrently in tests.
pub struct FakeBackendClient {
    issues: Mutex<Vec<Issue>>,
    next_id: Mutex<u64>,
}

impl FakeBackendClient {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues: Mutex::new(issues),
            next_id: Mutex::new(1),
        }
    }

    fn with_issue_mut<F, T>(&self, id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Issue) -> T,
    {
        let mut issues = self.issues.lock().unwrap();
        let issue = issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AbacusError::Backend(format!("unknown issue: {id}")))?;
        Ok(f(issue))
    }
}

#[async_trait]
impl BackendClient for FakeBackendClient {
    async fn export(&self) -> Result<Vec<Issue>> {
        Ok(self.issues.lock().unwrap().clone())
    }

    async fn comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        self.with_issue_mut(issue_id, |issue| issue.comments.clone())
    }

    async fn update_status(&self, id: &str, status: Status) -> Result<()> {
        self.with_issue_mut(id, |issue| {
            issue.status = status;
            issue.updated_at = Utc::now();
        })
    }

    async fn close(&self, id: &str) -> Result<()> {
        self.update_status(id, Status::Closed).await
    }

    async fn reopen(&self, id: &str) -> Result<()> {
        self.update_status(id, Status::Open).await
    }

    async fn add_label(&self, id: &str, label: &str) -> Result<()> {
        self.with_issue_mut(id, |issue| {
            if !issue.labels.iter().any(|l| l == label) {
                issue.labels.push(label.to_string());
            }
        })
    }

    async fn remove_label(&self, id: &str, label: &str) -> Result<()> {
        self.with_issue_mut(id, |issue| {
            issue.labels.retain(|l| l != label);
        })
    }

    async fn create(&self, title: &str, issue_type: IssueType, priority: Priority) -> Result<String> {
        let mut next_id = self.next_id.lock().unwrap();
        let id = format!("ab-{}", *next_id);
        *next_id += 1;
        let now = Utc::now();
        self.issues.lock().unwrap().push(Issue {
            id: id.clone(),
            title: title.to_string(),
            description: String::new(),
            design: String::new(),
            acceptance: String::new(),
            status: Status::Open,
            priority,
            issue_type,
            labels: vec![],
            assignee: None,
            created_at: now,
            updated_at: now,
            parent_ids: vec![],
            comments: vec![],
        });
        Ok(id)
    }

    async fn add_dependency(&self, child_id: &str, parent_id: &str) -> Result<()> {
        self.with_issue_mut(child_id, |issue| {
            if !issue.parent_ids.iter().any(|p| p == parent_id) {
                issue.parent_ids.push(parent_id.to_string());
            }
        })
    }

    async fn add_comment(&self, id: &str, text: &str) -> Result<()> {
        let comment_id = format!("c-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
        self.with_issue_mut(id, |issue| {
            issue.comments.push(Comment {
                id: comment_id,
                author: "you".to_string(),
                text: text.to_string(),
                created_at: Utc::now(),
            });
        })
    }

    async fn update_bead(&self, id: &str, mutations: &IssueMutations) -> Result<()> {
        self.with_issue_mut(id, |issue| {
            if let Some(title) = &mutations.title {
                issue.title = title.clone();
            }
            if let Some(description) = &mutations.description {
                issue.description = description.clone();
            }
            if let Some(design) = &mutations.design {
                issue.design = design.clone();
            }
            if let Some(acceptance) = &mutations.acceptance {
                issue.acceptance = acceptance.clone();
            }
            if let Some(priority) = mutations.priority {
                issue.priority = priority;
            }
            if let Some(issue_type) = mutations.issue_type {
                issue.issue_type = issue_type;
            }
            if let Some(assignee) = mutations.assignee.clone() {
                issue.assignee = assignee;
            }
            issue.updated_at = Utc::now();
        })
    }

    async fn delete(&self, id: &str, cascade: bool) -> Result<()> {
        let mut issues = self.issues.lock().unwrap();
        if !issues.iter().any(|i| i.id == id) {
            return Err(AbacusError::Backend(format!("unknown issue: {id}")));
        }
        issues.retain(|i| i.id != id);
        if cascade {
            issues.retain(|i| !i.parent_ids.iter().any(|p| p == id));
        } else {
            for issue in issues.iter_mut() {
                issue.parent_ids.retain(|p| p != id);
            }
        }
        Ok(())
    }
}
