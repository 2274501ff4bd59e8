//! Shells out to the `bd` CLI and parses its JSON output.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AbacusError, Result};
use crate::model::{Comment, Issue, IssueType, Priority, Status};

use super::{BackendClient, IssueMutations};

/// Invokes a `bd` binary for every operation, parsing stdout as JSON on the
/// read paths and treating a non-zero exit code as failure on writes.
pub struct SubprocessClient {
    binary: PathBuf,
    db_path: PathBuf,
}

impl SubprocessClient {
    pub fn new(binary: PathBuf, db_path: PathBuf) -> Self {
        Self { binary, db_path }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--db").arg(&self.db_path).args(args);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd
    }

    async fn run_json<T: for<'de> Deserialize<'de>>(&self, args: &[&str]) -> Result<T> {
        let output = self
            .command(args)
            .output()
            .await
            .map_err(|e| AbacusError::Backend(format!("failed to run bd: {e}")))?;
        if !output.status.success() {
            return Err(AbacusError::Backend(stderr_message(&output.stderr)));
        }
        serde_json::from_slice(&output.stdout)
            .map_err(|e| AbacusError::Backend(format!("bad JSON from bd: {e}")))
    }

    async fn run_ok(&self, args: &[&str]) -> Result<()> {
        let output = self
            .command(args)
            .output()
            .await
            .map_err(|e| AbacusError::Backend(format!("failed to run bd: {e}")))?;
        if !output.status.success() {
            return Err(AbacusError::Backend(stderr_message(&output.stderr)));
        }
        debug!(args = ?args, "bd command succeeded");
        Ok(())
    }
}

fn stderr_message(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.trim().is_empty() {
        "bd exited with a non-zero status".to_string()
    } else {
        text.trim().to_string()
    }
}

#[derive(Deserialize)]
struct WireIssue {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    design: String,
    #[serde(default)]
    acceptance: String,
    status: Status,
    priority: Priority,
    #[serde(rename = "type")]
    issue_type: IssueType,
    #[serde(default)]
    labels: Vec<String>,
    assignee: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    parent_ids: Vec<String>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl From<WireIssue> for Issue {
    fn from(w: WireIssue) -> Self {
        Issue {
            id: w.id,
            title: w.title,
            description: w.description,
            design: w.design,
            acceptance: w.acceptance,
            status: w.status,
            priority: w.priority,
            issue_type: w.issue_type,
            labels: w.labels,
            assignee: w.assignee,
            created_at: w.created_at,
            updated_at: w.updated_at,
            parent_ids: w.parent_ids,
            comments: w.comments,
        }
    }
}

#[derive(Deserialize)]
struct CreatedId {
    id: String,
}

#[async_trait]
impl BackendClient for SubprocessClient {
    async fn export(&self) -> Result<Vec<Issue>> {
        let wire: Vec<WireIssue> = self.run_json(&["export", "--format", "json"]).await?;
        Ok(wire.into_iter().map(Issue::from).collect())
    }

    async fn comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        self.run_json(&["comments", issue_id, "--format", "json"]).await
    }

    async fn update_status(&self, id: &str, status: Status) -> Result<()> {
        self.run_ok(&["status", id, &status.to_string()]).await
    }

    async fn close(&self, id: &str) -> Result<()> {
        self.run_ok(&["close", id]).await
    }

    async fn reopen(&self, id: &str) -> Result<()> {
        self.run_ok(&["reopen", id]).await
    }

    async fn add_label(&self, id: &str, label: &str) -> Result<()> {
        self.run_ok(&["label", "add", id, label]).await
    }

    async fn remove_label(&self, id: &str, label: &str) -> Result<()> {
        self.run_ok(&["label", "remove", id, label]).await
    }

    async fn create(&self, title: &str, issue_type: IssueType, priority: Priority) -> Result<String> {
        let priority_arg = priority.0.to_string();
        let type_str = issue_type.to_string();
        let created: CreatedId = self
            .run_json(&[
                "create",
                title,
                "--type",
                &type_str,
                "--priority",
                &priority_arg,
                "--format",
                "json",
            ])
            .await?;
        Ok(created.id)
    }

    async fn add_dependency(&self, child_id: &str, parent_id: &str) -> Result<()> {
        self.run_ok(&["dep", "add", child_id, parent_id, "--type", "parent-child"])
            .await
    }

    async fn add_comment(&self, id: &str, text: &str) -> Result<()> {
        self.run_ok(&["comment", id, text]).await
    }

    async fn update_bead(&self, id: &str, mutations: &IssueMutations) -> Result<()> {
        let mut args: Vec<String> = vec!["update".to_string(), id.to_string()];
        if let Some(title) = &mutations.title {
            args.push("--title".to_string());
            args.push(title.clone());
        }
        if let Some(description) = &mutations.description {
            args.push("--description".to_string());
            args.push(description.clone());
        }
        if let Some(design) = &mutations.design {
            args.push("--design".to_string());
            args.push(design.clone());
        }
        if let Some(acceptance) = &mutations.acceptance {
            args.push("--acceptance".to_string());
            args.push(acceptance.clone());
        }
        if let Some(priority) = mutations.priority {
            args.push("--priority".to_string());
            args.push(priority.0.to_string());
        }
        if let Some(issue_type) = mutations.issue_type {
            args.push("--type".to_string());
            args.push(issue_type.to_string());
        }
        if let Some(assignee) = &mutations.assignee {
            args.push("--assignee".to_string());
            args.push(assignee.clone().unwrap_or_default());
        }
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_ok(&arg_refs).await
    }

    async fn delete(&self, id: &str, cascade: bool) -> Result<()> {
        if cascade {
            self.run_ok(&["delete", id, "--cascade"]).await
        } else {
            self.run_ok(&["delete", id]).await
        }
    }
}
