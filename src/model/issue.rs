//! The immutable issue record and its closed enumerations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Closed,
    Blocked,
    Deferred,
}

impl Status {
    /// All recognized statuses, in the order the search grammar offers them.
    pub const ALL: [Status; 5] = [
        Status::Open,
        Status::InProgress,
        Status::Closed,
        Status::Blocked,
        Status::Deferred,
    ];
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Closed => "closed",
            Status::Blocked => "blocked",
            Status::Deferred => "deferred",
        };
        f.write_str(s)
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in_progress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "closed" => Ok(Status::Closed),
            "blocked" => Ok(Status::Blocked),
            "deferred" => Ok(Status::Deferred),
            _ => Err(()),
        }
    }
}

/// Priority, 0 (Critical) through 4 (Backlog).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u8);

impl Priority {
    pub const CRITICAL: Priority = Priority(0);
    pub const HIGH: Priority = Priority(1);
    pub const MEDIUM: Priority = Priority(2);
    pub const LOW: Priority = Priority(3);
    pub const BACKLOG: Priority = Priority(4);

    /// First-letter mnemonic used by the priority radio column (c/h/m/l/b).
    pub fn mnemonic(self) -> char {
        match self.0 {
            0 => 'c',
            1 => 'h',
            2 => 'm',
            3 => 'l',
            _ => 'b',
        }
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Critical",
            1 => "High",
            2 => "Medium",
            3 => "Low",
            _ => "Backlog",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of work an issue represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Task,
    Feature,
    Bug,
    Epic,
    Chore,
}

impl IssueType {
    pub const ALL: [IssueType; 5] = [
        IssueType::Task,
        IssueType::Feature,
        IssueType::Bug,
        IssueType::Epic,
        IssueType::Chore,
    ];
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueType::Task => "task",
            IssueType::Feature => "feature",
            IssueType::Bug => "bug",
            IssueType::Epic => "epic",
            IssueType::Chore => "chore",
        };
        f.write_str(s)
    }
}

impl FromStr for IssueType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "task" => Ok(IssueType::Task),
            "feature" => Ok(IssueType::Feature),
            "bug" => Ok(IssueType::Bug),
            "epic" => Ok(IssueType::Epic),
            "chore" => Ok(IssueType::Chore),
            _ => Err(()),
        }
    }
}

/// A single comment attached to an issue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// An immutable issue record as returned by a single refresh snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub design: String,
    pub acceptance: String,
    pub status: Status,
    pub priority: Priority,
    pub issue_type: IssueType,
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Parent issue ids this issue depends on ("parent-child" edges it is the child of).
    pub parent_ids: Vec<String>,
    pub comments: Vec<Comment>,
}

impl Issue {
    /// The digest fingerprint used by the refresh engine: `"title|status|priority|updatedAt"`.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.title,
            self.status,
            self.priority,
            self.updated_at.to_rfc3339()
        )
    }
}
