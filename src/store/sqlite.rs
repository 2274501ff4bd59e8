//! Direct-to-SQLite backend, preferred when a `.beads/beads.db` file is
//! found. `rusqlite` is synchronous, so every call runs on a blocking pool
//! thread via `tokio::task::spawn_blocking`.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{AbacusError, Result};
use crate::model::{Comment, Issue, IssueType, Priority, Status};

use super::{BackendClient, IssueMutations};

/// A `rusqlite::Connection` behind a mutex: SQLite connections aren't `Sync`,
/// and every call here is infrequent enough that one connection suffices.
pub struct SqliteClient {
    conn: Mutex<Connection>,
}

impl SqliteClient {
    pub fn open(db_path: PathBuf) -> Result<Self> {
        let conn = Connection::open(&db_path)
            .map_err(|e| AbacusError::Backend(format!("opening {}: {e}", db_path.display())))?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send,
        T: Send,
    {
        let conn = self.conn.lock().unwrap();
        f(&conn).map_err(|e| AbacusError::Backend(e.to_string()))
    }

    fn row_to_issue(row: &rusqlite::Row<'_>) -> rusqlite::Result<Issue> {
        let status_str: String = row.get("status")?;
        let priority: u8 = row.get("priority")?;
        let type_str: String = row.get("issue_type")?;
        Ok(Issue {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            design: row.get("design")?,
            acceptance: row.get("acceptance")?,
            status: status_str.parse().unwrap_or(Status::Open),
            priority: Priority(priority),
            issue_type: type_str.parse().unwrap_or(IssueType::Task),
            labels: vec![],
            assignee: row.get("assignee")?,
            created_at: row.get::<_, DateTime<Utc>>("created_at")?,
            updated_at: row.get::<_, DateTime<Utc>>("updated_at")?,
            parent_ids: vec![],
            comments: vec![],
        })
    }

    fn load_labels(conn: &Connection, issue_id: &str) -> rusqlite::Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT label FROM labels WHERE issue_id = ?1 ORDER BY label")?;
        let rows = stmt.query_map(params![issue_id], |r| r.get::<_, String>(0))?;
        rows.collect()
    }

    fn load_parent_ids(conn: &Connection, issue_id: &str) -> rusqlite::Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT parent_id FROM dependencies WHERE child_id = ?1 AND dep_type = 'parent-child'",
        )?;
        let rows = stmt.query_map(params![issue_id], |r| r.get::<_, String>(0))?;
        rows.collect()
    }
}

#[async_trait]
impl BackendClient for SqliteClient {
    async fn export(&self) -> Result<Vec<Issue>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM issues ORDER BY id")?;
            let mut issues = stmt
                .query_map([], Self::row_to_issue)?
                .collect::<rusqlite::Result<Vec<Issue>>>()?;
            for issue in &mut issues {
                issue.labels = Self::load_labels(conn, &issue.id)?;
                issue.parent_ids = Self::load_parent_ids(conn, &issue.id)?;
            }
            Ok(issues)
        })
    }

    async fn comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, author, text, created_at FROM comments WHERE issue_id = ?1 ORDER BY created_at",
            )?;
            stmt.query_map(params![issue_id], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    author: row.get(1)?,
                    text: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect()
        })
    }

    async fn update_status(&self, id: &str, status: Status) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE issues SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.to_string(), Utc::now(), id],
            )
            .map(|_| ())
        })
    }

    async fn close(&self, id: &str) -> Result<()> {
        self.update_status(id, Status::Closed).await
    }

    async fn reopen(&self, id: &str) -> Result<()> {
        self.update_status(id, Status::Open).await
    }

    async fn add_label(&self, id: &str, label: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO labels (issue_id, label) VALUES (?1, ?2)",
                params![id, label],
            )
            .map(|_| ())
        })
    }

    async fn remove_label(&self, id: &str, label: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM labels WHERE issue_id = ?1 AND label = ?2",
                params![id, label],
            )
            .map(|_| ())
        })
    }

    async fn create(&self, title: &str, issue_type: IssueType, priority: Priority) -> Result<String> {
        self.with_conn(|conn| {
            let id: String = conn
                .query_row("SELECT 'ab-' || (COALESCE(MAX(CAST(substr(id, 4) AS INTEGER)), 0) + 1) FROM issues", [], |r| r.get(0))
                .optional()?
                .unwrap_or_else(|| "ab-1".to_string());
            let now = Utc::now();
            conn.execute(
                "INSERT INTO issues (id, title, description, design, acceptance, status, priority, issue_type, assignee, created_at, updated_at)
                 VALUES (?1, ?2, '', '', '', ?3, ?4, ?5, NULL, ?6, ?6)",
                params![id, title, Status::Open.to_string(), priority.0, issue_type.to_string(), now],
            )?;
            Ok(id)
        })
    }

    async fn add_dependency(&self, child_id: &str, parent_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO dependencies (child_id, parent_id, dep_type) VALUES (?1, ?2, 'parent-child')",
                params![child_id, parent_id],
            )
            .map(|_| ())
        })
    }

    async fn add_comment(&self, id: &str, text: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (id, issue_id, author, text, created_at) VALUES (lower(hex(randomblob(16))), ?1, 'you', ?2, ?3)",
                params![id, text, Utc::now()],
            )
            .map(|_| ())
        })
    }

    async fn update_bead(&self, id: &str, mutations: &IssueMutations) -> Result<()> {
        self.with_conn(|conn| {
            if let Some(title) = &mutations.title {
                conn.execute("UPDATE issues SET title = ?1 WHERE id = ?2", params![title, id])?;
            }
            if let Some(description) = &mutations.description {
                conn.execute(
                    "UPDATE issues SET description = ?1 WHERE id = ?2",
                    params![description, id],
                )?;
            }
            if let Some(design) = &mutations.design {
                conn.execute("UPDATE issues SET design = ?1 WHERE id = ?2", params![design, id])?;
            }
            if let Some(acceptance) = &mutations.acceptance {
                conn.execute(
                    "UPDATE issues SET acceptance = ?1 WHERE id = ?2",
                    params![acceptance, id],
                )?;
            }
            if let Some(priority) = mutations.priority {
                conn.execute("UPDATE issues SET priority = ?1 WHERE id = ?2", params![priority.0, id])?;
            }
            if let Some(issue_type) = mutations.issue_type {
                conn.execute(
                    "UPDATE issues SET issue_type = ?1 WHERE id = ?2",
                    params![issue_type.to_string(), id],
                )?;
            }
            if let Some(assignee) = &mutations.assignee {
                conn.execute("UPDATE issues SET assignee = ?1 WHERE id = ?2", params![assignee, id])?;
            }
            conn.execute(
                "UPDATE issues SET updated_at = ?1 WHERE id = ?2",
                params![Utc::now(), id],
            )
            .map(|_| ())
        })
    }

    async fn delete(&self, id: &str, cascade: bool) -> Result<()> {
        self.with_conn(|conn| {
            if cascade {
                conn.execute(
                    "DELETE FROM issues WHERE id IN (SELECT child_id FROM dependencies WHERE parent_id = ?1)",
                    params![id],
                )?;
            } else {
                conn.execute("DELETE FROM dependencies WHERE parent_id = ?1", params![id])?;
            }
            conn.execute("DELETE FROM dependencies WHERE child_id = ?1 OR parent_id = ?1", params![id])?;
            conn.execute("DELETE FROM labels WHERE issue_id = ?1", params![id])?;
            conn.execute("DELETE FROM comments WHERE issue_id = ?1", params![id])?;
            conn.execute("DELETE FROM issues WHERE id = ?1", params![id]).map(|_| ())
        })
    }
}
