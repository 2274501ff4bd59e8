//! `update(state, msg) -> Command<Msg>`: the single place state changes.
//! Total, deterministic, and time-driven only through injected messages.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Command;
use crate::model::Status;
use crate::overlays::{
    ActiveOverlay, CommentOverlay, CreateEditOverlay, DeleteOverlay, FormMode, FormOutcome,
    FormSubmission, LabelsOverlay, RootMode, StatusOverlay, Zone,
};
use crate::refresh::execute_refresh;
use crate::store::IssueMutations;

use super::msg::{Msg, RefreshCompletion};
use super::state::{AppState, Focus};

const ERROR_TOAST_DURATION: Duration = Duration::from_secs(10);
const OPERATION_TOAST_DURATION: Duration = Duration::from_secs(5);
const TITLE_FLASH_DURATION: Duration = Duration::from_millis(300);
const TYPE_FLASH_DURATION: Duration = Duration::from_millis(300);

pub fn update(state: &mut AppState, msg: Msg) -> Command<Msg> {
    match msg {
        Msg::Tick => handle_tick(state),
        Msg::ErrorToastTick => {
            state.error_toast = None;
            Command::none()
        }
        Msg::CopyToastTick => {
            state.copy_toast = None;
            Command::none()
        }
        Msg::StatusToastTick => {
            state.status_toast = None;
            Command::none()
        }
        Msg::LabelsToastTick => {
            state.labels_toast = None;
            Command::none()
        }
        Msg::CreateToastTick => {
            state.create_toast = None;
            Command::none()
        }
        Msg::UpdateToastTick => {
            state.update_toast = None;
            Command::none()
        }
        Msg::TitleFlashClear => {
            if let ActiveOverlay::Create(form) | ActiveOverlay::Edit(form) = &mut state.active_overlay {
                form.clear_title_validation_error();
            }
            Command::none()
        }
        Msg::TypeInferenceFlashClear => {
            if let ActiveOverlay::Create(form) | ActiveOverlay::Edit(form) = &mut state.active_overlay {
                form.clear_type_flash();
            }
            Command::none()
        }

        Msg::RefreshComplete(completion) => handle_refresh_complete(state, *completion),
        Msg::StatusUpdateComplete { err } => handle_mutation_result(
            state,
            err,
            "Status updated",
            |s, toast| s.status_toast = toast,
            Msg::StatusToastTick,
        ),
        Msg::LabelUpdateComplete { err } => handle_mutation_result(
            state,
            err,
            "Labels updated",
            |s, toast| s.labels_toast = toast,
            Msg::LabelsToastTick,
        ),
        Msg::BeadUpdateComplete { err } => handle_mutation_result(
            state,
            err,
            "Issue updated",
            |s, toast| s.update_toast = toast,
            Msg::UpdateToastTick,
        ),
        Msg::CreateComplete { id: _, err } => handle_mutation_result(
            state,
            err,
            "Issue created",
            |s, toast| s.create_toast = toast,
            Msg::CreateToastTick,
        ),
        Msg::DeleteComplete { err } => handle_mutation_complete(state, err),
        Msg::CommentAddComplete { err } => handle_mutation_complete(state, err),
        Msg::CommentLoaded { issue_id, comments, err } => handle_comment_loaded(state, issue_id, comments, err),
        Msg::UpdateAvailable { info } => {
            state.version_notice = Some(info);
            Command::none()
        }

        Msg::StatusChanged(changed) => {
            state.active_overlay.close();
            let client = state.client.clone();
            let old = current_status(state, &changed.issue_id).unwrap_or(changed.new_status);
            Command::perform_async(async move {
                let result = if old == Status::Closed && changed.new_status == Status::Open {
                    client.reopen(&changed.issue_id).await
                } else {
                    client.update_status(&changed.issue_id, changed.new_status).await
                };
                Some(Msg::StatusUpdateComplete { err: result.err().map(|e| e.to_string()) })
            })
        }
        Msg::StatusCancelled => {
            state.active_overlay.close();
            Command::none()
        }
        Msg::LabelsUpdated(delta) => {
            let issue_id = match &state.active_overlay {
                ActiveOverlay::Labels(overlay) => overlay.issue_id().to_string(),
                _ => String::new(),
            };
            state.active_overlay.close();
            let client = state.client.clone();
            Command::perform_async(async move {
                for label in &delta.added {
                    if let Err(e) = client.add_label(&issue_id, label).await {
                        return Some(Msg::LabelUpdateComplete { err: Some(e.to_string()) });
                    }
                }
                for label in &delta.removed {
                    if let Err(e) = client.remove_label(&issue_id, label).await {
                        return Some(Msg::LabelUpdateComplete { err: Some(e.to_string()) });
                    }
                }
                Some(Msg::LabelUpdateComplete { err: None })
            })
        }
        Msg::LabelsCancelled => {
            state.active_overlay.close();
            Command::none()
        }
        Msg::BeadCreated(submission) => {
            state.active_overlay.close();
            spawn_create(state, submission)
        }
        Msg::BeadUpdated(submission) => {
            state.active_overlay.close();
            spawn_update(state, submission)
        }
        Msg::CreateCancelled => {
            state.active_overlay.close();
            Command::none()
        }
        Msg::DeleteConfirmed(confirmed) => {
            state.active_overlay.close();
            let client = state.client.clone();
            Command::perform_async(async move {
                let result = client.delete(&confirmed.issue_id, confirmed.cascade).await;
                Some(Msg::DeleteComplete { err: result.err().map(|e| e.to_string()) })
            })
        }
        Msg::DeleteCancelled => {
            state.active_overlay.close();
            Command::none()
        }
        Msg::CommentAdded(added) => {
            state.active_overlay.close();
            let client = state.client.clone();
            Command::perform_async(async move {
                let result = client.add_comment(&added.issue_id, &added.text).await;
                Some(Msg::CommentAddComplete { err: result.err().map(|e| e.to_string()) })
            })
        }
        Msg::CommentCancelled => {
            state.active_overlay.close();
            Command::none()
        }
        Msg::NewLabelAdded(label) => {
            if !state.known_labels.iter().any(|l| l == &label) {
                state.known_labels.push(label);
            }
            Command::none()
        }
        Msg::NewAssigneeAdded(assignee) => {
            if !state.known_assignees.iter().any(|a| a == &assignee) {
                state.known_assignees.push(assignee);
            }
            Command::none()
        }

        Msg::Resize(w, h) => {
            state.terminal_size = (w, h);
            let height = (h as usize).saturating_sub(header_footer_rows(state));
            state.projection.viewport.height = height.max(1);
            state.projection.viewport.clamp(state.projection.rows().len());
            Command::none()
        }
        Msg::Key(key) => handle_key(state, key),
    }
}

fn header_footer_rows(state: &AppState) -> usize {
    match state.focus {
        Focus::Details => 6,
        Focus::Tree => 4,
    }
}

fn current_status(state: &AppState, issue_id: &str) -> Option<Status> {
    let node_id = state.forest.find(issue_id)?;
    Some(state.forest.node(node_id).issue.status)
}

fn schedule_clear(msg: Msg, after: Duration) -> Command<Msg> {
    Command::perform_async(async move {
        tokio::time::sleep(after).await;
        Some(msg)
    })
}

// -- Refresh --------------------------------------------------------------

fn handle_tick(state: &mut AppState) -> Command<Msg> {
    if !state.auto_refresh || state.refresh_interval.is_zero() {
        return Command::none();
    }
    let reschedule = schedule_clear(Msg::Tick, state.refresh_interval);
    match state.refresh.should_poll_refresh() {
        Ok(true) => Command::combine([begin_refresh(state), reschedule]),
        Ok(false) => reschedule,
        Err(e) => {
            state.last_error = Some(e.to_string());
            reschedule
        }
    }
}

fn begin_refresh(state: &mut AppState) -> Command<Msg> {
    state.refresh.begin_refresh();
    let handle = state.refresh.handle();
    Command::perform_async(async move {
        let completion = match execute_refresh(handle).await {
            Ok(outcome) => RefreshCompletion::from(outcome),
            Err(e) => RefreshCompletion::failed(e.to_string()),
        };
        Some(Msg::RefreshComplete(Box::new(completion)))
    })
}

fn manual_refresh(state: &mut AppState) -> Command<Msg> {
    begin_refresh(state)
}

fn handle_refresh_complete(state: &mut AppState, completion: RefreshCompletion) -> Command<Msg> {
    match completion.forest {
        Some(new_forest) => {
            let diff = completion.diff;
            let db_mod_time = completion.db_mod_time.unwrap_or_else(std::time::SystemTime::now);
            state.refresh.commit_refresh(completion.digest, db_mod_time);
            state.forest = crate::refresh::transfer_state(&state.forest, new_forest, &mut state.projection);
            state.last_refresh_stats = Some(diff);
            refresh_known_lists(state);
            preload_unloaded_comments(state)
        }
        None => {
            state.refresh.fail_refresh();
            let err = completion.err.unwrap_or_else(|| "refresh failed".to_string());
            let is_new = state.last_error.as_deref() != Some(err.as_str());
            state.last_error = Some(err.clone());
            state.last_refresh_stats = None;
            if is_new {
                show_error_toast(state, err)
            } else {
                Command::none()
            }
        }
    }
}

fn refresh_known_lists(state: &mut AppState) {
    let mut labels: Vec<String> = Vec::new();
    let mut assignees: Vec<String> = Vec::new();
    for id in state.forest.issue_ids().collect::<Vec<_>>() {
        let node_id = state.forest.find(id).expect("issue_ids returns known ids");
        let issue = &state.forest.node(node_id).issue;
        for label in &issue.labels {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        if let Some(assignee) = &issue.assignee {
            if !assignees.contains(assignee) {
                assignees.push(assignee.clone());
            }
        }
    }
    state.known_labels = labels;
    state.known_assignees = assignees;
}

fn show_error_toast(state: &mut AppState, message: String) -> Command<Msg> {
    state.error_toast = Some(message);
    schedule_clear(Msg::ErrorToastTick, ERROR_TOAST_DURATION)
}

fn handle_mutation_complete(state: &mut AppState, err: Option<String>) -> Command<Msg> {
    match err {
        Some(message) => {
            let toast = show_error_toast(state, message);
            Command::combine([toast, manual_refresh(state)])
        }
        None => manual_refresh(state),
    }
}

/// Shared shape for mutations with a dedicated success toast: error toasts
/// always win over success, and either way a refresh is scheduled to
/// reconcile with the store.
fn handle_mutation_result(
    state: &mut AppState,
    err: Option<String>,
    success_message: &str,
    set_toast: impl FnOnce(&mut AppState, Option<String>),
    tick: Msg,
) -> Command<Msg> {
    match err {
        Some(message) => {
            let toast = show_error_toast(state, message);
            Command::combine([toast, manual_refresh(state)])
        }
        None => {
            set_toast(state, Some(success_message.to_string()));
            Command::combine([schedule_clear(tick, OPERATION_TOAST_DURATION), manual_refresh(state)])
        }
    }
}

/// Background preload: spawns one bounded-semaphore fetch per node that
/// hasn't loaded comments yet, each reporting back as its own
/// `Msg::CommentLoaded` as the worker pool drains.
fn preload_unloaded_comments(state: &AppState) -> Command<Msg> {
    let pending: Vec<String> = state
        .forest
        .issue_ids()
        .filter(|id| {
            state
                .forest
                .find(id)
                .map(|n| !state.forest.node(n).comments_loaded)
                .unwrap_or(false)
        })
        .map(|id| id.to_string())
        .collect();
    Command::combine(pending.into_iter().map(|id| preload_comment(state, id)))
}

/// Spawns a single comment fetch for `issue_id`, gated by the engine's
/// shared preload semaphore.
fn preload_comment(state: &AppState, issue_id: String) -> Command<Msg> {
    let task = state.refresh.comment_preload_task(issue_id.clone());
    Command::perform_async(async move {
        let result = task.await;
        let (comments, err) = match result {
            Ok(comments) => (comments, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        Some(Msg::CommentLoaded { issue_id, comments, err })
    })
}

fn handle_comment_loaded(
    state: &mut AppState,
    issue_id: String,
    comments: Vec<crate::model::Comment>,
    err: Option<String>,
) -> Command<Msg> {
    if let Some(node_id) = state.forest.find(&issue_id) {
        let node = state.forest.node_mut(node_id);
        match err {
            Some(message) => node.comment_error = Some(message),
            None => {
                node.issue.comments = comments;
                node.comments_loaded = true;
                node.comment_error = None;
            }
        }
    }
    Command::none()
}

// -- Mutation command builders ---------------------------------------------

fn spawn_create(state: &mut AppState, submission: FormSubmission) -> Command<Msg> {
    let client = state.client.clone();
    Command::perform_async(async move {
        let created = client.create(&submission.title, submission.issue_type, submission.priority).await;
        let id = match created {
            Ok(id) => id,
            Err(e) => return Some(Msg::CreateComplete { id: None, err: Some(e.to_string()) }),
        };
        if let Some(parent) = &submission.parent_id {
            if let Err(e) = client.add_dependency(&id, parent).await {
                return Some(Msg::CreateComplete { id: Some(id), err: Some(e.to_string()) });
            }
        }
        for label in &submission.labels {
            if let Err(e) = client.add_label(&id, label).await {
                return Some(Msg::CreateComplete { id: Some(id), err: Some(e.to_string()) });
            }
        }
        if !submission.description.is_empty() || submission.assignee.is_some() {
            let mutations = IssueMutations {
                description: (!submission.description.is_empty()).then(|| submission.description.clone()),
                assignee: submission.assignee.clone().map(Some),
                ..Default::default()
            };
            if let Err(e) = client.update_bead(&id, &mutations).await {
                return Some(Msg::CreateComplete { id: Some(id), err: Some(e.to_string()) });
            }
        }
        Some(Msg::CreateComplete { id: Some(id), err: None })
    })
}

fn spawn_update(state: &mut AppState, submission: FormSubmission) -> Command<Msg> {
    let client = state.client.clone();
    Command::perform_async(async move {
        let id = submission.issue_id.clone().expect("edit submissions carry an issue id");
        if let Some(parent) = &submission.parent_id {
            let _ = client.add_dependency(&id, parent).await;
        }
        let mutations = IssueMutations {
            title: Some(submission.title.clone()),
            description: Some(submission.description.clone()),
            priority: Some(submission.priority),
            issue_type: Some(submission.issue_type),
            assignee: Some(submission.assignee.clone()),
            ..Default::default()
        };
        let result = client.update_bead(&id, &mutations).await;
        Some(Msg::BeadUpdateComplete { err: result.err().map(|e| e.to_string()) })
    })
}

// -- Key dispatch -----------------------------------------------------------

fn handle_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return Command::quit();
    }

    if !state.active_overlay.is_none() {
        return handle_overlay_key(state, key);
    }
    if state.search_active {
        return handle_search_key(state, key);
    }
    handle_tree_key(state, key)
}

fn handle_tree_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    let focused_issue_id = cursor_issue_id(state);
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            Command::quit()
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.projection.viewport.move_down(state.projection.rows().len());
            Command::none()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.projection.viewport.move_up(state.projection.rows().len());
            Command::none()
        }
        KeyCode::Char('g') | KeyCode::Home => {
            state.projection.viewport.move_to_top(state.projection.rows().len());
            Command::none()
        }
        KeyCode::Char('G') | KeyCode::End => {
            state.projection.viewport.move_to_bottom(state.projection.rows().len());
            Command::none()
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right | KeyCode::Char('h')
        | KeyCode::Char('l') => {
            toggle_cursor_row(state);
            Command::none()
        }
        KeyCode::Tab => {
            state.focus = match state.focus {
                Focus::Tree => Focus::Details,
                Focus::Details => Focus::Tree,
            };
            Command::none()
        }
        KeyCode::Char('/') => {
            state.search_active = true;
            Command::none()
        }
        KeyCode::Char('r') => manual_refresh(state),
        KeyCode::Char('e') => {
            if let Some(err) = state.last_error.clone() {
                show_error_toast(state, err)
            } else {
                Command::none()
            }
        }
        KeyCode::Char('s') => {
            if let Some(id) = focused_issue_id {
                if let Some(status) = current_status(state, &id) {
                    state.active_overlay = ActiveOverlay::Status(StatusOverlay::new(id, status));
                }
            }
            Command::none()
        }
        KeyCode::Char('L') => {
            if let Some(id) = focused_issue_id {
                let existing = issue_labels(state, &id);
                state.active_overlay =
                    ActiveOverlay::Labels(LabelsOverlay::new(id, existing, state.known_labels.clone()));
            }
            Command::none()
        }
        KeyCode::Char('n') => {
            let parents = state.forest.issue_ids().map(|s| s.to_string()).collect::<Vec<_>>();
            state.active_overlay =
                ActiveOverlay::Create(CreateEditOverlay::new_create(parents, state.known_labels.clone(), state.known_assignees.clone()));
            Command::none()
        }
        KeyCode::Char('E') => {
            if let Some(id) = focused_issue_id {
                if let Some(node_id) = state.forest.find(&id) {
                    let issue = state.forest.node(node_id).issue.clone();
                    let mut form = CreateEditOverlay::new_edit(
                        issue.id,
                        issue.title,
                        issue.description,
                        issue.issue_type,
                        issue.priority,
                        issue.labels,
                        state.known_labels.clone(),
                        issue.assignee,
                        state.known_assignees.clone(),
                    );
                    form.set_root_mode(if issue.parent_ids.is_empty() { RootMode::Root } else { RootMode::Child });
                    state.active_overlay = ActiveOverlay::Edit(form);
                }
            }
            Command::none()
        }
        KeyCode::Char('x') => {
            if let Some(id) = focused_issue_id {
                let has_dependents = state
                    .forest
                    .find(&id)
                    .map(|n| !state.forest.node(n).children.is_empty())
                    .unwrap_or(false);
                state.active_overlay = ActiveOverlay::Delete(DeleteOverlay::new(id, has_dependents));
            }
            Command::none()
        }
        KeyCode::Char('m') => {
            if let Some(id) = focused_issue_id {
                state.active_overlay = ActiveOverlay::Comment(CommentOverlay::new(id));
            }
            Command::none()
        }
        KeyCode::Char('y') => {
            if let Some(id) = focused_issue_id {
                state.copy_toast = Some(format!("Copied {id}"));
                schedule_clear(Msg::CopyToastTick, OPERATION_TOAST_DURATION)
            } else {
                Command::none()
            }
        }
        KeyCode::Char('c') => {
            let retry = focused_issue_id.as_ref().and_then(|id| {
                let node_id = state.forest.find(id)?;
                state.forest.node(node_id).comment_error.as_ref()?;
                Some(id.clone())
            });
            match retry {
                Some(id) => preload_comment(state, id),
                None => Command::none(),
            }
        }
        _ => Command::none(),
    }
}

fn cursor_issue_id(state: &AppState) -> Option<String> {
    let row = state.projection.rows().get(state.projection.viewport.cursor)?;
    Some(state.forest.node(row.node).issue.id.clone())
}

fn issue_labels(state: &AppState, issue_id: &str) -> Vec<String> {
    state
        .forest
        .find(issue_id)
        .map(|id| state.forest.node(id).issue.labels.clone())
        .unwrap_or_default()
}

fn toggle_cursor_row(state: &mut AppState) {
    if let Some(row) = state.projection.rows().get(state.projection.viewport.cursor).copied() {
        state.projection.toggle(row.identity_key());
        state.projection.rebuild(&state.forest);
    }
}

fn handle_search_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    match key.code {
        KeyCode::Esc => {
            state.search_active = false;
            state.search_text.clear();
            state.projection.clear_filter(&state.forest);
        }
        KeyCode::Enter => {
            state.search_active = false;
        }
        KeyCode::Backspace => {
            state.search_text.pop();
            state.projection.set_filter_text(&state.search_text, &state.forest);
        }
        KeyCode::Char(c) => {
            state.search_text.push(c);
            state.projection.set_filter_text(&state.search_text, &state.forest);
        }
        _ => {}
    }
    Command::none()
}

fn handle_overlay_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    match &mut state.active_overlay {
        ActiveOverlay::Status(_) => handle_status_key(state, key),
        ActiveOverlay::Labels(_) => handle_labels_key(state, key),
        ActiveOverlay::Create(_) | ActiveOverlay::Edit(_) => handle_form_key(state, key),
        ActiveOverlay::Delete(_) => handle_delete_key(state, key),
        ActiveOverlay::Comment(_) => handle_comment_key(state, key),
        ActiveOverlay::None => Command::none(),
    }
}

fn handle_status_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    let overlay = match &mut state.active_overlay {
        ActiveOverlay::Status(o) => o,
        _ => return Command::none(),
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            overlay.move_up();
            Command::none()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            overlay.move_down();
            Command::none()
        }
        KeyCode::Enter => Command::message(Msg::StatusChanged(overlay.confirm())),
        KeyCode::Esc => Command::message(Msg::StatusCancelled),
        _ => Command::none(),
    }
}

fn handle_labels_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    let overlay = match &mut state.active_overlay {
        ActiveOverlay::Labels(o) => o,
        _ => return Command::none(),
    };
    let dropdown_open = overlay.chips().combo().is_open();
    match key.code {
        KeyCode::Esc => {
            if dropdown_open {
                overlay.chips_mut().combo_mut().escape();
                Command::none()
            } else {
                Command::message(Msg::LabelsCancelled)
            }
        }
        KeyCode::Enter => {
            if !dropdown_open && overlay.chips().combo().text().is_empty() {
                Command::message(Msg::LabelsUpdated(overlay.confirm()))
            } else {
                overlay.enter(Instant::now());
                Command::none()
            }
        }
        KeyCode::Tab => {
            overlay.chips_mut().tab(Instant::now());
            Command::none()
        }
        KeyCode::Backspace => {
            overlay.backspace();
            Command::none()
        }
        KeyCode::Down => {
            overlay.chips_mut().combo_mut().down_from_idle();
            overlay.chips_mut().combo_mut().move_down();
            Command::none()
        }
        KeyCode::Up => {
            overlay.chips_mut().combo_mut().move_up();
            Command::none()
        }
        KeyCode::Char(c) => {
            overlay.insert(c);
            Command::none()
        }
        _ => Command::none(),
    }
}

fn handle_delete_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    let overlay = match &mut state.active_overlay {
        ActiveOverlay::Delete(o) => o,
        _ => return Command::none(),
    };
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('c') => {
            overlay.toggle_cascade();
            Command::none()
        }
        KeyCode::Enter | KeyCode::Char('y') => Command::message(Msg::DeleteConfirmed(overlay.confirm())),
        KeyCode::Esc | KeyCode::Char('n') => Command::message(Msg::DeleteCancelled),
        _ => Command::none(),
    }
}

fn handle_comment_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    let overlay = match &mut state.active_overlay {
        ActiveOverlay::Comment(o) => o,
        _ => return Command::none(),
    };
    match key.code {
        KeyCode::Esc => Command::message(Msg::CommentCancelled),
        KeyCode::Enter => match overlay.submit() {
            Some(added) => Command::message(Msg::CommentAdded(added)),
            None => Command::none(),
        },
        KeyCode::Backspace => {
            overlay.backspace();
            Command::none()
        }
        KeyCode::Char(c) => {
            overlay.insert(c);
            Command::none()
        }
        _ => Command::none(),
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Command<Msg> {
    let mode = match &state.active_overlay {
        ActiveOverlay::Create(_) => FormMode::Create,
        ActiveOverlay::Edit(_) => FormMode::Edit,
        _ => return Command::none(),
    };
    let form = match &mut state.active_overlay {
        ActiveOverlay::Create(f) | ActiveOverlay::Edit(f) => f,
        _ => return Command::none(),
    };

    if key.code == KeyCode::Esc {
        return match form.escape() {
            FormOutcome::DroppedDropdown | FormOutcome::RevertedInput => Command::none(),
            FormOutcome::Cancelled => Command::message(Msg::CreateCancelled),
        };
    }
    if key.code == KeyCode::Tab {
        form.tab();
        return Command::none();
    }
    if key.code == KeyCode::BackTab {
        form.shift_tab();
        return Command::none();
    }

    match form.zone() {
        Zone::Parent => match key.code {
            KeyCode::Down => {
                form.parent_down_from_idle();
                if form.parent_is_open() {
                    form.parent_move_down();
                }
            }
            KeyCode::Up => form.parent_move_up(),
            KeyCode::Enter => form.parent_enter(),
            KeyCode::Backspace => form.parent_backspace(),
            KeyCode::Char(c) => form.parent_insert(c),
            _ => {}
        },
        Zone::Title => match key.code {
            KeyCode::Enter => {
                if let Some(submission) = form.submit() {
                    let msg = match mode {
                        FormMode::Create => Msg::BeadCreated(submission),
                        FormMode::Edit => Msg::BeadUpdated(submission),
                    };
                    return Command::message(msg);
                }
                return schedule_clear(Msg::TitleFlashClear, TITLE_FLASH_DURATION);
            }
            KeyCode::Backspace => {
                let mut title = form.title().to_string();
                title.pop();
                form.set_title(title);
            }
            KeyCode::Char(c) => {
                let mut title = form.title().to_string();
                title.push(c);
                form.set_title(title);
                if form.type_flash() {
                    return schedule_clear(Msg::TypeInferenceFlashClear, TYPE_FLASH_DURATION);
                }
            }
            _ => {}
        },
        Zone::Description => match key.code {
            KeyCode::Backspace => {
                let mut description = form.description().to_string();
                description.pop();
                form.set_description(description);
            }
            KeyCode::Char(c) => {
                let mut description = form.description().to_string();
                description.push(c);
                form.set_description(description);
            }
            _ => {}
        },
        Zone::Type => match key.code {
            KeyCode::Left | KeyCode::Char('h') => form.type_move(-1),
            KeyCode::Right | KeyCode::Char('l') => form.type_move(1),
            KeyCode::Char('j') => form.tab(),
            _ => {}
        },
        Zone::Priority => match key.code {
            KeyCode::Left => form.priority_move(-1),
            KeyCode::Right => form.priority_move(1),
            KeyCode::Char(c @ ('c' | 'h' | 'm' | 'l' | 'b')) => form.priority_jump_mnemonic(c),
            _ => {}
        },
        Zone::Labels => match key.code {
            KeyCode::Enter => form.labels_enter(Instant::now()),
            KeyCode::Backspace => form.labels_backspace(),
            KeyCode::Down => {
                form.labels_down_from_idle();
                if form.labels_is_open() {
                    form.labels_move_down();
                }
            }
            KeyCode::Up => form.labels_move_up(),
            KeyCode::Char(c) => form.labels_insert(c),
            _ => {}
        },
        Zone::Assignee => match key.code {
            KeyCode::Down => {
                form.assignee_down_from_idle();
                if form.assignee_is_open() {
                    form.assignee_move_down();
                }
            }
            KeyCode::Up => form.assignee_move_up(),
            KeyCode::Enter => {
                if let Some(new_value) = form.assignee_enter() {
                    return Command::message(Msg::NewAssigneeAdded(new_value));
                }
            }
            KeyCode::Backspace => form.assignee_backspace(),
            KeyCode::Char(c) => form.assignee_insert(c),
            _ => {}
        },
    }
    Command::none()
}
