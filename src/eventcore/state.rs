//! The application's model: the current forest/projection, overlay slot,
//! focus, toasts, and the bookkeeping EventCore needs to dispatch messages.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::model::Forest;
use crate::overlays::ActiveOverlay;
use crate::refresh::{DiffStats, RefreshEngine};
use crate::store::BackendClient;
use crate::theme::Theme;
use crate::tree::TreeProjection;

/// Which pane receives non-overlay key input. Tab toggles this iff the
/// detail pane is shown; search mode is a sub-mode of `Tree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Details,
}

/// Immutable startup parameters, read once by `init`.
#[derive(Clone)]
pub struct AppConfig {
    pub client: Arc<dyn BackendClient>,
    pub db_path: PathBuf,
    pub refresh_interval: Duration,
    pub auto_refresh: bool,
    pub known_labels: Vec<String>,
    pub known_assignees: Vec<String>,
    pub theme: Theme,
    /// Overrides the width-based auto layout when set.
    pub column_mode: Option<bool>,
}

/// Full application state. Rendering reads it; `update` is the only writer.
pub struct AppState {
    pub client: Arc<dyn BackendClient>,
    pub theme: Theme,
    pub column_mode: Option<bool>,
    pub refresh: RefreshEngine,
    pub auto_refresh: bool,
    pub refresh_interval: Duration,

    pub forest: Forest,
    pub projection: TreeProjection,

    pub focus: Focus,
    pub search_active: bool,
    pub search_text: String,

    pub active_overlay: ActiveOverlay,

    pub last_error: Option<String>,
    pub last_refresh_stats: Option<DiffStats>,

    pub error_toast: Option<String>,
    pub copy_toast: Option<String>,
    pub status_toast: Option<String>,
    pub labels_toast: Option<String>,
    pub create_toast: Option<String>,
    pub update_toast: Option<String>,
    /// A pending "new version available" notice; persists until replaced,
    /// unlike the ticked toasts above.
    pub version_notice: Option<String>,

    pub known_labels: Vec<String>,
    pub known_assignees: Vec<String>,

    pub viewport_height: usize,
    pub terminal_size: (u16, u16),

    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, viewport_height: usize) -> Self {
        let probe: Arc<dyn crate::refresh::DbProbe> = Arc::new(crate::refresh::FileDbProbe);
        let refresh = RefreshEngine::new(config.client.clone(), probe, config.db_path.clone());
        Self {
            client: config.client,
            theme: config.theme,
            column_mode: config.column_mode,
            refresh,
            auto_refresh: config.auto_refresh,
            refresh_interval: config.refresh_interval,
            forest: Forest::build(Vec::new()),
            projection: TreeProjection::new(viewport_height),
            focus: Focus::Tree,
            search_active: false,
            search_text: String::new(),
            active_overlay: ActiveOverlay::None,
            last_error: None,
            last_refresh_stats: None,
            error_toast: None,
            copy_toast: None,
            status_toast: None,
            labels_toast: None,
            create_toast: None,
            update_toast: None,
            version_notice: None,
            known_labels: config.known_labels,
            known_assignees: config.known_assignees,
            viewport_height,
            terminal_size: (80, 24),
            should_quit: false,
        }
    }
}
