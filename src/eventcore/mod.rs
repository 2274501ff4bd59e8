//! Wires the state/message/update triad into the `App` trait the runtime
//! drives. `AppConfig` is threaded in through a process-wide `OnceLock`
//! because `App::init` takes no arguments; `main` must call [`configure`]
//! before constructing the runtime.

mod msg;
mod state;
mod update;

pub use msg::{Msg, RefreshCompletion};
pub use state::{AppConfig, AppState, Focus};

use std::sync::OnceLock;

use ratatui::Frame;

use crate::app::{App, Command};
use crate::input::Event;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Stashes the startup configuration for `AbacusApp::init` to pick up.
/// Must be called exactly once, before the runtime starts.
pub fn configure(config: AppConfig) {
    CONFIG.set(config).ok().expect("configure called more than once");
}

pub struct AbacusApp;

impl App for AbacusApp {
    type State = AppState;
    type Message = Msg;

    fn init() -> (AppState, Command<Msg>) {
        let config = CONFIG.get().cloned().expect("configure must run before the runtime starts");
        let interval = config.refresh_interval;
        let auto_refresh = config.auto_refresh;
        let mut state = AppState::new(config, 24);

        state.refresh.begin_refresh();
        let handle = state.refresh.handle();
        let initial_refresh = Command::perform_async(async move {
            let completion = match crate::refresh::execute_refresh(handle).await {
                Ok(outcome) => RefreshCompletion::from(outcome),
                Err(e) => RefreshCompletion::failed(e.to_string()),
            };
            Some(Msg::RefreshComplete(Box::new(completion)))
        });

        let commands = if auto_refresh && !interval.is_zero() {
            let tick = Command::perform_async(async move {
                tokio::time::sleep(interval).await;
                Some(Msg::Tick)
            });
            Command::combine([initial_refresh, tick])
        } else {
            initial_refresh
        };

        (state, commands)
    }

    fn update(state: &mut AppState, msg: Msg) -> Command<Msg> {
        update::update(state, msg)
    }

    fn view(state: &AppState, frame: &mut Frame) {
        crate::render::view(state, frame);
    }

    fn handle_event_with_state(_state: &AppState, event: &Event) -> Option<Msg> {
        match event {
            Event::Key(key) => Some(Msg::Key(*key)),
            Event::Resize(w, h) => Some(Msg::Resize(*w, *h)),
            Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
        }
    }

    fn should_quit(state: &AppState) -> bool {
        state.should_quit
    }
}
