//! Application-level test harness: drives a full [`App`] through a virtual
//! terminal, including async commands and subscriptions.
//!
//! Where [`TestHarness`](super::TestHarness) renders raw widgets, `AppHarness`
//! owns an [`AsyncRuntime`] and exercises it the way a real event loop would:
//! dispatching messages, ticking the render loop, and advancing paused tokio
//! time to settle async work deterministically in tests.

use std::io;
use std::time::Duration;

use ratatui::layout::Position;
use tokio_util::sync::CancellationToken;

use crate::app::{
    App, AsyncRuntime, AsyncRuntimeConfig as RuntimeConfig, BoxedSubscription, Subscription,
};
use crate::backend::CaptureBackend;
use crate::input::{Event, EventQueue};

/// Drives an [`App`] end to end for tests: dispatch, tick, render, assert.
pub struct AppHarness<A: App>
where
    A::Message: Send + Clone + 'static,
{
    runtime: AsyncRuntime<A, CaptureBackend>,
}

impl<A: App> AppHarness<A>
where
    A::Message: Send + Clone + 'static,
{
    /// Creates a new harness with the given terminal dimensions.
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        let runtime = AsyncRuntime::virtual_terminal(width, height)?;
        Ok(Self { runtime })
    }

    /// Creates a new harness with custom runtime configuration.
    pub fn with_config(width: u16, height: u16, config: RuntimeConfig) -> io::Result<Self> {
        let runtime = AsyncRuntime::virtual_terminal_with_config(width, height, config)?;
        Ok(Self { runtime })
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    /// Returns a reference to the current state.
    pub fn state(&self) -> &A::State {
        self.runtime.state()
    }

    /// Returns a mutable reference to the state.
    pub fn state_mut(&mut self) -> &mut A::State {
        self.runtime.state_mut()
    }

    /// Returns the captured output as plain text.
    pub fn screen(&self) -> String {
        self.runtime.display()
    }

    /// Returns the captured output with ANSI color codes.
    pub fn screen_ansi(&self) -> String {
        self.runtime.display_ansi()
    }

    /// Returns the cell at the given position, or `None` if out of bounds.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<&crate::backend::EnhancedCell> {
        self.runtime.backend().cell(x, y)
    }

    /// Returns a reference to the backend.
    pub fn backend(&self) -> &CaptureBackend {
        self.runtime.backend()
    }

    /// Returns a mutable reference to the backend.
    pub fn backend_mut(&mut self) -> &mut CaptureBackend {
        self.runtime.backend_mut()
    }

    // -------------------------------------------------------------------------
    // Message dispatch
    // -------------------------------------------------------------------------

    /// Dispatches a message, spawning any resulting async commands and
    /// draining any that resolve immediately.
    pub fn dispatch(&mut self, msg: A::Message) {
        self.runtime.dispatch(msg);
        self.runtime.process_pending();
    }

    /// Dispatches multiple messages in order.
    pub fn dispatch_all(&mut self, messages: impl IntoIterator<Item = A::Message>) {
        for msg in messages {
            self.dispatch(msg);
        }
    }

    /// Returns a sender usable to deliver messages to the runtime from
    /// outside the dispatch path (e.g. simulating a subscription source).
    pub fn message_sender(&self) -> tokio::sync::mpsc::Sender<A::Message> {
        self.runtime.message_sender()
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Adds a subscription to the runtime.
    pub fn subscribe(&mut self, subscription: impl Subscription<A::Message>) {
        self.runtime.subscribe(subscription);
    }

    /// Adds multiple subscriptions to the runtime.
    pub fn subscribe_all(&mut self, subscriptions: Vec<BoxedSubscription<A::Message>>) {
        self.runtime.subscribe_all(subscriptions);
    }

    // -------------------------------------------------------------------------
    // Event queue
    // -------------------------------------------------------------------------

    /// Returns a mutable reference to the event queue.
    pub fn events(&mut self) -> &mut EventQueue {
        self.runtime.events()
    }

    /// Queues a single event.
    pub fn push_event(&mut self, event: Event) {
        self.runtime.events().push(event);
    }

    /// Types a string as keyboard input.
    pub fn type_str(&mut self, s: &str) {
        self.runtime.events().type_str(s);
    }

    /// Simulates pressing Enter.
    pub fn enter(&mut self) {
        self.runtime.events().enter();
    }

    /// Simulates pressing Escape.
    pub fn escape(&mut self) {
        self.runtime.events().escape();
    }

    /// Simulates pressing Tab.
    pub fn tab(&mut self) {
        self.runtime.events().tab();
    }

    /// Simulates `Ctrl+<key>`.
    pub fn ctrl(&mut self, c: char) {
        self.runtime.events().ctrl(c);
    }

    /// Simulates a mouse click at the given position.
    pub fn click(&mut self, x: u16, y: u16) {
        self.runtime.events().click(x, y);
    }

    // -------------------------------------------------------------------------
    // Runtime control
    // -------------------------------------------------------------------------

    /// Processes all pending queued events.
    pub fn process_events(&mut self) {
        self.runtime.process_all_events();
    }

    /// Runs a single tick of the application (events, pending async work, render).
    pub fn tick(&mut self) -> io::Result<()> {
        self.runtime.tick()
    }

    /// Runs multiple ticks.
    pub fn run_ticks(&mut self, ticks: usize) -> io::Result<()> {
        self.runtime.run_ticks(ticks)
    }

    /// Renders the current state.
    pub fn render(&mut self) -> io::Result<()> {
        self.runtime.render()
    }

    /// Returns true if the application has asked to quit.
    pub fn should_quit(&self) -> bool {
        self.runtime.should_quit()
    }

    /// Forces a quit.
    pub fn quit(&mut self) {
        self.runtime.quit();
    }

    /// Returns the runtime's cancellation token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.runtime.cancellation_token()
    }

    // -------------------------------------------------------------------------
    // Content queries
    // -------------------------------------------------------------------------

    /// Returns true if the screen contains the given text.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.runtime.contains_text(needle)
    }

    /// Finds all positions of the given text.
    pub fn find_text(&self, needle: &str) -> Vec<Position> {
        self.runtime.find_text(needle)
    }

    /// Returns the content of a specific row.
    pub fn row(&self, y: u16) -> String {
        self.runtime.backend().row_content(y)
    }

    // -------------------------------------------------------------------------
    // Assertions
    // -------------------------------------------------------------------------

    /// Asserts that the screen contains the given text.
    pub fn assert_contains(&self, needle: &str) {
        if !self.contains_text(needle) {
            panic!(
                "Expected screen to contain '{}', but it was not found.\n\nScreen:\n{}",
                needle,
                self.screen()
            );
        }
    }

    /// Asserts that the screen does not contain the given text.
    pub fn assert_not_contains(&self, needle: &str) {
        if self.contains_text(needle) {
            panic!(
                "Expected screen to NOT contain '{}', but it was found.\n\nScreen:\n{}",
                needle,
                self.screen()
            );
        }
    }
}

// Time control, only meaningful under tokio's paused-time test util.
#[cfg(test)]
impl<A: App> AppHarness<A>
where
    A::Message: Send + Clone + 'static,
{
    /// Advances paused tokio time by `duration`, yielding between steps so
    /// spawned tasks waiting on timers get to run.
    pub async fn advance_time(&mut self, duration: Duration) {
        let step = Duration::from_millis(10);
        let mut remaining = duration;

        while remaining > Duration::ZERO {
            let advance_by = remaining.min(step);
            tokio::time::advance(advance_by).await;
            tokio::time::sleep(Duration::ZERO).await;
            tokio::task::yield_now().await;
            remaining = remaining.saturating_sub(advance_by);
        }

        self.runtime.process_pending();
    }

    /// Advances time by `duration`; under paused time this never actually waits.
    pub async fn sleep(&mut self, duration: Duration) {
        self.advance_time(duration).await;
    }

    /// Polls `condition` against the state, advancing time in steps until it
    /// holds or `timeout` elapses. Returns whether it was met.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> bool
    where
        F: Fn(&A::State) -> bool,
    {
        let step = Duration::from_millis(10);
        let mut elapsed = Duration::ZERO;

        while elapsed < timeout {
            if condition(self.runtime.state()) {
                return true;
            }
            self.advance_time(step).await;
            elapsed += step;
        }

        condition(self.runtime.state())
    }

    /// Waits for the screen to contain `needle`, re-rendering between steps.
    pub async fn wait_for_text(&mut self, needle: &str, timeout: Duration) -> bool {
        let step = Duration::from_millis(10);
        let mut elapsed = Duration::ZERO;

        while elapsed < timeout {
            self.runtime.render().ok();
            if self.contains_text(needle) {
                return true;
            }
            self.advance_time(step).await;
            elapsed += step;
        }

        self.runtime.render().ok();
        self.contains_text(needle)
    }
}
