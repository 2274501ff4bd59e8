//! Overlay action types.

/// The result of an overlay handling an input event.
///
/// This tells the runtime what to do after an overlay processes an event.
pub enum OverlayAction<M> {
    /// Event was consumed by the overlay, stop propagation.
    Consumed,
    /// Event produced a message to dispatch through `update()`.
    Message(M),
    /// Dismiss (pop) this overlay, event is consumed.
    Dismiss,
    /// Dismiss this overlay and dispatch a message.
    DismissWithMessage(M),
    /// Pass the event to the next overlay or to the app.
    Propagate,
}
