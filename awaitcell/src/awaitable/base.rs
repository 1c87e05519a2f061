use super::state::State;
use crate::continuation::Continuation;
use crate::error::Error;

use std::mem;

/// Capabilities shared by every awaitable, independent of its result type.
///
/// This is the surface a scheduler works against: it can inspect the state
/// of any awaitable and attach a continuation to it without knowing what the
/// operation produces.
pub trait AwaitableBase {
    /// Current lifecycle state.
    fn state(&self) -> State;

    /// Returns `true` unless the awaitable was moved from or canceled.
    fn is_valid(&self) -> bool {
        self.state().is_valid()
    }

    /// Returns `true` once a value or an error is available.
    fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Returns `true` if the awaitable failed with an error.
    fn has_error(&self) -> bool {
        self.state() == State::FAILED
    }

    /// Returns `true` if the producer canceled the operation.
    fn is_canceled(&self) -> bool {
        self.state() == State::CANCELED
    }

    /// Returns the stored error.
    ///
    /// # Panics
    ///
    /// Panics unless [`has_error`](Self::has_error) is `true`.
    fn error(&self) -> &Error;

    /// Returns `true` if a continuation is attached.
    fn has_continuation(&self) -> bool;

    /// Attaches a continuation.
    ///
    /// # Panics
    ///
    /// Panics if the awaitable is not pending or already has a continuation.
    fn set_continuation(&mut self, continuation: Continuation);

    /// Detaches the continuation without invoking it.
    fn clear_continuation(&mut self);
}

/// State word and continuation shared by the value-bearing and the
/// value-less awaitable.
#[derive(Debug, Default)]
pub(crate) struct Header {
    pub(crate) state: State,
    continuation: Continuation,
}

impl Header {
    pub(crate) fn moved() -> Self {
        Self {
            state: State::MOVED,
            continuation: Continuation::none(),
        }
    }

    pub(crate) fn assert_pending(&self, op: &str) {
        assert!(
            self.state.is_pending(),
            "{op} on an awaitable in state {:?}",
            self.state
        );
    }

    /// Records the terminal state and hands back the continuation to invoke.
    pub(crate) fn settle(&mut self, state: State) -> Continuation {
        debug_assert!(state.is_terminal());

        tracing::trace!(from = ?self.state, to = ?state, "awaitable settled");
        self.state = state;

        mem::take(&mut self.continuation)
    }

    pub(crate) fn reset(&mut self, state: State) {
        assert!(
            !state.is_ready(),
            "reset to {state:?} would claim a result that is not stored"
        );

        tracing::trace!(from = ?self.state, to = ?state, "awaitable reset");
        self.state = state;
        self.continuation = Continuation::none();
    }

    /// Moves state and continuation out, leaving the header moved.
    pub(crate) fn take(&mut self) -> Self {
        tracing::trace!(state = ?self.state, "awaitable moved");
        mem::replace(self, Self::moved())
    }

    pub(crate) fn has_continuation(&self) -> bool {
        self.continuation.is_set()
    }

    pub(crate) fn set_continuation(&mut self, continuation: Continuation) {
        assert!(
            self.state.is_pending(),
            "continuation may be set only while the awaitable is pending"
        );
        assert!(
            !continuation.is_set() || !self.continuation.is_set(),
            "continuation should be cleared before being replaced"
        );

        self.continuation = continuation;
    }

    pub(crate) fn clear_continuation(&mut self) {
        self.continuation = Continuation::none();
    }
}
