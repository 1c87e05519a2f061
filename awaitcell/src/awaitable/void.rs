use super::base::{AwaitableBase, Header};
use super::state::State;
use crate::continuation::Continuation;
use crate::error::Error;

use std::mem;

/// The outcome of an operation that produces no value.
///
/// `Completion` follows the same state machine, continuation, move and swap
/// contracts as [`Awaitable`](crate::Awaitable); its payload is reduced to
/// an [`Error`].
#[derive(Debug, Default)]
pub struct Completion {
    header: Header,
    error: Error,
}

impl Completion {
    /// Creates a pending completion with no continuation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state word.
    pub fn state(&self) -> State {
        self.header.state
    }

    /// Returns `true` unless the completion was moved from or canceled.
    pub fn is_valid(&self) -> bool {
        self.header.state.is_valid()
    }

    /// Returns `true` once the operation succeeded or failed.
    pub fn is_ready(&self) -> bool {
        self.header.state.is_ready()
    }

    /// Returns `true` if the completion holds an error.
    pub fn has_error(&self) -> bool {
        self.header.state == State::FAILED
    }

    /// Returns `true` if the producer canceled the operation.
    pub fn is_canceled(&self) -> bool {
        self.header.state == State::CANCELED
    }

    /// Returns `true` if the content was moved out.
    pub fn is_moved(&self) -> bool {
        self.header.state == State::MOVED
    }

    /// Returns the stored error.
    ///
    /// # Panics
    ///
    /// Panics unless [`has_error`](Self::has_error) is `true`.
    pub fn error(&self) -> &Error {
        assert!(
            self.has_error(),
            "error() requires a failed completion, state is {:?}",
            self.header.state
        );

        &self.error
    }

    /// Returns `Ok(())` on success, the stored error on failure and
    /// [`Error::canceled`] after cancellation.
    ///
    /// # Panics
    ///
    /// Panics if the completion is still pending or was moved from.
    pub fn get(&self) -> Result<(), Error> {
        match self.header.state {
            State::COMPLETED => Ok(()),
            State::FAILED => Err(self.error.clone()),
            State::CANCELED => Err(Error::canceled()),
            state => panic!("get() on a completion without outcome, state is {state:?}"),
        }
    }

    /// Like [`get`](Self::get), but leaves the completion moved.
    pub fn take_result(&mut self) -> Result<(), Error> {
        let outcome = self.get();
        self.take();
        outcome
    }

    /// # Panics
    ///
    /// Panics unless [`has_error`](Self::has_error) is `true`.
    pub fn take_error(&mut self) -> Error {
        assert!(
            self.has_error(),
            "take_error() requires a failed completion, state is {:?}",
            self.header.state
        );

        self.take().error
    }

    /// Marks the operation as done. Always succeeds.
    ///
    /// # Panics
    ///
    /// Panics if the completion is not pending.
    pub fn initialize_result(&mut self) -> bool {
        self.header.assert_pending("initialize_result()");
        debug_assert!(self.error.is_empty());

        self.settle(State::COMPLETED);
        true
    }

    /// # Panics
    ///
    /// Panics if the completion is not pending or `error` is empty.
    pub fn initialize_error(&mut self, error: Error) {
        self.header.assert_pending("initialize_error()");
        assert!(!error.is_empty(), "a completion cannot fail with the empty error");
        debug_assert!(self.error.is_empty());

        self.error = error;
        self.settle(State::FAILED);
    }

    /// Cancels a pending completion. Returns `false` if it already finished
    /// or was moved from.
    pub fn cancel(&mut self) -> bool {
        if !self.header.state.is_pending() {
            return false;
        }

        tracing::debug!(state = ?self.header.state, "canceling completion");
        self.settle(State::CANCELED);
        true
    }

    /// Clears the error and the continuation and moves to `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` is [`State::COMPLETED`] or [`State::FAILED`].
    pub fn reset(&mut self, state: State) {
        self.error = Error::empty();
        self.header.reset(state);
    }

    /// Moves the content into a new completion, leaving this one moved.
    pub fn take(&mut self) -> Self {
        Self {
            header: self.header.take(),
            error: mem::take(&mut self.error),
        }
    }

    /// Moves `other` into this completion. `other` is left [`State::MOVED`].
    pub fn move_from(&mut self, other: &mut Self) {
        *self = other.take();
    }

    /// Exchanges error, continuation and state with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns `true` if a continuation is attached.
    pub fn has_continuation(&self) -> bool {
        self.header.has_continuation()
    }

    /// Attaches the continuation invoked on the terminal transition.
    ///
    /// # Panics
    ///
    /// Panics if the completion is not pending or already has a continuation.
    pub fn set_continuation(&mut self, continuation: Continuation) {
        self.header.set_continuation(continuation);
    }

    /// Detaches the continuation without invoking it.
    pub fn clear_continuation(&mut self) {
        self.header.clear_continuation();
    }

    fn settle(&mut self, state: State) {
        let continuation = self.header.settle(state);
        continuation.invoke(&*self);
    }
}

impl AwaitableBase for Completion {
    fn state(&self) -> State {
        self.header.state
    }

    fn error(&self) -> &Error {
        Completion::error(self)
    }

    fn has_continuation(&self) -> bool {
        self.header.has_continuation()
    }

    fn set_continuation(&mut self, continuation: Continuation) {
        self.header.set_continuation(continuation);
    }

    fn clear_continuation(&mut self) {
        self.header.clear_continuation();
    }
}

static_assertions::assert_impl_all!(Completion: Send, Sync);
