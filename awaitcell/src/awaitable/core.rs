use super::base::{AwaitableBase, Header};
use super::state::State;
use crate::cell::{Boxed, Inline, Layout, ResultCell};
use crate::continuation::Continuation;
use crate::error::Error;

use std::fmt;
use std::mem;

/// The eventual outcome of one asynchronous operation.
///
/// An `Awaitable` starts out pending. Its producer makes exactly one
/// terminal write: a value ([`initialize_result`](Self::initialize_result)),
/// an error ([`initialize_error`](Self::initialize_error)) or a cancellation
/// ([`cancel`](Self::cancel)). Its consumer either polls
/// [`is_ready`](Self::is_ready) and reads the outcome, or attaches a
/// [`Continuation`] which is invoked exactly once when the awaitable becomes
/// terminal.
///
/// There is no internal synchronization. The producer and the consumer must
/// be coordinated externally, typically by running on the same scheduler
/// thread.
///
/// `L` selects how the value is stored. With the default [`Inline`] layout
/// `R` must fit in two machine words; use [`Boxed`] for larger types.
///
/// # Examples
///
/// ```
/// use awaitcell::Awaitable;
///
/// let mut answer = Awaitable::<u32>::new();
/// assert!(!answer.is_ready());
///
/// answer.initialize_result(42);
/// assert_eq!(answer.get().ok(), Some(&42));
/// ```
pub struct Awaitable<R, L: Layout = Inline> {
    header: Header,
    cell: ResultCell<R, L>,
}

/// An awaitable that stores its value on the heap.
pub type BoxedAwaitable<R> = Awaitable<R, Boxed>;

impl<R, L: Layout> Awaitable<R, L> {
    /// Creates a pending awaitable with no outcome and no continuation.
    pub fn new() -> Self {
        Self {
            header: Header::default(),
            cell: ResultCell::new(),
        }
    }

    /// Returns the current state word.
    pub fn state(&self) -> State {
        self.header.state
    }

    /// Returns `true` unless the awaitable was moved from or canceled.
    pub fn is_valid(&self) -> bool {
        self.header.state.is_valid()
    }

    /// Returns `true` once a value or an error is available.
    ///
    /// Pending, canceled and moved awaitables are not ready.
    pub fn is_ready(&self) -> bool {
        self.header.state.is_ready()
    }

    /// Returns `true` if the awaitable holds an error.
    pub fn has_error(&self) -> bool {
        self.header.state == State::FAILED
    }

    /// Returns `true` if the producer canceled the operation.
    pub fn is_canceled(&self) -> bool {
        self.header.state == State::CANCELED
    }

    /// Returns `true` if the content was moved out by [`take`](Self::take),
    /// [`move_from`](Self::move_from) or one of the `take_*` accessors.
    pub fn is_moved(&self) -> bool {
        self.header.state == State::MOVED
    }

    /// Returns the stored error.
    ///
    /// # Panics
    ///
    /// Panics unless [`has_error`](Self::has_error) is `true`.
    pub fn error(&self) -> &Error {
        match (self.header.state, self.cell.error()) {
            (State::FAILED, Some(error)) => error,
            (state, _) => panic!("error() requires a failed awaitable, state is {state:?}"),
        }
    }

    /// Returns the stored value.
    ///
    /// # Panics
    ///
    /// Panics unless the awaitable completed with a value. Callers that have
    /// not checked [`has_error`](Self::has_error) should use
    /// [`get`](Self::get) instead.
    pub fn result(&self) -> &R {
        match (self.header.state, self.cell.value()) {
            (State::COMPLETED, Some(value)) => value,
            (state, _) => panic!("result() requires a completed awaitable, state is {state:?}"),
        }
    }

    /// Mutable variant of [`result`](Self::result).
    pub fn result_mut(&mut self) -> &mut R {
        match (self.header.state, self.cell.value_mut()) {
            (State::COMPLETED, Some(value)) => value,
            (state, _) => panic!("result_mut() requires a completed awaitable, state is {state:?}"),
        }
    }

    /// Returns the outcome as a `Result`.
    ///
    /// A stored error is returned as `Err`, and so is a cancellation (as
    /// [`Error::canceled`]).
    ///
    /// # Panics
    ///
    /// Panics if the awaitable is still pending or was moved from.
    pub fn get(&self) -> Result<&R, Error> {
        match self.header.state {
            State::COMPLETED => Ok(self.result()),
            State::FAILED => Err(self.error().clone()),
            State::CANCELED => Err(Error::canceled()),
            state => panic!("get() on an awaitable without outcome, state is {state:?}"),
        }
    }

    /// Moves the outcome out, leaving the awaitable moved.
    ///
    /// # Panics
    ///
    /// Panics if the awaitable is still pending or was moved from.
    pub fn take_result(&mut self) -> Result<R, Error> {
        match self.header.state {
            State::COMPLETED | State::FAILED => {
                self.header.take();
                self.cell.take().into_result()
            }
            State::CANCELED => {
                self.header.take();
                Err(Error::canceled())
            }
            state => panic!("take_result() on an awaitable without outcome, state is {state:?}"),
        }
    }

    /// Moves the error out, leaving the awaitable moved.
    ///
    /// # Panics
    ///
    /// Panics unless [`has_error`](Self::has_error) is `true`.
    pub fn take_error(&mut self) -> Error {
        assert!(
            self.has_error(),
            "take_error() requires a failed awaitable, state is {:?}",
            self.header.state
        );

        self.header.take();
        self.cell.take_error().unwrap_or_default()
    }

    /// Completes the awaitable with `value`. Always succeeds.
    ///
    /// # Panics
    ///
    /// Panics if the awaitable is not pending.
    pub fn initialize_result(&mut self, value: R) -> bool {
        self.header.assert_pending("initialize_result()");
        debug_assert!(self.cell.is_blank());

        self.cell.put_value(value);
        self.settle(State::COMPLETED);
        true
    }

    /// Completes the awaitable with the value built by `f`.
    ///
    /// If `f` panics, the panic is captured as the awaitable's error and
    /// `false` is returned. The continuation is invoked in both cases.
    ///
    /// # Panics
    ///
    /// Panics if the awaitable is not pending.
    pub fn initialize_result_with<F>(&mut self, f: F) -> bool
    where
        F: FnOnce() -> R,
    {
        self.header.assert_pending("initialize_result_with()");
        debug_assert!(self.cell.is_blank());

        let ok = self.cell.emplace_value(f);
        self.settle_construction(ok);
        ok
    }

    /// Completes the awaitable with the value built by a fallible `f`.
    ///
    /// An `Err` from `f` becomes the awaitable's error and `false` is
    /// returned.
    ///
    /// # Panics
    ///
    /// Panics if the awaitable is not pending.
    pub fn try_initialize_result<F, E>(&mut self, f: F) -> bool
    where
        F: FnOnce() -> Result<R, E>,
        E: Into<Error>,
    {
        self.header.assert_pending("try_initialize_result()");
        debug_assert!(self.cell.is_blank());

        let ok = self.cell.try_emplace_value(f);
        self.settle_construction(ok);
        ok
    }

    /// Completes the awaitable with `error`.
    ///
    /// # Panics
    ///
    /// Panics if the awaitable is not pending or `error` is empty.
    pub fn initialize_error(&mut self, error: Error) {
        self.header.assert_pending("initialize_error()");
        assert!(!error.is_empty(), "an awaitable cannot fail with the empty error");
        debug_assert!(self.cell.is_blank());

        self.cell.put_error(error);
        self.settle(State::FAILED);
    }

    /// Cancels a pending awaitable.
    ///
    /// No payload is written; the continuation is invoked. Returns `false`
    /// and does nothing if the awaitable already finished or was moved from.
    pub fn cancel(&mut self) -> bool {
        if !self.header.state.is_pending() {
            return false;
        }

        tracing::debug!(state = ?self.header.state, "canceling awaitable");
        self.cell.clear();
        self.settle(State::CANCELED);
        true
    }

    /// Clears the payload and the continuation and moves to `state`.
    ///
    /// Used to recycle an awaitable, either back to [`State::PENDING`] or to a
    /// custom state. The continuation is dropped without being invoked.
    ///
    /// # Panics
    ///
    /// Panics if `state` is [`State::COMPLETED`] or [`State::FAILED`].
    pub fn reset(&mut self, state: State) {
        self.cell.clear();
        self.header.reset(state);
    }

    /// Moves the content into a new awaitable.
    ///
    /// The returned awaitable has this one's payload, continuation and
    /// state. This one is left [`State::MOVED`] with an empty payload and no
    /// continuation.
    pub fn take(&mut self) -> Self {
        Self {
            header: self.header.take(),
            cell: self.cell.take(),
        }
    }

    /// Replaces this awaitable's content with `other`'s, dropping the
    /// current payload. `other` is left [`State::MOVED`].
    pub fn move_from(&mut self, other: &mut Self) {
        *self = other.take();
    }

    /// Exchanges payload, continuation and state with `other`.
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
    /// Panics if the awaitable is not pending or already has a continuation.
    pub fn set_continuation(&mut self, continuation: Continuation) {
        self.header.set_continuation(continuation);
    }

    /// Detaches the continuation without invoking it.
    pub fn clear_continuation(&mut self) {
        self.header.clear_continuation();
    }

    fn settle_construction(&mut self, ok: bool) {
        if ok {
            self.settle(State::COMPLETED);
        } else {
            tracing::warn!(
                error = %self.cell.error().cloned().unwrap_or_default(),
                "result construction failed, storing error"
            );
            self.settle(State::FAILED);
        }
    }

    fn settle(&mut self, state: State) {
        let continuation = self.header.settle(state);
        continuation.invoke(&*self);
    }
}

impl<R, L: Layout> AwaitableBase for Awaitable<R, L> {
    fn state(&self) -> State {
        self.header.state
    }

    fn error(&self) -> &Error {
        Awaitable::error(self)
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

impl<R, L: Layout> Default for Awaitable<R, L> {
    /// Returns a pending awaitable, see [`Awaitable::new`].
    fn default() -> Self {
        Self::new()
    }
}

impl<R: fmt::Debug, L: Layout> fmt::Debug for Awaitable<R, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Awaitable")
            .field("state", &self.header.state)
            .field("cell", &self.cell)
            .field("continuation", &self.header.has_continuation())
            .finish()
    }
}

static_assertions::assert_impl_all!(Awaitable<u64>: Send, Sync);
static_assertions::assert_impl_all!(Awaitable<String, Boxed>: Send, Sync);
