use crate::awaitable::Awaitable;
use crate::cell::{Inline, Layout};
use crate::continuation::Continuation;
use crate::error::Error;

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

type Shared<R, L> = Rc<RefCell<Awaitable<R, L>>>;

/// Creates a producer/handle pair sharing one pending awaitable.
///
/// # Examples
///
/// ```
/// use awaitcell::local;
///
/// let (producer, mut handle) = local::channel::<u32>();
/// producer.complete(7);
///
/// assert_eq!(handle.try_take().map(|r| r.ok()), Some(Some(7)));
/// ```
pub fn channel<R>() -> (Producer<R>, Handle<R>) {
    channel_in::<R, Inline>()
}

/// Like [`channel`], with an explicit value [`Layout`].
pub fn channel_in<R, L: Layout>() -> (Producer<R, L>, Handle<R, L>) {
    let shared = Rc::new(RefCell::new(Awaitable::new()));

    let producer = Producer {
        shared: shared.clone(),
    };
    let handle = Handle { shared };

    (producer, handle)
}

/// The completing side of a [`channel`].
///
/// Every completing method consumes the producer, so at most one terminal
/// write can happen. Dropping a producer that never completed cancels the
/// operation, which wakes the handle.
pub struct Producer<R, L: Layout = Inline> {
    shared: Shared<R, L>,
}

impl<R, L: Layout> Producer<R, L> {
    /// Completes the operation with `value`.
    pub fn complete(self, value: R) -> bool {
        self.shared.borrow_mut().initialize_result(value)
    }

    /// Completes the operation with the value built by `f`.
    ///
    /// Returns `false` if `f` panicked; the handle then observes the panic
    /// as an error.
    pub fn complete_with<F>(self, f: F) -> bool
    where
        F: FnOnce() -> R,
    {
        self.shared.borrow_mut().initialize_result_with(f)
    }

    /// Fails the operation with `error`.
    pub fn fail(self, error: impl Into<Error>) {
        self.shared.borrow_mut().initialize_error(error.into());
    }

    /// Cancels the operation.
    pub fn cancel(self) {
        self.shared.borrow_mut().cancel();
    }

    /// Returns `true` if the [`Handle`] was dropped and nobody will observe
    /// the outcome.
    pub fn is_closed(&self) -> bool {
        Rc::strong_count(&self.shared) == 1
    }
}

impl<R, L: Layout> Drop for Producer<R, L> {
    fn drop(&mut self) {
        let Ok(mut awt) = self.shared.try_borrow_mut() else {
            return;
        };

        if awt.state().is_pending() {
            tracing::debug!("producer dropped without completing");
            awt.cancel();
        }
    }
}

impl<R, L: Layout> fmt::Debug for Producer<R, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// The observing side of a [`channel`].
///
/// `Handle` implements [`Future`] and resolves once the producer completes,
/// fails or cancels. A cancellation resolves to [`Error::canceled`].
pub struct Handle<R, L: Layout = Inline> {
    shared: Shared<R, L>,
}

impl<R, L: Layout> Handle<R, L> {
    /// Returns `true` once a value or an error is available.
    pub fn is_ready(&self) -> bool {
        self.shared.borrow().is_ready()
    }

    /// Returns `true` if the producer canceled or was dropped.
    pub fn is_canceled(&self) -> bool {
        self.shared.borrow().is_canceled()
    }

    /// Returns `true` once the outcome, including a cancellation, is known.
    pub fn is_finished(&self) -> bool {
        self.shared.borrow().state().is_terminal()
    }

    /// Takes the outcome if it is known, without registering for wake-up.
    ///
    /// # Panics
    ///
    /// Panics if the outcome was already taken.
    pub fn try_take(&mut self) -> Option<Result<R, Error>> {
        let mut awt = self.shared.borrow_mut();

        assert!(!awt.is_moved(), "outcome already taken");

        if awt.state().is_terminal() {
            Some(awt.take_result())
        } else {
            None
        }
    }
}

impl<R, L: Layout> Future for Handle<R, L> {
    type Output = Result<R, Error>;

    /// Polls the handle.
    ///
    /// If the outcome is known it is moved out and returned. Otherwise the
    /// task's waker replaces any previously registered one and the future
    /// returns `Poll::Pending`.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut awt = self.shared.borrow_mut();

        assert!(!awt.is_moved(), "handle polled after its outcome was taken");

        if awt.state().is_terminal() {
            return Poll::Ready(awt.take_result());
        }

        awt.clear_continuation();
        awt.set_continuation(Continuation::waker(cx.waker().clone()));

        Poll::Pending
    }
}

impl<R, L: Layout> fmt::Debug for Handle<R, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("state", &self.shared.borrow().state())
            .finish()
    }
}
