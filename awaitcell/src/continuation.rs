//! Links from an awaitable to whoever waits for it.
//!
//! A [`Continuation`] is attached to a pending awaitable by the scheduler and
//! invoked exactly once, right after the awaitable reaches a terminal state.
//! The link never keeps the waiter alive: wakers are the scheduler's own
//! handles and awaiters are held through a [`Weak`] reference.

use crate::awaitable::AwaitableBase;

use std::fmt;
use std::sync::{Arc, Weak};
use std::task::Waker;

/// A waiter that is resumed when an awaitable finishes.
pub trait Awaiter: Send + Sync {
    /// Called once the awaitable `resumer` has completed, failed or been
    /// canceled.
    ///
    /// The awaitable is borrowed for the duration of the call only; the
    /// awaiter must not assume it outlives the notification.
    fn resume(&self, resumer: &dyn AwaitableBase);
}

#[derive(Clone, Default)]
enum Link {
    #[default]
    None,
    Waker(Waker),
    Awaiter(Weak<dyn Awaiter>),
}

/// One-shot, non-owning link to a waiter.
#[derive(Clone, Default)]
pub struct Continuation {
    link: Link,
}

impl Continuation {
    /// An unset continuation.
    pub const fn none() -> Self {
        Self { link: Link::None }
    }

    /// Wakes `waker` on completion.
    pub fn waker(waker: Waker) -> Self {
        Self {
            link: Link::Waker(waker),
        }
    }

    /// Resumes `awaiter` on completion, unless it was dropped by then.
    pub fn awaiter<A>(awaiter: &Arc<A>) -> Self
    where
        A: Awaiter + 'static,
    {
        let awaiter: Arc<dyn Awaiter> = awaiter.clone();

        Self {
            link: Link::Awaiter(Arc::downgrade(&awaiter)),
        }
    }

    /// Returns `true` if a waiter is linked.
    pub fn is_set(&self) -> bool {
        !matches!(self.link, Link::None)
    }

    /// Consumes the link and notifies the waiter.
    pub(crate) fn invoke(self, resumer: &dyn AwaitableBase) {
        match self.link {
            Link::None => {}
            Link::Waker(waker) => waker.wake(),
            Link::Awaiter(awaiter) => match awaiter.upgrade() {
                Some(awaiter) => awaiter.resume(resumer),
                None => tracing::trace!("awaiter dropped before completion"),
            },
        }
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.link {
            Link::None => f.write_str("Continuation::None"),
            Link::Waker(_) => f.write_str("Continuation::Waker"),
            Link::Awaiter(_) => f.write_str("Continuation::Awaiter"),
        }
    }
}
