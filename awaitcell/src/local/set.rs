use super::Handle;
use crate::cell::{Inline, Layout};
use crate::error::Error;

use std::future::{Future, poll_fn};
use std::pin::Pin;
use std::task::Poll;

/// A collection of handles awaited as a group.
///
/// `HandleSet` is useful to wait for all of a batch of operations, or to act
/// on whichever finishes first.
pub struct HandleSet<R, L: Layout = Inline> {
    handles: Vec<Handle<R, L>>,
}

impl<R, L: Layout> HandleSet<R, L> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Adds a handle to the set.
    pub fn push(&mut self, handle: Handle<R, L>) {
        self.handles.push(handle);
    }

    /// Number of handles whose outcome has not been returned yet.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if no handle is left to await.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for the next handle to finish and returns its outcome.
    ///
    /// Outcomes are returned in completion order, not insertion order.
    /// Returns `None` once the set is empty.
    pub async fn join_next(&mut self) -> Option<Result<R, Error>> {
        if self.handles.is_empty() {
            return None;
        }

        poll_fn(|cx| {
            let mut i = 0;

            while i < self.handles.len() {
                match Pin::new(&mut self.handles[i]).poll(cx) {
                    Poll::Ready(outcome) => {
                        // Order is not preserved.
                        self.handles.swap_remove(i);
                        return Poll::Ready(Some(outcome));
                    }
                    Poll::Pending => {
                        i += 1;
                    }
                }
            }
            Poll::Pending
        })
        .await
    }

    /// Waits for every handle and returns the outcomes in completion order.
    pub async fn join_all(&mut self) -> Vec<Result<R, Error>> {
        let mut outcomes = Vec::with_capacity(self.handles.len());

        while let Some(outcome) = self.join_next().await {
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Waits for the first `n` handles to finish and drops the others.
    ///
    /// Outcomes are returned in completion order. Returns `None` without
    /// awaiting anything if the set holds fewer than `n` handles.
    ///
    /// Dropping a handle does not cancel its operation; the producers can
    /// notice through [`Producer::is_closed`](super::Producer::is_closed).
    pub async fn join_n(&mut self, n: usize) -> Option<Vec<Result<R, Error>>> {
        if n > self.handles.len() {
            return None;
        }

        let mut outcomes = Vec::with_capacity(n);
        while outcomes.len() < n {
            match self.join_next().await {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }

        self.handles.clear();
        Some(outcomes)
    }

    /// Waits for the first handle to finish and drops the others.
    ///
    /// Shorthand for `join_n(1)`. Returns `None` if the set is empty.
    pub async fn race(&mut self) -> Option<Result<R, Error>> {
        self.join_n(1).await.and_then(|mut outcomes| outcomes.pop())
    }
}

impl<R, L: Layout> Default for HandleSet<R, L> {
    /// Returns an empty [`HandleSet`].
    fn default() -> Self {
        Self::new()
    }
}

impl<R, L: Layout> FromIterator<Handle<R, L>> for HandleSet<R, L> {
    fn from_iter<I: IntoIterator<Item = Handle<R, L>>>(iter: I) -> Self {
        Self {
            handles: iter.into_iter().collect(),
        }
    }
}

impl<R, L: Layout> Extend<Handle<R, L>> for HandleSet<R, L> {
    fn extend<I: IntoIterator<Item = Handle<R, L>>>(&mut self, iter: I) {
        self.handles.extend(iter);
    }
}
