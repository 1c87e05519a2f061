//! Operations over groups of awaitables.
//!
//! Schedulers waiting on several operations at once (all of them, or the
//! first one to finish) work against [`AwaitableBase`] trait objects so the
//! group may mix result types.

use crate::awaitable::AwaitableBase;
use crate::continuation::Continuation;

/// Returns `true` if every awaitable is ready. Vacuously true when empty.
pub fn all_ready(awaitables: &[&dyn AwaitableBase]) -> bool {
    awaitables.iter().all(|awt| awt.is_ready())
}

/// Returns `true` if at least one awaitable is ready.
pub fn any_ready(awaitables: &[&dyn AwaitableBase]) -> bool {
    awaitables.iter().any(|awt| awt.is_ready())
}

/// Returns `true` if no awaitable was moved from or canceled.
pub fn all_valid(awaitables: &[&dyn AwaitableBase]) -> bool {
    awaitables.iter().all(|awt| awt.is_valid())
}

/// Index of the first ready awaitable.
pub fn find_ready(awaitables: &[&dyn AwaitableBase]) -> Option<usize> {
    awaitables.iter().position(|awt| awt.is_ready())
}

/// Index of the first awaitable that failed with an error.
pub fn find_failed(awaitables: &[&dyn AwaitableBase]) -> Option<usize> {
    awaitables.iter().position(|awt| awt.has_error())
}

/// Index of the awaitable located at `resumer`, typically the argument of
/// [`Awaiter::resume`](crate::Awaiter::resume).
pub fn position_of(awaitables: &[&dyn AwaitableBase], resumer: &dyn AwaitableBase) -> Option<usize> {
    awaitables
        .iter()
        .position(|awt| std::ptr::addr_eq(*awt, resumer))
}

/// Attaches a clone of `continuation` to every pending awaitable.
///
/// Ready and invalid awaitables are skipped. Returns the number of
/// awaitables the continuation was attached to.
pub fn set_continuation_all(awaitables: &mut [&mut dyn AwaitableBase], continuation: &Continuation) -> usize {
    let mut attached = 0;

    for awt in awaitables.iter_mut() {
        if awt.state().is_pending() {
            awt.set_continuation(continuation.clone());
            attached += 1;
        }
    }

    tracing::trace!(attached, total = awaitables.len(), "continuation attached");
    attached
}

/// Detaches the continuation of every pending awaitable.
pub fn clear_continuation_all(awaitables: &mut [&mut dyn AwaitableBase]) {
    for awt in awaitables.iter_mut() {
        if awt.state().is_pending() {
            awt.clear_continuation();
        }
    }
}
