mod common;

use awaitcell::{Awaitable, AwaitableBase, Awaiter, Completion, Continuation, Error, State};
use common::{CountingWaker, Recorder, init_tracing};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn continuation_runs_once_on_completion() {
    init_tracing();
    let recorder = Recorder::new();
    let mut awt = Awaitable::<i32>::new();

    awt.set_continuation(Continuation::awaiter(&recorder));
    assert_eq!(recorder.count(), 0);

    awt.initialize_result(1);

    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.states(), vec![State::COMPLETED]);
    assert!(!awt.has_continuation());

    // Reading the outcome never fires the continuation again.
    let _ = awt.get();
    drop(awt);
    assert_eq!(recorder.count(), 1);
}

#[test]
fn continuation_runs_on_failure_and_cancel() {
    let recorder = Recorder::new();

    let mut failed = Awaitable::<i32>::new();
    failed.set_continuation(Continuation::awaiter(&recorder));
    failed.initialize_error(Error::msg("e"));

    let mut canceled = Completion::new();
    canceled.set_continuation(Continuation::awaiter(&recorder));
    canceled.cancel();
    canceled.cancel();

    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.states(), vec![State::FAILED, State::CANCELED]);
}

#[test]
fn continuation_runs_when_construction_fails() {
    let recorder = Recorder::new();
    let mut awt = Awaitable::<u8>::new();
    awt.set_continuation(Continuation::awaiter(&recorder));

    awt.initialize_result_with(|| panic!("no"));

    assert_eq!(recorder.states(), vec![State::FAILED]);
}

#[test]
fn continuation_not_invoked_on_reset_or_drop() {
    let recorder = Recorder::new();

    let mut reset = Awaitable::<i32>::new();
    reset.set_continuation(Continuation::awaiter(&recorder));
    reset.reset(State::PENDING);
    reset.initialize_result(1);

    let mut dropped = Completion::new();
    dropped.set_continuation(Continuation::awaiter(&recorder));
    drop(dropped);

    assert_eq!(recorder.count(), 0);
}

#[test]
fn waker_continuation_is_woken() {
    let (counter, waker) = CountingWaker::new();
    let mut awt = Awaitable::<i32>::new();

    awt.set_continuation(Continuation::waker(waker));
    awt.initialize_result(5);

    assert_eq!(counter.count(), 1);
}

#[test]
fn dropped_awaiter_is_skipped() {
    let recorder = Recorder::new();
    let mut awt = Awaitable::<i32>::new();
    awt.set_continuation(Continuation::awaiter(&recorder));

    drop(recorder);

    assert!(awt.initialize_result(3));
    assert_eq!(*awt.result(), 3);
}

#[test]
fn continuation_does_not_own_awaiter() {
    let recorder = Recorder::new();
    let mut awt = Awaitable::<i32>::new();

    awt.set_continuation(Continuation::awaiter(&recorder));

    assert_eq!(Arc::strong_count(&recorder), 1);
}

#[test]
#[should_panic(expected = "continuation should be cleared before being replaced")]
fn setting_continuation_twice_panics() {
    let recorder = Recorder::new();
    let mut awt = Awaitable::<i32>::new();

    awt.set_continuation(Continuation::awaiter(&recorder));
    awt.set_continuation(Continuation::awaiter(&recorder));
}

#[test]
#[should_panic(expected = "continuation may be set only while the awaitable is pending")]
fn setting_continuation_on_ready_panics() {
    let recorder = Recorder::new();
    let mut awt = Awaitable::<i32>::new();
    awt.initialize_result(0);

    awt.set_continuation(Continuation::awaiter(&recorder));
}

#[test]
fn cleared_continuation_can_be_replaced() {
    let first = Recorder::new();
    let second = Recorder::new();
    let mut awt = Awaitable::<i32>::new();

    awt.set_continuation(Continuation::awaiter(&first));
    awt.clear_continuation();
    awt.set_continuation(Continuation::awaiter(&second));
    awt.initialize_result(1);

    assert_eq!(first.count(), 0);
    assert_eq!(second.count(), 1);
}

/// Awaiter that reads the outcome from inside the notification.
struct Reader {
    saw_value: AtomicBool,
}

impl Awaiter for Reader {
    fn resume(&self, resumer: &dyn AwaitableBase) {
        assert!(resumer.is_ready());
        assert!(!resumer.has_error());
        self.saw_value.store(true, Ordering::SeqCst);
    }
}

#[test]
fn resumer_is_already_terminal() {
    let reader = Arc::new(Reader {
        saw_value: AtomicBool::new(false),
    });
    let mut awt = Awaitable::<i32>::new();
    awt.set_continuation(Continuation::awaiter(&reader));

    awt.initialize_result(2);

    assert!(reader.saw_value.load(Ordering::SeqCst));
}
