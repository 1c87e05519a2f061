#![allow(dead_code)]

use awaitcell::{AwaitableBase, Awaiter, State};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::task::{Wake, Waker};

/// Installs a fmt subscriber filtered by `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Awaiter recording how often and by whom it was resumed.
#[derive(Default)]
pub struct Recorder {
    resumed: AtomicUsize,
    states: Mutex<Vec<State>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.resumed.load(Ordering::SeqCst)
    }

    pub fn states(&self) -> Vec<State> {
        self.states.lock().unwrap().clone()
    }
}

impl Awaiter for Recorder {
    fn resume(&self, resumer: &dyn AwaitableBase) {
        self.resumed.fetch_add(1, Ordering::SeqCst);
        self.states.lock().unwrap().push(resumer.state());
    }
}

/// Waker counting its wake-ups.
#[derive(Default)]
pub struct CountingWaker {
    woken: AtomicUsize,
}

impl CountingWaker {
    pub fn new() -> (Arc<Self>, Waker) {
        let counter = Arc::new(Self::default());
        let waker = Waker::from(counter.clone());
        (counter, waker)
    }

    pub fn count(&self) -> usize {
        self.woken.load(Ordering::SeqCst)
    }
}

impl Wake for CountingWaker {
    fn wake(self: Arc<Self>) {
        self.woken.fetch_add(1, Ordering::SeqCst);
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.woken.fetch_add(1, Ordering::SeqCst);
    }
}
