mod common;

use awaitcell::{Awaitable, AwaitableBase, Awaiter, BoxedAwaitable, Completion, Continuation, Error, ops};
use common::Recorder;

use std::sync::{Arc, Mutex};

#[test]
fn predicates_over_mixed_group() {
    let mut a = Awaitable::<u32>::new();
    let mut b = BoxedAwaitable::<String>::new();
    let c = Completion::new();

    assert!(!ops::any_ready(&[&a, &b, &c]));
    assert!(ops::all_valid(&[&a, &b, &c]));
    assert_eq!(ops::find_ready(&[&a, &b, &c]), None);

    b.initialize_result("done".to_owned());
    assert!(ops::any_ready(&[&a, &b, &c]));
    assert_eq!(ops::find_ready(&[&a, &b, &c]), Some(1));
    assert!(!ops::all_ready(&[&a, &b, &c]));

    a.initialize_error(Error::msg("bad"));
    assert_eq!(ops::find_failed(&[&a, &b, &c]), Some(0));
}

#[test]
fn empty_group_is_all_ready() {
    assert!(ops::all_ready(&[]));
    assert!(!ops::any_ready(&[]));
}

#[test]
fn canceled_member_is_not_valid() {
    let a = Awaitable::<u32>::new();
    let mut b = Completion::new();
    b.cancel();

    assert!(!ops::all_valid(&[&a, &b]));
}

#[test]
fn continuation_attached_to_pending_members_only() {
    let recorder = Recorder::new();
    let continuation = Continuation::awaiter(&recorder);

    let mut a = Awaitable::<u32>::new();
    let mut b = Awaitable::<u32>::new();
    b.initialize_result(1);
    let mut c = Completion::new();

    let attached = ops::set_continuation_all(&mut [&mut a, &mut b, &mut c], &continuation);

    assert_eq!(attached, 2);
    assert!(a.has_continuation());
    assert!(!b.has_continuation());
    assert!(c.has_continuation());

    a.initialize_result(2);
    c.initialize_result();
    assert_eq!(recorder.count(), 2);
}

#[test]
fn clear_continuation_all_detaches() {
    let recorder = Recorder::new();
    let continuation = Continuation::awaiter(&recorder);

    let mut a = Awaitable::<u32>::new();
    let mut c = Completion::new();
    ops::set_continuation_all(&mut [&mut a, &mut c], &continuation);

    ops::clear_continuation_all(&mut [&mut a, &mut c]);

    a.initialize_result(1);
    c.initialize_result();
    assert_eq!(recorder.count(), 0);
}

/// Records the address of every awaitable that resumed it.
#[derive(Default)]
struct WhichOne {
    resumers: Mutex<Vec<usize>>,
}

impl Awaiter for WhichOne {
    fn resume(&self, resumer: &dyn AwaitableBase) {
        let address = std::ptr::from_ref(resumer).cast::<()>() as usize;
        self.resumers.lock().unwrap().push(address);
    }
}

#[test]
fn position_of_identifies_resumer() {
    let a = Awaitable::<u32>::new();
    let b = Awaitable::<u32>::new();

    assert_eq!(ops::position_of(&[&a, &b], &b), Some(1));
    assert_eq!(ops::position_of(&[&a], &b), None);

    let which = Arc::new(WhichOne::default());
    let mut group = [Awaitable::<u32>::new(), Awaitable::<u32>::new()];
    for awt in group.iter_mut() {
        awt.set_continuation(Continuation::awaiter(&which));
    }

    group[1].initialize_result(7);

    let resumed = which.resumers.lock().unwrap().clone();
    let expected = &group[1] as *const Awaitable<u32> as usize;
    assert_eq!(resumed, vec![expected]);
}
