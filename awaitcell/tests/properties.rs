mod common;

use awaitcell::{Awaitable, Continuation, Error, State};
use common::Recorder;

use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Complete(i64),
    Fail,
    ConstructPanics,
    Cancel,
    Attach,
    Reset,
    MoveOut,
    SwapWithCompleted(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i64>().prop_map(Op::Complete),
        Just(Op::Fail),
        Just(Op::ConstructPanics),
        Just(Op::Cancel),
        Just(Op::Attach),
        Just(Op::Reset),
        Just(Op::MoveOut),
        any::<i64>().prop_map(Op::SwapWithCompleted),
    ]
}

proptest! {
    /// Applies only the operations that are legal in the current state and
    /// checks the invariants after every step.
    #[test]
    fn state_machine_invariants(ops in prop::collection::vec(op(), 0..32)) {
        let recorder = Recorder::new();
        let mut awt = Awaitable::<i64>::new();
        let mut attached = 0usize;
        let mut expected_resumes = 0usize;

        for op in ops {
            let pending = awt.state().is_pending();
            let had_continuation = awt.has_continuation();

            match op {
                Op::Complete(v) if pending => {
                    prop_assert!(awt.initialize_result(v));
                    prop_assert_eq!(*awt.result(), v);
                }
                Op::Fail if pending => awt.initialize_error(Error::msg("failed")),
                Op::ConstructPanics if pending => {
                    prop_assert!(!awt.initialize_result_with(|| panic!("construct")));
                }
                Op::Cancel => {
                    prop_assert_eq!(awt.cancel(), pending);
                }
                Op::Attach if pending && !had_continuation => {
                    awt.set_continuation(Continuation::awaiter(&recorder));
                    attached += 1;
                }
                Op::Reset => awt.reset(State::PENDING),
                Op::MoveOut => {
                    let state = awt.state();
                    let moved = awt.take();
                    prop_assert_eq!(moved.state(), state);
                    prop_assert_eq!(moved.has_continuation(), had_continuation);
                    prop_assert!(awt.is_moved());
                    prop_assert!(!awt.has_error());
                    prop_assert!(!awt.has_continuation());
                    awt = moved;
                }
                Op::SwapWithCompleted(v) => {
                    let mut other = Awaitable::<i64>::new();
                    other.initialize_result(v);
                    let state = awt.state();
                    awt.swap(&mut other);
                    prop_assert_eq!(*awt.result(), v);
                    prop_assert_eq!(other.state(), state);
                    prop_assert_eq!(other.has_continuation(), had_continuation);
                    awt = other;
                }
                _ => {}
            }

            if had_continuation && !awt.state().is_pending() && !awt.has_continuation() {
                if awt.state().is_terminal() {
                    expected_resumes += 1;
                }
            }

            if awt.is_ready() {
                prop_assert!(awt.has_error() != awt.get().is_ok());
            }
            if awt.state().is_pending() {
                prop_assert!(!awt.has_error());
            }
        }

        prop_assert!(recorder.count() <= attached);
        prop_assert_eq!(recorder.count(), expected_resumes);
    }
}
