use super::layout::{Inline, Layout, Slot};
use crate::error::Error;

use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};

enum Payload<S> {
    Error(Error),
    Value(S),
}

/// Holds exactly one of an [`Error`] or a value of type `R`.
///
/// A new cell holds the empty error. The cell itself does not know whether
/// its owner considers it pending or completed; it only guarantees that the
/// two branches are never populated at the same time and that every
/// transition leaves one well-defined branch active.
pub struct ResultCell<R, L: Layout = Inline> {
    payload: Payload<L::Slot<R>>,
}

impl<R, L: Layout> ResultCell<R, L> {
    /// Creates a cell holding the empty error.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = <L::Slot<R> as Slot<R>>::CHECK;

        Self {
            payload: Payload::Error(Error::empty()),
        }
    }

    /// Returns `true` if the value branch is active.
    pub fn is_value(&self) -> bool {
        matches!(self.payload, Payload::Value(_))
    }

    /// Returns `true` if the error branch is active and holds an error.
    pub fn has_error(&self) -> bool {
        matches!(&self.payload, Payload::Error(e) if !e.is_empty())
    }

    /// Returns `true` if the cell holds neither a value nor an error.
    pub fn is_blank(&self) -> bool {
        matches!(&self.payload, Payload::Error(e) if e.is_empty())
    }

    /// Returns `true` if the value is stored inside the cell.
    pub const fn is_inline() -> bool {
        <L::Slot<R> as Slot<R>>::INLINE
    }

    /// Stores `value`, dropping whatever was held before.
    pub fn put_value(&mut self, value: R) {
        self.payload = Payload::Value(<L::Slot<R> as Slot<R>>::new(value));
    }

    /// Stores `error`, dropping whatever was held before.
    pub fn put_error(&mut self, error: Error) {
        self.payload = Payload::Error(error);
    }

    /// Constructs the value in place from `f`.
    ///
    /// If `f` panics the panic is caught and stored as an error, and `false`
    /// is returned. The cell never ends up holding a partially built value.
    pub fn emplace_value<F>(&mut self, f: F) -> bool
    where
        F: FnOnce() -> R,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => {
                self.put_value(value);
                true
            }
            Err(payload) => {
                self.put_error(Error::from_panic(payload));
                false
            }
        }
    }

    /// Constructs the value from a fallible closure.
    ///
    /// An `Err` returned by `f` is stored as the error and `false` is
    /// returned.
    pub fn try_emplace_value<F, E>(&mut self, f: F) -> bool
    where
        F: FnOnce() -> Result<R, E>,
        E: Into<Error>,
    {
        match f() {
            Ok(value) => {
                self.put_value(value);
                true
            }
            Err(error) => {
                self.put_error(error.into());
                false
            }
        }
    }

    /// Takes over the branch held by `other`, dropping ours first.
    pub fn assign(&mut self, other: Self) {
        self.payload = other.payload;
    }

    /// Exchanges the contents of two cells.
    ///
    /// Only the slots are moved; values never run user code while being
    /// swapped.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.payload, &mut other.payload);
    }

    /// Drops the active branch and leaves the empty error behind.
    pub fn clear(&mut self) {
        self.payload = Payload::Error(Error::empty());
    }

    /// Moves the contents out, leaving the empty error behind.
    pub fn take(&mut self) -> Self {
        Self {
            payload: mem::replace(&mut self.payload, Payload::Error(Error::empty())),
        }
    }

    /// Returns the value, if the value branch is active.
    pub fn value(&self) -> Option<&R> {
        match &self.payload {
            Payload::Value(slot) => Some(slot.get()),
            Payload::Error(_) => None,
        }
    }

    /// Returns the value mutably, if the value branch is active.
    pub fn value_mut(&mut self) -> Option<&mut R> {
        match &mut self.payload {
            Payload::Value(slot) => Some(slot.get_mut()),
            Payload::Error(_) => None,
        }
    }

    /// Returns the error branch. The error is empty while no error is stored.
    pub fn error(&self) -> Option<&Error> {
        match &self.payload {
            Payload::Error(error) => Some(error),
            Payload::Value(_) => None,
        }
    }

    /// Moves the value out. The cell is left blank.
    pub fn take_value(&mut self) -> Option<R> {
        match self.take().payload {
            Payload::Value(slot) => Some(slot.into_inner()),
            Payload::Error(error) => {
                self.payload = Payload::Error(error);
                None
            }
        }
    }

    /// Moves the error out. The cell is left blank.
    pub fn take_error(&mut self) -> Option<Error> {
        match self.take().payload {
            Payload::Error(error) => Some(error),
            payload @ Payload::Value(_) => {
                self.payload = payload;
                None
            }
        }
    }

    /// Converts the cell into a `Result`. A blank cell yields `Err` with the
    /// empty error.
    pub fn into_result(self) -> Result<R, Error> {
        match self.payload {
            Payload::Value(slot) => Ok(slot.into_inner()),
            Payload::Error(error) => Err(error),
        }
    }
}

impl<R, L: Layout> Default for ResultCell<R, L> {
    /// Returns a cell holding the empty error.
    fn default() -> Self {
        Self::new()
    }
}

impl<R: fmt::Debug, L: Layout> fmt::Debug for ResultCell<R, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Value(slot) => f.debug_tuple("Value").field(slot.get()).finish(),
            Payload::Error(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}
