use std::fmt;

/// Lifecycle state of an awaitable.
///
/// States are ordered. Everything below [`State::COMPLETED`] is invalid for
/// normal use, [`State::COMPLETED`] and [`State::FAILED`] mean a result is
/// available, and [`State::PENDING`] and everything above it are pending-like
/// states that still accept a terminal write.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(usize);

static_assertions::assert_eq_size!(State, usize);

impl State {
    /// The content was moved into another awaitable.
    pub const MOVED: State = State(0);

    /// The producer canceled the operation.
    pub const CANCELED: State = State(1);

    /// Reserved invalid state available to wrappers.
    pub const INVALID2: State = State(2);

    /// Reserved invalid state available to wrappers.
    pub const INVALID3: State = State(3);

    /// A value is available.
    pub const COMPLETED: State = State(4);

    /// An error is available.
    pub const FAILED: State = State(5);

    /// No outcome yet. Default state of a new awaitable.
    pub const PENDING: State = State(6);

    /// Returns the `n`-th custom pending-like state.
    ///
    /// Custom states behave like [`State::PENDING`]: the awaitable is not
    /// ready and a terminal write is still allowed. Wrappers use them to
    /// track progress such as "running" or "detached".
    ///
    /// # Panics
    ///
    /// Panics if `n` does not fit above [`State::PENDING`] in a `usize`.
    pub const fn custom(n: usize) -> State {
        match (Self::PENDING.0 + 1).checked_add(n) {
            Some(raw) => State(raw),
            None => panic!("custom state index out of range"),
        }
    }

    /// Returns `true` unless the state is moved, canceled or reserved.
    pub const fn is_valid(self) -> bool {
        self.0 > Self::INVALID3.0
    }

    /// Returns `true` if a value or an error is available.
    pub const fn is_ready(self) -> bool {
        self.0 == Self::COMPLETED.0 || self.0 == Self::FAILED.0
    }

    /// Returns `true` if the awaitable still accepts a terminal write.
    pub const fn is_pending(self) -> bool {
        self.0 >= Self::PENDING.0
    }

    /// Returns `true` for completed, failed and canceled states.
    pub const fn is_terminal(self) -> bool {
        self.is_ready() || self.0 == Self::CANCELED.0
    }

    /// Returns the raw state word.
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl Default for State {
    /// Returns [`State::PENDING`].
    fn default() -> Self {
        Self::PENDING
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            State::MOVED => f.write_str("Moved"),
            State::CANCELED => f.write_str("Canceled"),
            State::INVALID2 => f.write_str("Invalid2"),
            State::INVALID3 => f.write_str("Invalid3"),
            State::COMPLETED => f.write_str("Completed"),
            State::FAILED => f.write_str("Failed"),
            State::PENDING => f.write_str("Pending"),
            State(n) => write!(f, "Custom({})", n - State::custom(0).0),
        }
    }
}
