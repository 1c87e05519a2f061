//! Error values stored inside result cells.
//!
//! An [`Error`] is an opaque, cheaply cloneable handle to any
//! [`std::error::Error`]. It has a distinguished *empty* value which is what
//! a pending cell holds in its error branch. Two errors compare equal when
//! they are both empty or share the same underlying error object.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Errors produced by the crate itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AwaitError {
    /// The producer canceled the operation before completing it.
    #[error("operation was canceled")]
    Canceled,

    /// Constructing the result value panicked.
    #[error("result construction panicked: {0}")]
    Panicked(String),

    /// A free-form error message.
    #[error("{0}")]
    Message(String),
}

/// The error half of a result cell.
///
/// `Error` is either empty or holds a shared error object. It is the
/// equivalent of a nullable exception pointer: moving or cloning it never
/// fails and never allocates.
#[derive(Clone, Default)]
pub struct Error {
    inner: Option<Arc<dyn StdError + Send + Sync + 'static>>,
}

static_assertions::assert_eq_size!(Error, [usize; 2]);
static_assertions::assert_impl_all!(Error: Send, Sync, Clone);

impl Error {
    /// Returns the empty error.
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    /// Wraps an error object.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Some(Arc::new(error)),
        }
    }

    /// Creates an error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(AwaitError::Message(message.into()))
    }

    /// The error reported for a canceled operation.
    pub fn canceled() -> Self {
        Self::new(AwaitError::Canceled)
    }

    /// Converts a panic payload caught by [`std::panic::catch_unwind`].
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_owned()
        };

        Self::new(AwaitError::Panicked(message))
    }

    /// Returns `true` if no error is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns `true` if this error reports a cancellation.
    pub fn is_canceled(&self) -> bool {
        matches!(self.downcast_ref::<AwaitError>(), Some(AwaitError::Canceled))
    }

    /// Returns `true` if this error was produced by a panicking constructor.
    pub fn is_panic(&self) -> bool {
        matches!(self.downcast_ref::<AwaitError>(), Some(AwaitError::Panicked(_)))
    }

    /// Attempts to view the stored error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.as_deref()?.downcast_ref::<E>()
    }

    /// Borrows the stored error object, if any.
    pub fn as_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.as_deref()
    }
}

impl<E> From<E> for Error
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            None => f.write_str("Error(<empty>)"),
            Some(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            None => f.write_str("no error"),
            Some(error) => fmt::Display::fmt(error, f),
        }
    }
}
