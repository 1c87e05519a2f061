//! # awaitcell
//!
//! **awaitcell** provides the awaitable result cell used by the **Nebula**
//! ecosystem to hand the outcome of one asynchronous operation from the code
//! that produces it to the code that waits for it.
//!
//! An awaitable holds either a value, a captured error, or no outcome yet.
//! Exactly one producer makes exactly one terminal write (complete, fail or
//! cancel), and exactly one consumer observes it, by polling or through a
//! continuation invoked once the cell becomes terminal. The cell has no
//! internal locking: producer and consumer are coordinated by the scheduler
//! that owns them.
//!
//! ## Quick Start
//!
//! ```rust
//! use awaitcell::{Awaitable, Error};
//!
//! let mut op = Awaitable::<u32>::new();
//!
//! // Producer side
//! op.initialize_result(42);
//!
//! // Consumer side
//! assert!(op.is_ready() && !op.has_error());
//! assert_eq!(*op.result(), 42);
//!
//! let mut failed = Awaitable::<u32>::new();
//! failed.initialize_error(Error::msg("connection reset"));
//! assert!(failed.get().is_err());
//! ```
//!
//! ## Modules
//!
//! - [`awaitable`] — the awaitable, its value-less variant and its states
//! - [`cell`] — the result storage and its inline/boxed layouts
//! - [`continuation`] — links to waiters
//! - [`ops`] — predicates and continuation registration over groups
//! - [`local`] — single-threaded producer/handle pairs implementing `Future`

pub mod awaitable;
pub mod cell;
pub mod continuation;
pub mod error;
pub mod local;
pub mod ops;

pub use awaitable::{Awaitable, AwaitableBase, BoxedAwaitable, Completion, State};
pub use cell::{Boxed, Inline, Layout, ResultCell};
pub use continuation::{Awaiter, Continuation};
pub use error::{AwaitError, Error};
