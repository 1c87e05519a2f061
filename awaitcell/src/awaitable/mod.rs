//! Awaitable result cells.
//!
//! This module defines the awaitable itself and the pieces it is built from:
//! - [`State`], the lifecycle state word,
//! - [`AwaitableBase`], the result-type independent capability surface,
//! - [`Awaitable`], the value-bearing awaitable,
//! - [`Completion`], the value-less awaitable.

mod base;
mod core;
mod state;
mod void;

pub use self::core::{Awaitable, BoxedAwaitable};
pub use base::AwaitableBase;
pub use state::State;
pub use void::Completion;
