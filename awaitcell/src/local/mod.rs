//! Single-threaded producer/consumer pairs.
//!
//! A [`channel`] splits one [`Awaitable`](crate::Awaitable) into a
//! [`Producer`], which makes the terminal write, and a [`Handle`], which
//! observes it either by polling or by awaiting it as a future.
//!
//! Both sides share the awaitable through `Rc<RefCell<_>>`, so they must
//! live on the same thread, typically inside one single-threaded executor.
//! Waiting registers the task's waker as the awaitable's continuation; no
//! thread is ever blocked.

mod handle;
mod set;

pub use handle::{Handle, Producer, channel, channel_in};
pub use set::HandleSet;
