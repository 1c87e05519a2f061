//! Storage for the outcome of an operation.
//!
//! A [`ResultCell`] holds exactly one of an [`Error`](crate::Error) or a
//! value. The error branch doubles as the "no outcome yet" state by holding
//! the empty error. How the value is stored is chosen through the
//! [`Layout`] parameter.

mod layout;
mod result;

pub use layout::{Boxed, BoxedSlot, Inline, InlineSlot, Layout, SLOT_ALIGN, SLOT_SIZE, Slot, fits_inline};
pub use result::ResultCell;
