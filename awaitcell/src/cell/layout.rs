use std::mem::{align_of, size_of};

/// Size in bytes of the inline value slot: two machine words.
pub const SLOT_SIZE: usize = 2 * size_of::<usize>();

/// Largest alignment a value may require to be stored inline.
pub const SLOT_ALIGN: usize = 2 * size_of::<usize>();

/// Returns `true` if `R` can be stored in the inline slot.
pub const fn fits_inline<R>() -> bool {
    size_of::<R>() <= SLOT_SIZE && align_of::<R>() <= SLOT_ALIGN
}

/// Storage strategy for the value branch of a result cell.
///
/// The strategy is picked at compile time through the `L` parameter of
/// [`ResultCell`](super::ResultCell) and [`Awaitable`](crate::Awaitable):
///
/// - [`Inline`] keeps the value next to the state word. Types that do not
///   satisfy [`fits_inline`] are rejected when the cell is instantiated.
/// - [`Boxed`] keeps the value on the heap and accepts any type.
pub trait Layout: 'static {
    /// Slot type used to hold a value of type `R`.
    type Slot<R>: Slot<R>;
}

/// A container for exactly one value.
pub trait Slot<R>: Sized {
    /// Evaluated when a cell using this slot is instantiated.
    ///
    /// Implementations use it to reject unsupported value types at compile
    /// time.
    const CHECK: () = ();

    /// `true` if the value lives inside the slot itself.
    const INLINE: bool;

    /// Stores `value` in a new slot.
    fn new(value: R) -> Self;

    /// Returns a reference to the stored value.
    fn get(&self) -> &R;

    /// Returns a mutable reference to the stored value.
    fn get_mut(&mut self) -> &mut R;

    /// Consumes the slot and returns the value.
    fn into_inner(self) -> R;
}

/// Inline storage strategy. See [`Layout`].
///
/// A value type that does not fit the slot is a build error:
///
/// ```compile_fail
/// use awaitcell::Awaitable;
///
/// let _ = Awaitable::<[u64; 4]>::new();
/// ```
///
/// The same type is accepted with [`Boxed`]:
///
/// ```
/// use awaitcell::BoxedAwaitable;
///
/// let mut awt = BoxedAwaitable::<[u64; 4]>::new();
/// awt.initialize_result([1, 2, 3, 4]);
/// assert_eq!(awt.result()[3], 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Inline {}

/// Heap storage strategy. See [`Layout`].
#[derive(Debug, Clone, Copy)]
pub enum Boxed {}

impl Layout for Inline {
    type Slot<R> = InlineSlot<R>;
}

impl Layout for Boxed {
    type Slot<R> = BoxedSlot<R>;
}

/// Slot of the [`Inline`] layout: the value itself.
#[derive(Debug)]
pub struct InlineSlot<R>(R);

impl<R> Slot<R> for InlineSlot<R> {
    const CHECK: () = assert!(
        fits_inline::<R>(),
        "result type is too large or over-aligned for inline storage, use the `Boxed` layout"
    );

    const INLINE: bool = true;

    fn new(value: R) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CHECK;
        Self(value)
    }

    fn get(&self) -> &R {
        &self.0
    }

    fn get_mut(&mut self) -> &mut R {
        &mut self.0
    }

    fn into_inner(self) -> R {
        self.0
    }
}

/// Slot of the [`Boxed`] layout: the value behind a [`Box`].
#[derive(Debug)]
pub struct BoxedSlot<R>(Box<R>);

impl<R> Slot<R> for BoxedSlot<R> {
    const INLINE: bool = false;

    fn new(value: R) -> Self {
        Self(Box::new(value))
    }

    fn get(&self) -> &R {
        &self.0
    }

    fn get_mut(&mut self) -> &mut R {
        &mut self.0
    }

    fn into_inner(self) -> R {
        *self.0
    }
}
