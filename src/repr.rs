//! The module dealing with the underlying representation of the [`Sum`] type.
//!
//! # Implementation details
//!
//! A sum type is a hand-written tagged union over a type list
//! `(A0, (A1, (..., ())))`:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::ManuallyDrop;
//!
//! struct Nil(Infallible);
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawSum2<T1, T2> {
//!     tag: u8,
//!     data: Cons<T1, Cons<T2, Nil>>,
//! }
//! ```
//!
//! `Cons` is `repr(C)`, so every alternative starts at offset zero and a
//! pointer to the union is a pointer to whichever alternative is written. The
//! tag is the ordinal of that alternative.
//!
//! [`Sum`]: crate::Sum

use core::{any::TypeId, convert::Infallible, mem::ManuallyDrop};

use crate::ordinal::{Ordinal, UInt, UTerm};

/// The terminator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
pub struct Nil(pub(crate) Infallible);

/// The accumulator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
#[repr(C)]
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<T>,
    pub(crate) next: ManuallyDrop<U>,
}

/// A closed, ordered list of alternatives.
pub trait SumList {
    /// The underlying representation of the `Sum` type.
    type Repr;

    /// The number of alternatives.
    const COUNT: usize;

    #[doc(hidden)]
    unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8);
}

impl SumList for () {
    type Repr = Nil;
    const COUNT: usize = 0;

    unsafe fn drop(_: &mut ManuallyDrop<Nil>, _: u8) {}
}

impl<Head, Tail> SumList for (Head, Tail)
where
    Tail: SumList,
{
    type Repr = Cons<Head, Tail::Repr>;
    const COUNT: usize = 1 + Tail::COUNT;

    unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8) {
        if tag == 0 {
            unsafe { ManuallyDrop::drop(&mut this.data) };
        } else {
            unsafe { Tail::drop(&mut this.next, tag - 1) }
        }
    }
}

/// States that alternative `T` sits at ordinal `U` of the list.
///
/// Naming either parameter is enough for the other to be inferred: `U` selects
/// exactly one impl, and for a type that appears once in the list so does `T`.
pub trait Split<T, U: Ordinal>: SumList {
    #[doc(hidden)]
    fn from_data(data: T) -> Self::Repr;

    #[doc(hidden)]
    fn as_ptr(this: *const Self::Repr) -> *const T;

    #[doc(hidden)]
    fn as_mut_ptr(this: *mut Self::Repr) -> *mut T;
}

impl<Head, Tail> Split<Head, UTerm> for (Head, Tail)
where
    Tail: SumList,
{
    fn from_data(data: Head) -> Self::Repr {
        Cons {
            data: ManuallyDrop::new(data),
        }
    }

    fn as_ptr(this: *const Self::Repr) -> *const Head {
        this.cast()
    }

    fn as_mut_ptr(this: *mut Self::Repr) -> *mut Head {
        this.cast()
    }
}

impl<Head, Tail, T, U: Ordinal> Split<T, UInt<U>> for (Head, Tail)
where
    Tail: Split<T, U>,
{
    fn from_data(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_data(data)),
        }
    }

    fn as_ptr(this: *const Self::Repr) -> *const T {
        Tail::as_ptr(this.cast())
    }

    fn as_mut_ptr(this: *mut Self::Repr) -> *mut T {
        Tail::as_mut_ptr(this.cast())
    }
}

/// Run-time lookup of an alternative by its [`TypeId`].
pub trait Locate: SumList {
    /// Returns the first ordinal `>= from` whose alternative has type id `id`,
    /// where `at` is the ordinal of the head of `Self`.
    #[doc(hidden)]
    fn locate(id: TypeId, from: usize, at: usize) -> Option<usize>;
}

impl Locate for () {
    fn locate(_: TypeId, _: usize, _: usize) -> Option<usize> {
        None
    }
}

impl<Head: 'static, Tail: Locate> Locate for (Head, Tail) {
    fn locate(id: TypeId, from: usize, at: usize) -> Option<usize> {
        if at >= from && TypeId::of::<Head>() == id {
            Some(at)
        } else {
            Tail::locate(id, from, at + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::T;

    #[test]
    fn count() {
        assert_eq!(<T![] as SumList>::COUNT, 0);
        assert_eq!(<T![u8, u16, u32] as SumList>::COUNT, 3);
    }

    #[test]
    fn locate_scans_forward() {
        type L = T![u8, char, u8];
        let id = TypeId::of::<u8>();
        assert_eq!(L::locate(id, 0, 0), Some(0));
        assert_eq!(L::locate(id, 1, 0), Some(2));
        assert_eq!(L::locate(id, 3, 0), None);
        assert_eq!(L::locate(TypeId::of::<i64>(), 0, 0), None);
    }
}
