//! Compile-time iteration over the ordinals of a type list.
//!
//! [`for_each_ordinal`] unrolls into one call per alternative, in ascending
//! ordinal order. Each call is monomorphized with the ordinal token and the
//! alternative type at that position, so the callable may branch on
//! `U::VALUE` or rely on the alternative type without any run-time lookup.

use crate::{
    ordinal::{Ordinal, UInt, U0},
    repr::{Split, SumList},
};

/// A callable that handles alternative `A` of the list `S`.
///
/// Implement it generically over `A` (with whatever bounds the body needs) to
/// get one instantiation per alternative.
pub trait OrdinalFn<S: SumList, A> {
    fn call<U>(&mut self, token: U)
    where
        U: Ordinal,
        S: Split<A, U>;
}

/// The unrolled loop over the tail of `R` starting at ordinal `O`.
pub trait Enumerate<R: SumList, F, O: Ordinal>: SumList {
    fn enumerate(f: &mut F);
}

impl<R: SumList, F, O: Ordinal> Enumerate<R, F, O> for () {
    fn enumerate(_: &mut F) {}
}

impl<R, F, O, Head, Tail> Enumerate<R, F, O> for (Head, Tail)
where
    R: Split<Head, O>,
    O: Ordinal,
    F: OrdinalFn<R, Head>,
    Tail: Enumerate<R, F, UInt<O>>,
{
    fn enumerate(f: &mut F) {
        <F as OrdinalFn<R, Head>>::call(f, O::default());
        Tail::enumerate(f);
    }
}

/// Calls `f` once for every ordinal of `S`, in ascending order.
///
/// # Examples
///
/// ```rust
/// use ordsum::{for_each_ordinal, ordinal::Ordinal, repr::{Split, SumList}, OrdinalFn, T};
///
/// struct Sizes(Vec<usize>);
///
/// impl<S: SumList, A> OrdinalFn<S, A> for Sizes {
///     fn call<U>(&mut self, _: U)
///     where
///         U: Ordinal,
///         S: Split<A, U>,
///     {
///         self.0.push(core::mem::size_of::<A>());
///     }
/// }
///
/// let mut sizes = Sizes(Vec::new());
/// for_each_ordinal::<T![u8, u32, u16], _>(&mut sizes);
/// assert_eq!(sizes.0, [1, 4, 2]);
/// ```
pub fn for_each_ordinal<S, F>(f: &mut F)
where
    S: Enumerate<S, F, U0>,
{
    S::enumerate(f)
}
