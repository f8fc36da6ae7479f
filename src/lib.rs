#![doc = include_str!("../README.md")]
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]

#[cfg(test)]
extern crate std;

use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
};

mod construct;
mod derive;
mod dispatch;
mod enumerate;
mod error;
mod macros;
pub mod ordinal;
pub mod repr;

pub use self::{
    construct::{Builder, Emplace},
    derive::{SumClone, SumDebug, SumHash, SumPartialEq},
    dispatch::{Dispatch, DispatchMut, Erased, Visit, VisitMut, Visitor},
    enumerate::{for_each_ordinal, Enumerate, OrdinalFn},
    error::OrdinalError,
};
use self::{
    ordinal::Ordinal,
    repr::{Locate, Split, SumList},
};

pub type Repr<S> = <S as SumList>::Repr;

/// A tagged union over the type list `S`.
///
/// The tag is always the ordinal of the alternative stored in `data`.
pub struct Sum<S: SumList> {
    tag: u8,
    data: ManuallyDrop<Repr<S>>,
}

impl<S: SumList> Sum<S> {
    /// The number of alternatives of this sum type.
    pub const COUNT: usize = S::COUNT;

    /// Wraps `value` as the alternative at ordinal `U`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordsum::Sum;
    ///
    /// let s: Sum![i32, char] = Sum::new('x');
    /// assert_eq!(s.ordinal(), 1);
    /// ```
    pub fn new<T, U>(value: T) -> Self
    where
        S: Split<T, U>,
        U: Ordinal,
    {
        Sum {
            tag: U::TAG,
            data: ManuallyDrop::new(S::from_data(value)),
        }
    }

    /// The ordinal of the active alternative.
    pub fn ordinal(&self) -> usize {
        usize::from(self.tag)
    }

    pub const fn count(&self) -> usize {
        S::COUNT
    }

    pub fn get<T, U>(&self) -> Option<&T>
    where
        S: Split<T, U>,
        U: Ordinal,
    {
        (self.tag == U::TAG).then(|| unsafe { &*S::as_ptr(&*self.data) })
    }

    pub fn get_mut<T, U>(&mut self) -> Option<&mut T>
    where
        S: Split<T, U>,
        U: Ordinal,
    {
        (self.tag == U::TAG).then(|| unsafe { &mut *S::as_mut_ptr(&mut *self.data) })
    }

    /// Whether the alternative at ordinal `U` is active.
    pub fn holds<T, U>(&self) -> bool
    where
        S: Split<T, U>,
        U: Ordinal,
    {
        self.tag == U::TAG
    }
}

impl<S: SumList> Sum<S> {
    /// The ordinal of alternative `T`, resolved at compile time.
    ///
    /// A type that is not an alternative fails to compile. A type listed more
    /// than once needs its ordinal spelled out.
    ///
    /// ```rust
    /// use ordsum::Sum;
    ///
    /// type V = Sum![f32, i32, char];
    /// const CHAR: usize = V::ordinal_of::<char, _>();
    /// assert_eq!(CHAR, 2);
    /// ```
    pub const fn ordinal_of<T, U>() -> usize
    where
        S: Split<T, U>,
        U: Ordinal,
    {
        U::VALUE
    }

    /// The first ordinal at or after `start` whose alternative is `T`, or
    /// [`Self::COUNT`] if there is none.
    ///
    /// The returned count is a sentinel and never a valid ordinal; prefer
    /// [`Self::try_position_of`] unless the sentinel is what you want.
    pub fn position_of<T: ?Sized + 'static>(start: usize) -> usize
    where
        S: Locate,
    {
        S::locate(core::any::TypeId::of::<T>(), start, 0).unwrap_or(S::COUNT)
    }

    pub fn try_position_of<T: ?Sized + 'static>(start: usize) -> Result<usize, OrdinalError>
    where
        S: Locate,
    {
        S::locate(core::any::TypeId::of::<T>(), start, 0).ok_or(OrdinalError::NotFound {
            type_name: core::any::type_name::<T>(),
            start,
        })
    }
}

impl<S: SumDebug> fmt::Debug for Sum<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", unsafe { S::debug_repr(&self.data, self.tag) })
    }
}

impl<S: SumList> Drop for Sum<S> {
    fn drop(&mut self) {
        unsafe { S::drop(&mut self.data, self.tag) }
    }
}

impl<S: SumClone> Clone for Sum<S> {
    fn clone(&self) -> Self {
        Sum {
            tag: self.tag,
            data: ManuallyDrop::new(unsafe { S::clone_repr(&self.data, self.tag) }),
        }
    }
}

impl<S: SumPartialEq> PartialEq for Sum<S> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && unsafe { S::eq_repr(&self.data, &other.data, self.tag) }
    }
}

impl<S: SumPartialEq + Eq> Eq for Sum<S> {}

impl<S: SumHash> Hash for Sum<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        unsafe { S::hash_repr(&self.data, self.tag, state) }
    }
}
