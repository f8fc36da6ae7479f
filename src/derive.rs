//! Per-alternative implementations of the standard traits, selected by tag.

use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
};

use crate::repr::{Cons, Nil, SumList};

pub trait SumClone: SumList {
    #[doc(hidden)]
    unsafe fn clone_repr(this: &Self::Repr, tag: u8) -> Self::Repr;
}

impl SumClone for () {
    unsafe fn clone_repr(this: &Nil, _: u8) -> Nil {
        match this.0 {}
    }
}

impl<Head: Clone, Tail: SumClone> SumClone for (Head, Tail) {
    unsafe fn clone_repr(this: &Self::Repr, tag: u8) -> Self::Repr {
        if tag == 0 {
            let data: &Head = unsafe { &this.data };
            Cons {
                data: ManuallyDrop::new(data.clone()),
            }
        } else {
            let next = unsafe { Tail::clone_repr(&this.next, tag - 1) };
            Cons {
                next: ManuallyDrop::new(next),
            }
        }
    }
}

pub trait SumPartialEq: SumList {
    #[doc(hidden)]
    unsafe fn eq_repr(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool;
}

impl SumPartialEq for () {
    unsafe fn eq_repr(this: &Nil, _: &Nil, _: u8) -> bool {
        match this.0 {}
    }
}

impl<Head: PartialEq, Tail: SumPartialEq> SumPartialEq for (Head, Tail) {
    unsafe fn eq_repr(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool {
        if tag == 0 {
            let (a, b): (&Head, &Head) = unsafe { (&this.data, &other.data) };
            a == b
        } else {
            unsafe { Tail::eq_repr(&this.next, &other.next, tag - 1) }
        }
    }
}

pub trait SumDebug: SumList {
    #[doc(hidden)]
    unsafe fn debug_repr(this: &Self::Repr, tag: u8) -> &dyn fmt::Debug;
}

impl SumDebug for () {
    unsafe fn debug_repr(this: &Nil, _: u8) -> &dyn fmt::Debug {
        match this.0 {}
    }
}

impl<Head: fmt::Debug, Tail: SumDebug> SumDebug for (Head, Tail) {
    unsafe fn debug_repr(this: &Self::Repr, tag: u8) -> &dyn fmt::Debug {
        if tag == 0 {
            let data: &Head = unsafe { &this.data };
            data
        } else {
            unsafe { Tail::debug_repr(&this.next, tag - 1) }
        }
    }
}

pub trait SumHash: SumList {
    #[doc(hidden)]
    unsafe fn hash_repr<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H);
}

impl SumHash for () {
    unsafe fn hash_repr<H: Hasher>(this: &Nil, _: u8, _: &mut H) {
        match this.0 {}
    }
}

impl<Head: Hash, Tail: SumHash> SumHash for (Head, Tail) {
    unsafe fn hash_repr<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H) {
        if tag == 0 {
            let data: &Head = unsafe { &this.data };
            data.hash(state);
        } else {
            unsafe { Tail::hash_repr(&this.next, tag - 1, state) }
        }
    }
}
