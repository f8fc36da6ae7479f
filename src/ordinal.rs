//! Type-level ordinal tokens.
//!
//! An ordinal token is a zero-sized type whose identity carries a position in a
//! type list. Generic code receiving a token `U` can read `U::VALUE` as a
//! constant, so a single generic body is specialized once per ordinal.

use core::{fmt, marker::PhantomData};

/// The zero ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UTerm;

/// The successor of ordinal `U`.
pub struct UInt<U>(PhantomData<U>);

impl<U> Clone for UInt<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for UInt<U> {}

impl<U> Default for UInt<U> {
    fn default() -> Self {
        UInt(PhantomData)
    }
}

impl<U: Ordinal> fmt::Debug for UInt<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}", Self::VALUE)
    }
}

/// A compile-time ordinal.
pub trait Ordinal: Copy + Default {
    /// The position this token stands for.
    const VALUE: usize;

    /// The tag byte stored in a [`Sum`](crate::Sum) holding this ordinal.
    const TAG: u8 = {
        assert!(Self::VALUE <= u8::MAX as usize, "ordinal does not fit in a tag");
        Self::VALUE as u8
    };
}

impl Ordinal for UTerm {
    const VALUE: usize = 0;
}

impl<U: Ordinal> Ordinal for UInt<U> {
    const VALUE: usize = 1 + U::VALUE;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
pub type U8 = UInt<U7>;
pub type U9 = UInt<U8>;
pub type U10 = UInt<U9>;
pub type U11 = UInt<U10>;
pub type U12 = UInt<U11>;
pub type U13 = UInt<U12>;
pub type U14 = UInt<U13>;
pub type U15 = UInt<U14>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(U0::VALUE, 0);
        assert_eq!(U3::VALUE, 3);
        assert_eq!(U15::TAG, 15);
        assert_eq!(std::format!("{:?}", U2::default()), "U2");
    }
}
