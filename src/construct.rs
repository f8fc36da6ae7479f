//! Building a [`Sum`] from an ordinal and constructor arguments.

use log::{debug, trace};

use crate::{
    dispatch::{DispatchMut, VisitMut, Visitor},
    enumerate::{for_each_ordinal, Enumerate, OrdinalFn},
    ordinal::{Ordinal, U0},
    repr::{Split, SumList},
    OrdinalError, Sum,
};

/// Constructs an alternative in place from `Args`.
///
/// Every `Default` type can be built from `()`. Implement it for other
/// argument types to build alternatives that need input.
pub trait Emplace<Args>: Sized {
    fn emplace(args: Args) -> Self;
}

impl<T: Default> Emplace<()> for T {
    fn emplace(_: ()) -> T {
        T::default()
    }
}

/// Construction state for one pass of [`for_each_ordinal`].
///
/// Only the branch whose ordinal matches takes the arguments, so exactly one
/// constructor runs.
pub struct Builder<S: SumList, Args> {
    ordinal: usize,
    args: Option<Args>,
    built: Option<Sum<S>>,
}

impl<S: SumList, Args> Builder<S, Args> {
    fn run(ordinal: usize, args: Args) -> Result<Sum<S>, Args>
    where
        S: Enumerate<S, Self, U0>,
    {
        trace!("constructing ordinal {ordinal} of {}", S::COUNT);
        let mut builder = Self {
            ordinal,
            args: Some(args),
            built: None,
        };
        for_each_ordinal::<S, _>(&mut builder);
        match (builder.built, builder.args) {
            (Some(sum), _) => Ok(sum),
            (None, Some(args)) => Err(args),
            (None, None) => unreachable!("arguments taken without constructing"),
        }
    }
}

impl<S: SumList, A: Emplace<Args>, Args> OrdinalFn<S, A> for Builder<S, Args> {
    fn call<U>(&mut self, _: U)
    where
        U: Ordinal,
        S: Split<A, U>,
    {
        if U::VALUE != self.ordinal {
            return;
        }
        if let Some(args) = self.args.take() {
            self.built = Some(Sum::new::<A, U>(A::emplace(args)));
        }
    }
}

impl<S: SumList> Sum<S> {
    /// Builds the alternative at the compile-time ordinal `U` from `args`.
    ///
    /// ```rust
    /// use ordsum::{ordinal::U1, Sum};
    ///
    /// let v = <Sum![f32, i32, char]>::emplace_at::<U1, _, _>(());
    /// assert_eq!(v.get::<i32, _>(), Some(&0));
    /// ```
    pub fn emplace_at<U, A, Args>(args: Args) -> Self
    where
        U: Ordinal,
        S: Split<A, U>,
        A: Emplace<Args>,
    {
        Self::new::<A, U>(A::emplace(args))
    }

    /// Builds the alternative at the run-time `ordinal` from `args`.
    ///
    /// ```rust
    /// use ordsum::{OrdinalError, Sum};
    ///
    /// type V = Sum![f32, i32, char];
    /// assert_eq!(V::emplace(2, ()).unwrap().ordinal(), 2);
    /// assert_eq!(
    ///     V::emplace(3, ()).unwrap_err(),
    ///     OrdinalError::OutOfRange { ordinal: 3, count: 3 },
    /// );
    /// ```
    pub fn emplace<Args>(ordinal: usize, args: Args) -> Result<Self, OrdinalError>
    where
        S: Enumerate<S, Builder<S, Args>, U0>,
    {
        Builder::<S, Args>::run(ordinal, args).map_err(|_| {
            debug!("no alternative at ordinal {ordinal} of {}", S::COUNT);
            OrdinalError::OutOfRange {
                ordinal,
                count: S::COUNT,
            }
        })
    }

    /// Like [`Self::emplace`], but builds alternative 0 when `ordinal` is out
    /// of range.
    pub fn emplace_or_first<A0, Args>(ordinal: usize, args: Args) -> Self
    where
        S: Enumerate<S, Builder<S, Args>, U0> + Split<A0, U0>,
        A0: Emplace<Args>,
    {
        Builder::<S, Args>::run(ordinal, args).unwrap_or_else(|args| {
            debug!(
                "ordinal {ordinal} out of range for {} alternatives, falling back to 0",
                S::COUNT
            );
            Self::emplace_at::<U0, A0, Args>(args)
        })
    }

    /// Builds the alternative at `ordinal` and runs `visitor` on it once.
    pub fn emplace_with<Args, V>(
        ordinal: usize,
        args: Args,
        visitor: V,
    ) -> Result<(Self, V::Output), OrdinalError>
    where
        V: Visitor,
        S: Enumerate<S, Builder<S, Args>, U0>,
        S: for<'a> Enumerate<S, DispatchMut<'a, S, V>, U0>,
    {
        let mut sum = Self::emplace(ordinal, args)?;
        let output = sum.visit_mut(visitor);
        Ok((sum, output))
    }

    /// Like [`Self::emplace_with`], falling back to alternative 0 when
    /// `ordinal` is out of range.
    pub fn emplace_with_or_first<A0, Args, V>(
        ordinal: usize,
        args: Args,
        visitor: V,
    ) -> (Self, V::Output)
    where
        V: Visitor,
        A0: Emplace<Args>,
        S: Enumerate<S, Builder<S, Args>, U0> + Split<A0, U0>,
        S: for<'a> Enumerate<S, DispatchMut<'a, S, V>, U0>,
    {
        let mut sum = Self::emplace_or_first::<A0, Args>(ordinal, args);
        let output = sum.visit_mut(visitor);
        (sum, output)
    }

    /// Builds alternative `A` and runs `visitor` on it once before wrapping it.
    ///
    /// ```rust
    /// use ordsum::{Sum, VisitMut, Visitor};
    ///
    /// struct Set;
    ///
    /// impl Visitor for Set {
    ///     type Output = ();
    /// }
    ///
    /// impl VisitMut<char> for Set {
    ///     fn visit_mut(&mut self, value: &mut char) {
    ///         *value = 'r';
    ///     }
    /// }
    ///
    /// let (v, ()) = <Sum![i32, char]>::emplace_as::<char, _, _, _>((), Set);
    /// assert_eq!(v.get::<char, _>(), Some(&'r'));
    /// ```
    pub fn emplace_as<A, U, Args, V>(args: Args, mut visitor: V) -> (Self, V::Output)
    where
        U: Ordinal,
        S: Split<A, U>,
        A: Emplace<Args>,
        V: VisitMut<A>,
    {
        let mut value = A::emplace(args);
        let output = visitor.visit_mut(&mut value);
        (Self::new::<A, U>(value), output)
    }
}

#[cfg(test)]
mod tests {
    use core::any::Any;
    use std::vec::Vec;

    use super::*;
    use crate::{
        dispatch::{Erased, Visit},
        ordinal::*,
    };

    type V = Sum![f32, i32, char];

    /// Reports the ordinal of the alternative it sees.
    struct Which;

    impl Visitor for Which {
        type Output = usize;
    }

    impl Visit<f32> for Which {
        fn visit(&mut self, _: &f32) -> usize {
            0
        }
    }

    impl Visit<i32> for Which {
        fn visit(&mut self, _: &i32) -> usize {
            1
        }
    }

    impl Visit<char> for Which {
        fn visit(&mut self, _: &char) -> usize {
            2
        }
    }

    #[derive(Default)]
    struct Counter {
        calls: usize,
        last: Option<usize>,
    }

    impl Visitor for Counter {
        type Output = ();
    }

    impl VisitMut<f32> for Counter {
        fn visit_mut(&mut self, value: &mut f32) {
            self.calls += 1;
            self.last = Some(0);
            *value = 6.5;
        }
    }

    impl VisitMut<i32> for Counter {
        fn visit_mut(&mut self, value: &mut i32) {
            self.calls += 1;
            self.last = Some(1);
            *value = 98;
        }
    }

    impl VisitMut<char> for Counter {
        fn visit_mut(&mut self, value: &mut char) {
            self.calls += 1;
            self.last = Some(2);
            *value = 'r';
        }
    }

    #[derive(Debug, PartialEq)]
    struct K1 {
        tag: char,
        data: i32,
    }

    #[derive(Debug, PartialEq)]
    struct K2 {
        tag: char,
        data: f32,
    }

    impl Emplace<char> for K1 {
        fn emplace(tag: char) -> Self {
            K1 { tag, data: 4 }
        }
    }

    impl Emplace<char> for K2 {
        fn emplace(tag: char) -> Self {
            K2 { tag, data: 0.4 }
        }
    }

    #[test]
    fn compile_time_ordinals_round_trip() {
        assert_eq!(V::emplace_at::<U0, _, _>(()).visit(Which), 0);
        assert_eq!(V::emplace_at::<U1, _, _>(()).visit(Which), 1);
        assert_eq!(V::emplace_at::<U2, _, _>(()).visit(Which), 2);
    }

    #[test]
    fn run_time_ordinals_round_trip() {
        for ordinal in 0..V::COUNT {
            let v = V::emplace(ordinal, ()).unwrap();
            assert_eq!(v.ordinal(), ordinal);
            assert_eq!(v.visit(Which), ordinal);
        }
    }

    #[test]
    fn resolved_type_is_constructed() {
        let ordinal = V::position_of::<char>(0);
        let v = V::emplace(ordinal, ()).unwrap();
        assert_eq!(v.get::<char, _>(), Some(&'\0'));

        let ordinal = V::ordinal_of::<i32, _>();
        let v = V::emplace(ordinal, ()).unwrap();
        assert!(v.holds::<i32, _>());
    }

    #[test]
    fn out_of_range_falls_back_to_first() {
        assert!(V::emplace(99, ()).is_err());
        let v = V::emplace_or_first(99, ());
        assert_eq!(v.ordinal(), 0);
        assert_eq!(v.get::<f32, _>(), Some(&0.0));
    }

    #[test]
    fn non_default_alternatives() {
        type K = Sum![K1, K2];
        let v = K::emplace(1, 't').unwrap();
        assert_eq!(v.get::<K2, _>(), Some(&K2 { tag: 't', data: 0.4 }));
        let v = K::emplace_or_first(7, 'q');
        assert_eq!(v.get::<K1, _>(), Some(&K1 { tag: 'q', data: 4 }));
    }

    #[test]
    fn construct_and_perform_runs_once() {
        let mut seen = Vec::new();
        for ordinal in 0..V::COUNT {
            let mut counter = Counter::default();
            let (v, ()) = V::emplace_with(ordinal, (), &mut counter).unwrap();
            assert_eq!(counter.calls, 1);
            assert_eq!(counter.last, Some(ordinal));
            seen.push(v);
        }
        assert_eq!(seen[0].get::<f32, _>(), Some(&6.5));
        assert_eq!(seen[1].get::<i32, _>(), Some(&98));
        assert_eq!(seen[2].get::<char, _>(), Some(&'r'));

        let mut counter = Counter::default();
        let (v, ()) = V::emplace_with_or_first(99, (), &mut counter);
        assert_eq!(v.ordinal(), 0);
        assert_eq!(counter.calls, 1);

        let mut counter = Counter::default();
        assert!(V::emplace_with(99, (), &mut counter).is_err());
        assert_eq!(counter.calls, 0);
    }

    #[test]
    fn type_derived_construct_and_perform() {
        let mut counter = Counter::default();
        let (mut v, ()) = V::emplace_as::<char, _, _, _>((), &mut counter);
        assert_eq!(counter.calls, 1);
        assert_eq!(v.get::<char, _>(), Some(&'r'));

        let ordinal = V::ordinal_of::<char, _>();
        let update = Erased::new_mut(|value: &mut dyn Any| {
            if let Some(c) = value.downcast_mut::<char>() {
                *c = 'k';
            }
        });
        assert_eq!(v.visit_at_mut(ordinal, update), Ok(()));
        assert_eq!(v.get::<char, _>(), Some(&'k'));
    }
}
