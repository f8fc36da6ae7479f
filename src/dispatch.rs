//! Running a visitor against the active alternative of a [`Sum`].
//!
//! A visitor implements [`Visit`] or [`VisitMut`] once per alternative type,
//! the way an overload set would. Dispatch walks the ordinals with
//! [`for_each_ordinal`] and the one branch whose ordinal matches calls the
//! visitor.

use core::{any::Any, marker::PhantomData};

use log::{debug, trace};

use crate::{
    enumerate::{for_each_ordinal, Enumerate, OrdinalFn},
    ordinal::{Ordinal, U0},
    repr::{Split, SumList},
    OrdinalError, Sum,
};

/// The result type shared by every per-alternative visit.
pub trait Visitor {
    type Output;
}

/// Read-only access to alternative `A`.
pub trait Visit<A>: Visitor {
    fn visit(&mut self, value: &A) -> Self::Output;
}

/// Read-write access to alternative `A`.
pub trait VisitMut<A>: Visitor {
    fn visit_mut(&mut self, value: &mut A) -> Self::Output;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Output = V::Output;
}

impl<A, V: Visit<A> + ?Sized> Visit<A> for &mut V {
    fn visit(&mut self, value: &A) -> Self::Output {
        (**self).visit(value)
    }
}

impl<A, V: VisitMut<A> + ?Sized> VisitMut<A> for &mut V {
    fn visit_mut(&mut self, value: &mut A) -> Self::Output {
        (**self).visit_mut(value)
    }
}

/// A single closure visiting every alternative through [`Any`].
///
/// The closure tells alternatives apart by downcasting, which stands in for a
/// generic body branching on the alternative type.
///
/// ```rust
/// use core::any::Any;
/// use ordsum::{Erased, Sum};
///
/// let mut v: Sum![i32, char] = Sum::new(5i32);
/// v.visit_mut(Erased::new_mut(|value: &mut dyn Any| {
///     if let Some(n) = value.downcast_mut::<i32>() {
///         *n += 1;
///     }
/// }));
/// assert_eq!(v.get::<i32, _>(), Some(&6));
/// ```
pub struct Erased<F, R> {
    f: F,
    _output: PhantomData<fn() -> R>,
}

impl<F, R> Erased<F, R> {
    pub fn new(f: F) -> Self
    where
        F: FnMut(&dyn Any) -> R,
    {
        Erased {
            f,
            _output: PhantomData,
        }
    }

    pub fn new_mut(f: F) -> Self
    where
        F: FnMut(&mut dyn Any) -> R,
    {
        Erased {
            f,
            _output: PhantomData,
        }
    }
}

impl<F, R> Visitor for Erased<F, R> {
    type Output = R;
}

impl<F, R, A: 'static> Visit<A> for Erased<F, R>
where
    F: FnMut(&dyn Any) -> R,
{
    fn visit(&mut self, value: &A) -> R {
        (self.f)(value as &dyn Any)
    }
}

impl<F, R, A: 'static> VisitMut<A> for Erased<F, R>
where
    F: FnMut(&mut dyn Any) -> R,
{
    fn visit_mut(&mut self, value: &mut A) -> R {
        (self.f)(value as &mut dyn Any)
    }
}

/// Read-only dispatch state for one pass of [`for_each_ordinal`].
pub struct Dispatch<'a, S: SumList, V: Visitor> {
    sum: &'a Sum<S>,
    ordinal: usize,
    visitor: V,
    output: Option<V::Output>,
}

impl<S: SumList, A, V: Visit<A>> OrdinalFn<S, A> for Dispatch<'_, S, V> {
    fn call<U>(&mut self, _: U)
    where
        U: Ordinal,
        S: Split<A, U>,
    {
        if U::VALUE != self.ordinal {
            return;
        }
        if let Some(value) = self.sum.get::<A, U>() {
            self.output = Some(self.visitor.visit(value));
        }
    }
}

/// Read-write dispatch state for one pass of [`for_each_ordinal`].
pub struct DispatchMut<'a, S: SumList, V: Visitor> {
    sum: &'a mut Sum<S>,
    ordinal: usize,
    visitor: V,
    output: Option<V::Output>,
}

impl<S: SumList, A, V: VisitMut<A>> OrdinalFn<S, A> for DispatchMut<'_, S, V> {
    fn call<U>(&mut self, _: U)
    where
        U: Ordinal,
        S: Split<A, U>,
    {
        if U::VALUE != self.ordinal {
            return;
        }
        if let Some(value) = self.sum.get_mut::<A, U>() {
            self.output = Some(self.visitor.visit_mut(value));
        }
    }
}

fn missed(ordinal: usize, active: usize, count: usize) -> OrdinalError {
    if ordinal >= count {
        debug!("no alternative at ordinal {ordinal} of {count}, visitor not called");
        OrdinalError::OutOfRange { ordinal, count }
    } else {
        debug!("ordinal {ordinal} is inactive (active: {active}), visitor not called");
        OrdinalError::Inactive { ordinal, active }
    }
}

impl<S: SumList> Sum<S> {
    /// Calls `visitor` on the active alternative.
    ///
    /// ```rust
    /// use ordsum::{Sum, Visit, Visitor};
    ///
    /// struct Describe;
    ///
    /// impl Visitor for Describe {
    ///     type Output = &'static str;
    /// }
    ///
    /// impl Visit<f32> for Describe {
    ///     fn visit(&mut self, _: &f32) -> &'static str {
    ///         "float"
    ///     }
    /// }
    ///
    /// impl Visit<char> for Describe {
    ///     fn visit(&mut self, _: &char) -> &'static str {
    ///         "char"
    ///     }
    /// }
    ///
    /// let v: Sum![f32, char] = Sum::new('x');
    /// assert_eq!(v.visit(Describe), "char");
    /// ```
    pub fn visit<'a, V>(&'a self, visitor: V) -> V::Output
    where
        V: Visitor,
        S: Enumerate<S, Dispatch<'a, S, V>, U0>,
    {
        let ordinal = self.ordinal();
        match self.visit_at(ordinal, visitor) {
            Ok(output) => output,
            Err(err) => unreachable!("active alternative was not dispatched: {err}"),
        }
    }

    /// Calls `visitor` on the active alternative, allowing it to mutate it.
    pub fn visit_mut<'a, V>(&'a mut self, visitor: V) -> V::Output
    where
        V: Visitor,
        S: Enumerate<S, DispatchMut<'a, S, V>, U0>,
    {
        let ordinal = self.ordinal();
        match self.visit_at_mut(ordinal, visitor) {
            Ok(output) => output,
            Err(err) => unreachable!("active alternative was not dispatched: {err}"),
        }
    }

    /// Calls `visitor` on the alternative at `ordinal`, which the caller
    /// asserts is the active one.
    ///
    /// The visitor is not called when `ordinal` is out of range or names an
    /// inactive alternative; the error says which.
    pub fn visit_at<'a, V>(&'a self, ordinal: usize, visitor: V) -> Result<V::Output, OrdinalError>
    where
        V: Visitor,
        S: Enumerate<S, Dispatch<'a, S, V>, U0>,
    {
        let active = self.ordinal();
        trace!("dispatching ordinal {ordinal} of {}", S::COUNT);
        let mut dispatch = Dispatch {
            sum: self,
            ordinal,
            visitor,
            output: None,
        };
        for_each_ordinal::<S, _>(&mut dispatch);
        dispatch
            .output
            .ok_or_else(|| missed(ordinal, active, S::COUNT))
    }

    pub fn visit_at_mut<'a, V>(
        &'a mut self,
        ordinal: usize,
        visitor: V,
    ) -> Result<V::Output, OrdinalError>
    where
        V: Visitor,
        S: Enumerate<S, DispatchMut<'a, S, V>, U0>,
    {
        let active = self.ordinal();
        trace!("dispatching ordinal {ordinal} of {} for mutation", S::COUNT);
        let mut dispatch = DispatchMut {
            sum: self,
            ordinal,
            visitor,
            output: None,
        };
        for_each_ordinal::<S, _>(&mut dispatch);
        dispatch
            .output
            .ok_or_else(|| missed(ordinal, active, S::COUNT))
    }
}
