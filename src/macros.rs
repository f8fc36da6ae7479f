/// Constructs a [`struct@Sum`] type from a list of types.
///
/// # Examples
///
/// ```rust
/// use ordsum::Sum;
///
/// type Number = Sum![i32, u32, f64];
/// let n: Number = Sum::new(42u32);
/// assert_eq!(n.ordinal(), 1);
/// ```
#[macro_export]
macro_rules! Sum {
    [$($t:ty),* $(,)?] => [$crate::Sum::<$crate::T![$($t,)*]>];
}

/// Constructs a type list from a list of types.
///
/// # Examples
///
/// ```rust
/// use ordsum::T;
///
/// type Alternatives = T![i32, u32, f64];
/// let list: Alternatives = (42i32, (42u32, (42.0f64, ())));
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$head:ty $(, $t:ty)* $(,)?] => [($head, $crate::T!($($t,)*))];
}
