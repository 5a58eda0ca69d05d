use rand::{Rng, rng};

/// A trait for random sources that pick an index below a bound.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests.
///
/// # Example
/// ```
/// use nearmint::RandSource;
///
/// struct FirstAlways;
/// impl RandSource for FirstAlways {
///     fn pick(&self, _bound: usize) -> usize {
///         0
///     }
/// }
///
/// assert_eq!(FirstAlways.pick(10), 0);
/// ```
pub trait RandSource {
    /// Returns a value in `0..bound`. `bound` is never zero.
    fn pick(&self, bound: usize) -> usize;
}

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This type does **not** store the RNG itself; it accesses the thread-local
/// generator on each call, so it is a zero-sized value that can be cloned and
/// moved freely.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn pick(&self, bound: usize) -> usize {
        rng().random_range(0..bound)
    }
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn pick(&self, bound: usize) -> usize {
        (**self).pick(bound)
    }
}
