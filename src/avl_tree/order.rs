use std::cmp::Ordering;

/// A total order over `T`, expressed as a single three-way comparison.
///
/// The order must be a strict weak ordering. It is not validated; an inconsistent order leaves
/// the tree well-formed in memory but with an unspecified shape.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a `Compare<T>`.
pub trait Compare<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The order given by `T: Ord`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// An order composed from a "less than" predicate and an "equal" predicate.
///
/// Equality is checked first, so a pair that is both "equal" and "less" compares `Equal`.
#[derive(Clone, Copy, Debug)]
pub struct Predicates<L, E> {
    less: L,
    equal: E,
}

impl<L, E> Predicates<L, E> {
    pub fn new(less: L, equal: E) -> Self {
        Predicates { less, equal }
    }
}

impl<T, L, E> Compare<T> for Predicates<L, E>
where
    L: Fn(&T, &T) -> bool,
    E: Fn(&T, &T) -> bool,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if (self.equal)(a, b) {
            Ordering::Equal
        } else if (self.less)(a, b) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}
