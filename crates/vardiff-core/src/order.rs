use std::cmp::Ordering;

/// A total order over records, injected into the engine by the caller.
///
/// It must agree with the order both input sequences were produced in. The
/// engine never checks that on its own.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// The `Ord` order of the record type.
pub fn natural<T: Ord + ?Sized>(left: &T, right: &T) -> Ordering {
    left.cmp(right)
}
