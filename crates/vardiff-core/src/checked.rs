use std::cmp::Ordering;

use crate::cursor::OrderedCursor;
use crate::error::{DiffError, Side};
use crate::order::Comparator;

/// Cursor adapter that verifies its records arrive in non-decreasing order.
///
/// The engine assumes sorted input and silently produces wrong output when
/// that does not hold. Wrapping either cursor in `OrderChecked` turns the
/// first out-of-order record into [`DiffError::OutOfOrder`] instead, at the
/// cost of one clone and one comparison per record.
pub struct OrderChecked<'c, K: OrderedCursor, C: ?Sized> {
    inner: K,
    cmp: &'c C,
    side: Side,
    last: Option<K::Record>,
}

impl<'c, K, C> OrderChecked<'c, K, C>
where
    K: OrderedCursor,
    C: Comparator<K::Record> + ?Sized,
{
    pub fn new(inner: K, cmp: &'c C, side: Side) -> Self {
        Self {
            inner,
            cmp,
            side,
            last: None,
        }
    }
}

impl<K, C> OrderedCursor for OrderChecked<'_, K, C>
where
    K: OrderedCursor,
    K::Record: Clone,
    C: Comparator<K::Record> + ?Sized,
{
    type Record = K::Record;
    type Error = K::Error;

    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next(&mut self) -> Result<K::Record, DiffError<K::Error>> {
        let record = self.inner.next()?;
        if let Some(last) = &self.last {
            if self.cmp.compare(last, &record) == Ordering::Greater {
                return Err(DiffError::OutOfOrder {
                    side: self.side,
                    index: self.inner.consumed(),
                });
            }
        }
        self.last = Some(record.clone());
        Ok(record)
    }

    fn consumed(&self) -> u64 {
        self.inner.consumed()
    }
}
