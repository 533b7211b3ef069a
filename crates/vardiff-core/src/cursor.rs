use std::convert::Infallible;
use std::iter::Fuse;

use crate::error::{DiffError, ExhaustedError};

/// A forward-only, single-pass handle over an ordered sequence of records.
///
/// There is no seek and no rewind. Anything that needs to remember a record
/// after pulling it (the current A record, the cached ceiling) holds it
/// itself; the cursor only ever buffers the one record `has_next` fetched.
pub trait OrderedCursor {
    type Record;
    type Error;

    /// Whether another record (or source failure) is available.
    fn has_next(&mut self) -> bool;

    /// Take the next record.
    ///
    /// Fails with [`ExhaustedError`] when `has_next` would return false, and
    /// with [`DiffError::Source`] when the underlying source failed.
    fn next(&mut self) -> Result<Self::Record, DiffError<Self::Error>>;

    /// Number of records handed out so far.
    fn consumed(&self) -> u64;
}

impl<K: OrderedCursor + ?Sized> OrderedCursor for &mut K {
    type Record = K::Record;
    type Error = K::Error;

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next(&mut self) -> Result<Self::Record, DiffError<Self::Error>> {
        (**self).next()
    }

    fn consumed(&self) -> u64 {
        (**self).consumed()
    }
}

/// Cursor over any iterator of fallible records.
pub struct ForwardCursor<I: Iterator> {
    source: Fuse<I>,
    lookahead: Option<I::Item>,
    consumed: u64,
}

impl<I: Iterator> ForwardCursor<I> {
    pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            source: source.into_iter().fuse(),
            lookahead: None,
            consumed: 0,
        }
    }
}

impl<I: Iterator> ForwardCursor<Records<I>> {
    /// Wrap a source that cannot fail, e.g. an in-memory list.
    pub fn from_records(records: impl IntoIterator<IntoIter = I>) -> Self {
        Self::new(Records(records.into_iter()))
    }
}

impl<I, T, E> OrderedCursor for ForwardCursor<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Record = T;
    type Error = E;

    fn has_next(&mut self) -> bool {
        if self.lookahead.is_none() {
            self.lookahead = self.source.next();
        }
        self.lookahead.is_some()
    }

    fn next(&mut self) -> Result<T, DiffError<E>> {
        let item = match self.lookahead.take() {
            Some(item) => item,
            None => self.source.next().ok_or(ExhaustedError)?,
        };
        self.consumed += 1;
        item.map_err(DiffError::Source)
    }

    fn consumed(&self) -> u64 {
        self.consumed
    }
}

/// Adapts an infallible iterator to the `Result` items cursors expect.
pub struct Records<I>(I);

impl<I: Iterator> Iterator for Records<I> {
    type Item = Result<I::Item, Infallible>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
