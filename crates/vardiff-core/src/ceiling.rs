use std::cmp::Ordering;

use crate::cursor::OrderedCursor;
use crate::error::DiffError;
use crate::order::Comparator;

/// Find the smallest remaining record of `cursor` that is not less than
/// `target`.
///
/// `prior` is the ceiling found for the previous target. While it still
/// covers `target` it is returned as is and the cursor is left alone;
/// otherwise the cursor is advanced until a record `>= target` shows up.
/// Records skipped on the way are dropped for good. Because the cursor is
/// sorted, the first such record is the true ceiling and nothing behind it
/// is ever needed again.
///
/// Returns `None` once the cursor is exhausted without reaching `target`.
pub fn seek_ceiling<K, C>(
    target: &K::Record,
    cursor: &mut K,
    cmp: &C,
    prior: Option<K::Record>,
) -> Result<Option<K::Record>, DiffError<K::Error>>
where
    K: OrderedCursor + ?Sized,
    C: Comparator<K::Record> + ?Sized,
{
    if let Some(ceiling) = prior {
        if cmp.compare(target, &ceiling) != Ordering::Greater {
            return Ok(Some(ceiling));
        }
    }

    while cursor.has_next() {
        let candidate = cursor.next()?;
        if cmp.compare(target, &candidate) != Ordering::Greater {
            tracing::trace!(consumed = cursor.consumed(), "ceiling advanced");
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}
