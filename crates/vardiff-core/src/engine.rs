use std::cmp::Ordering;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::ceiling::seek_ceiling;
use crate::cursor::OrderedCursor;
use crate::error::DiffError;
use crate::order::Comparator;

/// Destination for the records a difference run keeps.
pub trait Sink<T> {
    type Error;

    fn accept(&mut self, record: T) -> Result<(), Self::Error>;
}

impl<T> Sink<T> for Vec<T> {
    type Error = Infallible;

    fn accept(&mut self, record: T) -> Result<(), Infallible> {
        self.push(record);
        Ok(())
    }
}

impl<T, S: Sink<T> + ?Sized> Sink<T> for &mut S {
    type Error = S::Error;

    fn accept(&mut self, record: T) -> Result<(), Self::Error> {
        (**self).accept(record)
    }
}

/// Counters for one difference run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Records read from the first sequence.
    pub examined: u64,
    /// Records passed to the sink.
    pub emitted: u64,
    /// Records matched by the second sequence and dropped.
    pub suppressed: u64,
    /// Records read from the second sequence.
    pub subtrahend_consumed: u64,
}

/// Inclusion rule: keep `record` unless the ceiling is order-equal to it.
///
/// A missing ceiling means the second sequence has nothing left at or
/// after `record`.
fn is_unmatched<T, C>(record: &T, ceiling: Option<&T>, cmp: &C) -> bool
where
    C: Comparator<T> + ?Sized,
{
    match ceiling {
        None => true,
        Some(ceiling) => cmp.compare(record, ceiling) == Ordering::Less,
    }
}

/// Write every record of `minuend` that has no order-equal record in
/// `subtrahend` to `sink`, in `minuend` order.
///
/// Both cursors must be sorted under `cmp`. This is an existence test, not
/// a multiset subtraction: any number of equal records in `minuend` are all
/// dropped by a single equal record in `subtrahend`.
///
/// Nothing written to the sink before a failure is taken back.
pub fn difference<A, B, C, S>(
    minuend: &mut A,
    subtrahend: &mut B,
    cmp: &C,
    sink: &mut S,
) -> Result<DiffSummary, DiffError<A::Error, S::Error>>
where
    A: OrderedCursor + ?Sized,
    B: OrderedCursor<Record = A::Record, Error = A::Error> + ?Sized,
    C: Comparator<A::Record> + ?Sized,
    S: Sink<A::Record> + ?Sized,
{
    let mut summary = DiffSummary::default();
    let mut ceiling: Option<A::Record> = None;

    while minuend.has_next() {
        let record = minuend.next().map_err(DiffError::with_sink)?;
        summary.examined += 1;

        ceiling = seek_ceiling(&record, subtrahend, cmp, ceiling).map_err(DiffError::with_sink)?;

        if is_unmatched(&record, ceiling.as_ref(), cmp) {
            sink.accept(record).map_err(DiffError::Sink)?;
            summary.emitted += 1;
        } else {
            summary.suppressed += 1;
        }
    }

    summary.subtrahend_consumed = subtrahend.consumed();
    tracing::debug!(
        examined = summary.examined,
        emitted = summary.emitted,
        suppressed = summary.suppressed,
        subtrahend_consumed = summary.subtrahend_consumed,
        "difference complete"
    );
    Ok(summary)
}

/// Collect the difference of two cursors into a `Vec`.
pub fn difference_to_vec<A, B, C>(
    mut minuend: A,
    mut subtrahend: B,
    cmp: &C,
) -> Result<Vec<A::Record>, DiffError<A::Error>>
where
    A: OrderedCursor,
    B: OrderedCursor<Record = A::Record, Error = A::Error>,
    C: Comparator<A::Record> + ?Sized,
{
    let mut kept = Vec::new();
    difference(&mut minuend, &mut subtrahend, cmp, &mut kept)?;
    Ok(kept)
}

/// Pull-based form of [`difference`].
///
/// Each call to `next` reads ahead in the first sequence until it finds a
/// record to keep. Dropping the iterator early simply stops the run; the
/// cursors are left wherever it got to.
pub struct Difference<A, B, C>
where
    A: OrderedCursor,
{
    minuend: A,
    subtrahend: B,
    cmp: C,
    ceiling: Option<A::Record>,
    summary: DiffSummary,
    failed: bool,
}

impl<A, B, C> Difference<A, B, C>
where
    A: OrderedCursor,
    B: OrderedCursor<Record = A::Record, Error = A::Error>,
    C: Comparator<A::Record>,
{
    pub fn new(minuend: A, subtrahend: B, cmp: C) -> Self {
        Self {
            minuend,
            subtrahend,
            cmp,
            ceiling: None,
            summary: DiffSummary::default(),
            failed: false,
        }
    }

    /// Counters for the records pulled so far.
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            subtrahend_consumed: self.subtrahend.consumed(),
            ..self.summary
        }
    }

    fn step(&mut self) -> Result<Option<A::Record>, DiffError<A::Error>> {
        while self.minuend.has_next() {
            let record = self.minuend.next()?;
            self.summary.examined += 1;

            let ceiling = seek_ceiling(
                &record,
                &mut self.subtrahend,
                &self.cmp,
                self.ceiling.take(),
            )?;
            let keep = is_unmatched(&record, ceiling.as_ref(), &self.cmp);
            self.ceiling = ceiling;

            if keep {
                self.summary.emitted += 1;
                return Ok(Some(record));
            }
            self.summary.suppressed += 1;
        }
        Ok(None)
    }
}

impl<A, B, C> Iterator for Difference<A, B, C>
where
    A: OrderedCursor,
    B: OrderedCursor<Record = A::Record, Error = A::Error>,
    C: Comparator<A::Record>,
{
    type Item = Result<A::Record, DiffError<A::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ForwardCursor;
    use crate::order::natural;
    use pretty_assertions::assert_eq;

    fn diff(a: Vec<i32>, b: Vec<i32>) -> Vec<i32> {
        difference_to_vec(
            ForwardCursor::from_records(a),
            ForwardCursor::from_records(b),
            &natural,
        )
        .unwrap()
    }

    #[test]
    fn test_interleaved() {
        assert_eq!(diff(vec![1, 3, 5, 7], vec![3, 6, 7]), vec![1, 5]);
    }

    #[test]
    fn test_empty_subtrahend_keeps_everything() {
        assert_eq!(diff(vec![2, 4], vec![]), vec![2, 4]);
    }

    #[test]
    fn test_empty_minuend() {
        assert_eq!(diff(vec![], vec![1, 2, 3]), Vec::<i32>::new());
    }

    #[test]
    fn test_duplicates_all_suppressed_by_one_match() {
        assert_eq!(diff(vec![4, 4], vec![4]), Vec::<i32>::new());
        assert_eq!(diff(vec![1, 4, 4, 4, 9], vec![4]), vec![1, 9]);
    }

    #[test]
    fn test_subtrahend_beyond_minuend() {
        assert_eq!(diff(vec![1, 2], vec![5, 6, 7]), vec![1, 2]);
        assert_eq!(diff(vec![8, 9], vec![1, 2, 3]), vec![8, 9]);
    }

    #[test]
    fn test_summary_counts() {
        let mut a = ForwardCursor::from_records(vec![1, 3, 5, 7]);
        let mut b = ForwardCursor::from_records(vec![3, 6, 7, 10, 11]);
        let mut kept = Vec::new();
        let summary = difference(&mut a, &mut b, &natural, &mut kept).unwrap();
        assert_eq!(
            summary,
            DiffSummary {
                examined: 4,
                emitted: 2,
                suppressed: 2,
                subtrahend_consumed: 3,
            }
        );
        // The tail of B past the last A record is never read.
        assert!(b.has_next());
    }

    #[test]
    fn test_custom_comparator_defines_equality() {
        // Records are equal when they share a key, whatever the payload.
        let by_key = |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0);
        let kept = difference_to_vec(
            ForwardCursor::from_records(vec![(1, 'a'), (2, 'b'), (2, 'c'), (3, 'd')]),
            ForwardCursor::from_records(vec![(2, 'z')]),
            &by_key,
        )
        .unwrap();
        assert_eq!(kept, vec![(1, 'a'), (3, 'd')]);
    }

    #[test]
    fn test_source_error_stops_run_and_keeps_prior_output() {
        let a: Vec<Result<i32, String>> = vec![Ok(1), Ok(2), Err("truncated".to_string()), Ok(9)];
        let b: Vec<Result<i32, String>> = vec![Ok(2)];
        let mut kept = Vec::new();
        let result = difference(
            &mut ForwardCursor::new(a),
            &mut ForwardCursor::new(b),
            &natural,
            &mut kept,
        );
        match result {
            Err(DiffError::Source(msg)) => assert_eq!(msg, "truncated"),
            other => panic!("expected source error, got {:?}", other),
        }
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn test_fallible_sources_collect_into_vec() {
        let a: Vec<Result<i32, String>> = vec![Ok(1), Ok(4), Ok(6)];
        let b: Vec<Result<i32, String>> = vec![Ok(4)];
        let kept = difference_to_vec(ForwardCursor::new(a), ForwardCursor::new(b), &natural).unwrap();
        assert_eq!(kept, vec![1, 6]);
    }

    #[test]
    fn test_sink_error_is_reported_as_sink() {
        struct Full;
        impl Sink<i32> for Full {
            type Error = String;
            fn accept(&mut self, _record: i32) -> Result<(), String> {
                Err("no space left".to_string())
            }
        }

        let a: Vec<Result<i32, String>> = vec![Ok(1)];
        let b: Vec<Result<i32, String>> = vec![];
        let result = difference(
            &mut ForwardCursor::new(a),
            &mut ForwardCursor::new(b),
            &natural,
            &mut Full,
        );
        assert!(matches!(result, Err(DiffError::Sink(ref msg)) if msg == "no space left"));
    }

    #[test]
    fn test_iterator_matches_push_driver() {
        let a = vec![1, 1, 2, 3, 5, 8, 13, 21];
        let b = vec![1, 3, 4, 8, 20];
        let pulled: Vec<i32> = Difference::new(
            ForwardCursor::from_records(a.clone()),
            ForwardCursor::from_records(b.clone()),
            natural,
        )
        .collect::<Result<_, _>>()
        .unwrap();
        assert_eq!(pulled, diff(a, b));
    }

    #[test]
    fn test_iterator_can_stop_early() {
        let mut iter = Difference::new(
            ForwardCursor::from_records(1..),
            ForwardCursor::from_records((0..).map(|n| n * 2)),
            natural,
        );
        let first: Vec<i32> = iter.by_ref().take(3).map(Result::unwrap).collect();
        assert_eq!(first, vec![1, 3, 5]);
        let summary = iter.summary();
        assert_eq!(summary.emitted, 3);
        assert_eq!(summary.suppressed, 2);
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let a: Vec<Result<i32, String>> = vec![Err("bad header".to_string()), Ok(1)];
        let b: Vec<Result<i32, String>> = vec![];
        let mut iter = Difference::new(ForwardCursor::new(a), ForwardCursor::new(b), natural);
        assert!(matches!(iter.next(), Some(Err(DiffError::Source(_)))));
        assert!(iter.next().is_none());
    }
}
