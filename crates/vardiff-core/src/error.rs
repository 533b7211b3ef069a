use std::convert::Infallible;

use thiserror::Error;

/// Returned when a cursor is asked for a record after it has run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("next() called on an exhausted cursor")]
pub struct ExhaustedError;

/// Which of the two input sequences a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The sequence records are kept from (A).
    Minuend,
    /// The sequence records are matched against (B).
    Subtrahend,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Minuend => write!(f, "first"),
            Side::Subtrahend => write!(f, "second"),
        }
    }
}

/// Failure of a single difference run.
///
/// `E` is the error type of the underlying record sources and `SE` that of
/// the sink. Both are carried through untouched so callers can match on
/// their own I/O errors. Cursors never touch a sink, so the errors they
/// raise use the default `SE = Infallible`.
#[derive(Debug, Error)]
pub enum DiffError<E, SE = Infallible> {
    #[error(transparent)]
    Exhausted(#[from] ExhaustedError),
    #[error("{side} sequence is not sorted: record {index} sorts before its predecessor")]
    OutOfOrder { side: Side, index: u64 },
    #[error(transparent)]
    Source(E),
    #[error(transparent)]
    Sink(SE),
}

impl<E> DiffError<E> {
    /// Re-type a cursor error for a run whose sink fails with `SE`.
    pub fn with_sink<SE>(self) -> DiffError<E, SE> {
        match self {
            DiffError::Exhausted(e) => DiffError::Exhausted(e),
            DiffError::OutOfOrder { side, index } => DiffError::OutOfOrder { side, index },
            DiffError::Source(e) => DiffError::Source(e),
            DiffError::Sink(never) => match never {},
        }
    }
}

/// The two inputs do not share an ordering domain, so a single comparator
/// cannot order both of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncompatibleOrderDomain {
    #[error("contig {name} is not present in the reference ordering")]
    MissingContig { name: String },
    #[error("contig {name} is at index {found} but the reference ordering places it at {expected}")]
    MisplacedContig {
        name: String,
        expected: usize,
        found: usize,
    },
}
