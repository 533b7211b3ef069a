//! Streaming set difference ("A minus B") of two sorted record sequences.
//!
//! The engine is generic over the record type and takes the total order as
//! a [`Comparator`]. [`Variant`] and [`VariantOrder`] supply the genomic
//! instance of both.

pub mod ceiling;
pub mod checked;
pub mod cursor;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod order;
pub mod variant;

pub use ceiling::seek_ceiling;
pub use checked::OrderChecked;
pub use cursor::{ForwardCursor, OrderedCursor, Records};
pub use dictionary::{Contig, SequenceDictionary};
pub use engine::{difference, difference_to_vec, DiffSummary, Difference, Sink};
pub use error::{DiffError, ExhaustedError, IncompatibleOrderDomain, Side};
pub use order::{natural, Comparator};
pub use variant::{Variant, VariantOrder};
