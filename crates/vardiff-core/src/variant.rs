use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::order::Comparator;

/// One variant record.
///
/// `contig_index` is the contig's rank in the sequence dictionary the
/// record was read against; ordering uses it rather than the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub contig: String,
    pub contig_index: usize,
    /// 1-based position of the first reference base.
    pub position: u64,
    #[serde(default)]
    pub id: Option<String>,
    pub reference: String,
    #[serde(default)]
    pub alternates: Vec<String>,
    /// The record as it appeared in its source, written back unchanged.
    #[serde(skip)]
    pub raw: String,
}

impl Variant {
    pub fn new(
        contig: impl Into<String>,
        contig_index: usize,
        position: u64,
        reference: impl Into<String>,
        alternates: Vec<String>,
    ) -> Self {
        Self {
            contig: contig.into(),
            contig_index,
            position,
            id: None,
            reference: reference.into(),
            alternates,
            raw: String::new(),
        }
    }

    /// `contig:position`, as used in log lines.
    pub fn locus(&self) -> String {
        format!("{}:{}", self.contig, self.position)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}>", self.contig, self.position, self.reference)?;
        if self.alternates.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.alternates.join(","))
        }
    }
}

/// Total orders over [`Variant`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantOrder {
    /// Contig rank, then position. Records at the same locus are equal.
    ///
    /// This is the order coordinate-sorted VCFs are written in, so it is
    /// the only one their sortedness guarantees.
    #[default]
    Locus,
    /// Contig rank, position, reference allele, then alternate alleles.
    ///
    /// Both inputs must also be sorted by allele within each position.
    LocusAlleles,
}

impl Comparator<Variant> for VariantOrder {
    fn compare(&self, left: &Variant, right: &Variant) -> Ordering {
        let locus = left
            .contig_index
            .cmp(&right.contig_index)
            .then(left.position.cmp(&right.position));
        match self {
            VariantOrder::Locus => locus,
            VariantOrder::LocusAlleles => locus
                .then_with(|| left.reference.cmp(&right.reference))
                .then_with(|| left.alternates.cmp(&right.alternates)),
        }
    }
}

impl std::fmt::Display for VariantOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantOrder::Locus => write!(f, "locus"),
            VariantOrder::LocusAlleles => write!(f, "locus-alleles"),
        }
    }
}
