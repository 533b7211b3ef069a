pub mod detect;
pub mod dict;
pub mod header;
pub mod reader;
pub mod writer;

use thiserror::Error;
use vardiff_core::IncompatibleOrderDomain;

pub use dict::{extract_dictionary, parse_sam_dictionary};
pub use header::VcfHeader;
pub use reader::{parse_record, VariantRecords, VcfReader};
pub use writer::{VcfFileWriter, VcfWriter};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
    #[error("Contig {contig} at line {line} is not in the sequence dictionary")]
    UnknownContig { contig: String, line: u64 },
    #[error("Invalid sequence dictionary: {0}")]
    InvalidDictionary(String),
    #[error("Unsupported input: {0}")]
    Unsupported(String),
    #[error(transparent)]
    IncompatibleContigs(#[from] IncompatibleOrderDomain),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Vcf,
    /// gzip or BGZF wrapped, most likely `.vcf.gz`.
    CompressedVcf,
    Bcf,
    SequenceDictionary,
    Unknown,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Vcf => write!(f, "VCF"),
            FileFormat::CompressedVcf => write!(f, "compressed VCF"),
            FileFormat::Bcf => write!(f, "BCF"),
            FileFormat::SequenceDictionary => write!(f, "sequence dictionary"),
            FileFormat::Unknown => write!(f, "unknown"),
        }
    }
}
