use crate::FileFormat;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Detect file format from the first bytes of its content
pub fn detect_format(content: &[u8]) -> FileFormat {
    if content.starts_with(GZIP_MAGIC) {
        FileFormat::CompressedVcf
    } else if content.starts_with(b"BCF") {
        FileFormat::Bcf
    } else if content.starts_with(b"##fileformat=VCF") {
        FileFormat::Vcf
    } else if content.starts_with(b"@HD") || content.starts_with(b"@SQ") {
        FileFormat::SequenceDictionary
    } else {
        FileFormat::Unknown
    }
}

/// Detect format from file extension
pub fn detect_format_from_extension(path: &str) -> FileFormat {
    let lower = path.to_lowercase();
    if lower.ends_with(".vcf") {
        FileFormat::Vcf
    } else if lower.ends_with(".vcf.gz") || lower.ends_with(".vcf.bgz") {
        FileFormat::CompressedVcf
    } else if lower.ends_with(".bcf") {
        FileFormat::Bcf
    } else if lower.ends_with(".dict") {
        FileFormat::SequenceDictionary
    } else {
        FileFormat::Unknown
    }
}
