use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::Regex;
use vardiff_core::{Contig, SequenceDictionary};

use crate::detect::{detect_format, detect_format_from_extension};
use crate::reader::VcfReader;
use crate::{FileFormat, FormatError};

/// Parse the `@SQ` lines of a SAM-style `.dict` file.
pub fn parse_sam_dictionary(input: &str) -> Result<SequenceDictionary, FormatError> {
    let name_re = Regex::new(r"(?:^|\t)SN:([^\t]+)")
        .map_err(|e| FormatError::InvalidDictionary(e.to_string()))?;
    let length_re = Regex::new(r"(?:^|\t)LN:(\d+)")
        .map_err(|e| FormatError::InvalidDictionary(e.to_string()))?;

    let mut contigs = Vec::new();
    for (i, line) in input.lines().enumerate() {
        if !line.starts_with("@SQ") {
            continue;
        }

        let name = name_re
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                FormatError::InvalidDictionary(format!("@SQ line {} has no SN tag", i + 1))
            })?;
        let length = length_re
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok());

        contigs.push(Contig::new(name, length));
    }

    if contigs.is_empty() {
        return Err(FormatError::InvalidDictionary(
            "No @SQ lines found".to_string(),
        ));
    }

    Ok(SequenceDictionary::new(contigs))
}

/// Load a sequence dictionary from a `.dict` file or from the contig lines
/// of a VCF header.
pub fn extract_dictionary(path: impl AsRef<Path>) -> Result<SequenceDictionary, FormatError> {
    let path = path.as_ref();
    let format = match detect_format_from_extension(&path.to_string_lossy()) {
        FileFormat::Unknown => {
            let mut head = [0u8; 16];
            let n = File::open(path)?.read(&mut head)?;
            detect_format(&head[..n])
        }
        format => format,
    };

    let dictionary = match format {
        FileFormat::SequenceDictionary => {
            let text = std::fs::read_to_string(path)?;
            parse_sam_dictionary(&text)?
        }
        FileFormat::Vcf => VcfReader::open(path)?.header().dictionary(),
        FileFormat::CompressedVcf | FileFormat::Bcf => {
            return Err(FormatError::Unsupported(format!(
                "Cannot read a sequence dictionary from {} input {}",
                format,
                path.display()
            )))
        }
        FileFormat::Unknown => {
            return Err(FormatError::InvalidDictionary(format!(
                "Cannot tell what kind of file {} is",
                path.display()
            )))
        }
    };

    if dictionary.is_empty() {
        return Err(FormatError::InvalidDictionary(format!(
            "{} contains no contigs",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), contigs = dictionary.len(), "extracted sequence dictionary");
    Ok(dictionary)
}
