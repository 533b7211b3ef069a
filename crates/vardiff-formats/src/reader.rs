use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use vardiff_core::{SequenceDictionary, Variant};

use crate::detect::{detect_format, detect_format_from_extension};
use crate::header::VcfHeader;
use crate::{FileFormat, FormatError};

/// Reader over a plain-text VCF file.
///
/// The header is read up front; data lines are parsed lazily by
/// [`VcfReader::records`].
pub struct VcfReader<R> {
    inner: R,
    header: VcfHeader,
    header_lines: u64,
}

impl VcfReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let mut inner = BufReader::new(File::open(path)?);

        let format = match detect_format(inner.fill_buf()?) {
            FileFormat::Unknown => detect_format_from_extension(&path.to_string_lossy()),
            format => format,
        };
        match format {
            FileFormat::Vcf => {}
            FileFormat::CompressedVcf | FileFormat::Bcf => {
                return Err(FormatError::Unsupported(format!(
                    "{} is {}; only plain-text VCF is read",
                    path.display(),
                    format
                )))
            }
            _ => {
                return Err(FormatError::InvalidHeader(format!(
                    "{} does not look like a VCF file",
                    path.display()
                )))
            }
        }

        tracing::debug!(path = %path.display(), "opening VCF");
        Self::from_reader(inner)
    }
}

impl<R: BufRead> VcfReader<R> {
    /// Read the header from `inner`, leaving it positioned at the first
    /// data line.
    pub fn from_reader(mut inner: R) -> Result<Self, FormatError> {
        let mut lines = Vec::new();
        let mut buf = String::new();
        loop {
            buf.clear();
            if inner.read_line(&mut buf)? == 0 {
                break;
            }
            let line = buf.trim_end_matches(['\r', '\n']).to_string();
            let is_columns = line.starts_with("#CHROM");
            lines.push(line);
            if is_columns {
                break;
            }
        }

        let header = VcfHeader::from_lines(lines.iter().map(String::as_str))?;
        if header.contigs().is_empty() {
            tracing::warn!("VCF header declares no contigs");
        }

        Ok(Self {
            inner,
            header_lines: lines.len() as u64,
            header,
        })
    }

    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Lazily parse data lines, ranking contigs by `dictionary`.
    ///
    /// The dictionary is normally the one the comparator was built from,
    /// not necessarily this file's own header.
    pub fn records(self, dictionary: &SequenceDictionary) -> VariantRecords<'_, R> {
        VariantRecords {
            inner: self.inner,
            dictionary,
            line_number: self.header_lines,
            buf: String::new(),
            done: false,
        }
    }
}

/// Iterator over the data lines of a VCF file.
pub struct VariantRecords<'d, R> {
    inner: R,
    dictionary: &'d SequenceDictionary,
    line_number: u64,
    buf: String,
    done: bool,
}

impl<R: BufRead> Iterator for VariantRecords<'_, R> {
    type Item = Result<Variant, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.buf.trim_end_matches(['\r', '\n']);
                    if line.is_empty() {
                        continue;
                    }
                    return Some(parse_record(line, self.line_number, self.dictionary));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

/// Parse one tab-separated data line.
///
/// Only the columns that take part in ordering are interpreted; the whole
/// line is kept in [`Variant::raw`].
pub fn parse_record(
    line: &str,
    line_number: u64,
    dictionary: &SequenceDictionary,
) -> Result<Variant, FormatError> {
    let invalid = |reason: String| FormatError::InvalidRecord {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = line.splitn(9, '\t').collect();
    if fields.len() < 8 {
        return Err(invalid(format!(
            "expected at least 8 tab-separated columns, found {}",
            fields.len()
        )));
    }

    let contig = fields[0];
    let contig_index = dictionary
        .index_of(contig)
        .ok_or_else(|| FormatError::UnknownContig {
            contig: contig.to_string(),
            line: line_number,
        })?;

    let position = fields[1]
        .parse::<u64>()
        .map_err(|_| invalid(format!("invalid position {:?}", fields[1])))?;

    let id = match fields[2] {
        "." | "" => None,
        id => Some(id.to_string()),
    };

    let reference = fields[3];
    if reference.is_empty() || reference == "." {
        return Err(invalid("missing reference allele".to_string()));
    }

    let alternates = match fields[4] {
        "." | "" => Vec::new(),
        alts => alts.split(',').map(str::to_string).collect(),
    };

    Ok(Variant {
        contig: contig.to_string(),
        contig_index,
        position,
        id,
        reference: reference.to_string(),
        alternates,
        raw: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vardiff_core::Contig;

    const VCF: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=chr1,length=1000>\n\
##contig=<ID=chr2,length=500>\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
chr1\t100\trs1\tA\tG\t50\tPASS\tDP=10\n\
\n\
chr2\t7\t.\tAT\tA,ATT\t.\t.\t.\n";

    fn dict() -> SequenceDictionary {
        SequenceDictionary::new(vec![
            Contig::new("chr1", Some(1000)),
            Contig::new("chr2", Some(500)),
        ])
    }

    #[test]
    fn test_read_records() {
        let reader = VcfReader::from_reader(VCF.as_bytes()).unwrap();
        assert_eq!(reader.header().contigs().len(), 2);
        let d = dict();
        let records: Vec<Variant> = reader.records(&d).collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].contig, "chr1");
        assert_eq!(records[0].position, 100);
        assert_eq!(records[0].id.as_deref(), Some("rs1"));
        assert_eq!(records[0].raw, "chr1\t100\trs1\tA\tG\t50\tPASS\tDP=10");

        assert_eq!(records[1].contig_index, 1);
        assert_eq!(records[1].id, None);
        assert_eq!(records[1].alternates, vec!["A", "ATT"]);
    }

    #[test]
    fn test_unknown_contig_reports_line() {
        let d = SequenceDictionary::new(vec![Contig::new("chr1", None)]);
        let reader = VcfReader::from_reader(VCF.as_bytes()).unwrap();
        let results: Vec<_> = reader.records(&d).collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(FormatError::UnknownContig { contig, line }) => {
                assert_eq!(contig, "chr2");
                assert_eq!(*line, 7);
            }
            other => panic!("expected unknown contig, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_record_errors() {
        let d = dict();
        assert!(matches!(
            parse_record("chr1\t100\t.\tA\tG", 3, &d),
            Err(FormatError::InvalidRecord { line: 3, .. })
        ));
        assert!(matches!(
            parse_record("chr1\tten\t.\tA\tG\t.\t.\t.", 4, &d),
            Err(FormatError::InvalidRecord { line: 4, .. })
        ));
        assert!(matches!(
            parse_record("chr1\t10\t.\t.\tG\t.\t.\t.", 5, &d),
            Err(FormatError::InvalidRecord { line: 5, .. })
        ));
    }

    #[test]
    fn test_open_rejects_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.vcf.gz");
        std::fs::write(&path, [0x1fu8, 0x8b, 0x08, 0x04, 0x00]).unwrap();
        assert!(matches!(
            VcfReader::open(&path),
            Err(FormatError::Unsupported(_))
        ));
    }

    #[test]
    fn test_open_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.vcf");
        std::fs::write(&path, VCF).unwrap();
        let reader = VcfReader::open(&path).unwrap();
        assert_eq!(reader.header().file_format(), Some("VCFv4.2"));
    }
}
