use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use vardiff_core::{Sink, Variant};

use crate::header::VcfHeader;
use crate::FormatError;

/// Writes a VCF header followed by records to any `Write`.
pub struct VcfWriter<W: Write> {
    inner: W,
    records_written: u64,
}

impl<W: Write> VcfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
        }
    }

    pub fn write_header(&mut self, header: &VcfHeader) -> Result<(), FormatError> {
        self.inner.write_all(header.render().as_bytes())?;
        Ok(())
    }

    /// Write a record. Records read from a file go out exactly as they came
    /// in; records built in code get the eight fixed columns.
    pub fn write_record(&mut self, variant: &Variant) -> Result<(), FormatError> {
        if variant.raw.is_empty() {
            let alternates = if variant.alternates.is_empty() {
                ".".to_string()
            } else {
                variant.alternates.join(",")
            };
            writeln!(
                self.inner,
                "{}\t{}\t{}\t{}\t{}\t.\t.\t.",
                variant.contig,
                variant.position,
                variant.id.as_deref().unwrap_or("."),
                variant.reference,
                alternates
            )?;
        } else {
            self.inner.write_all(variant.raw.as_bytes())?;
            self.inner.write_all(b"\n")?;
        }
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W, FormatError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Sink<Variant> for VcfWriter<W> {
    type Error = FormatError;

    fn accept(&mut self, record: Variant) -> Result<(), FormatError> {
        self.write_record(&record)
    }
}

/// File-backed writer that only replaces `target` once the output is
/// complete.
///
/// Everything goes to `<target>.partial` first. [`VcfFileWriter::finish`]
/// flushes it to disk and renames it over `target`. If the run fails
/// before that, the partial file is left behind and `target` is untouched.
pub struct VcfFileWriter {
    writer: VcfWriter<BufWriter<File>>,
    partial: PathBuf,
    target: PathBuf,
}

impl VcfFileWriter {
    pub fn create(target: impl AsRef<Path>) -> Result<Self, FormatError> {
        let target = target.as_ref().to_path_buf();
        let partial = partial_path(&target);
        let file = File::create(&partial)?;
        tracing::debug!(partial = %partial.display(), "writing output");
        Ok(Self {
            writer: VcfWriter::new(BufWriter::new(file)),
            partial,
            target,
        })
    }

    pub fn write_header(&mut self, header: &VcfHeader) -> Result<(), FormatError> {
        self.writer.write_header(header)
    }

    /// Sync the partial file and move it into place. Returns the number of
    /// records written.
    pub fn finish(self) -> Result<u64, FormatError> {
        let written = self.writer.records_written();
        let buffered = self.writer.into_inner()?;
        let file = buffered.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&self.partial, &self.target)?;
        tracing::debug!(target = %self.target.display(), records = written, "output committed");
        Ok(written)
    }
}

impl Sink<Variant> for VcfFileWriter {
    type Error = FormatError;

    fn accept(&mut self, record: Variant) -> Result<(), FormatError> {
        self.writer.write_record(&record)
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=1>\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

    #[test]
    fn test_raw_records_pass_through() {
        let header = VcfHeader::parse(HEADER).unwrap();
        let mut writer = VcfWriter::new(Vec::new());
        writer.write_header(&header).unwrap();

        let mut v = Variant::new("1", 0, 10, "C", vec!["T".to_string()]);
        v.raw = "1\t10\trs9\tC\tT\t99\tPASS\tAF=0.5".to_string();
        writer.accept(v).unwrap();
        assert_eq!(writer.records_written(), 1);

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, format!("{}1\t10\trs9\tC\tT\t99\tPASS\tAF=0.5\n", HEADER));
    }

    #[test]
    fn test_constructed_record_gets_fixed_columns() {
        let mut writer = VcfWriter::new(Vec::new());
        writer
            .write_record(&Variant::new("1", 0, 5, "G", Vec::new()))
            .unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "1\t5\t.\tG\t.\t.\t.\t.\n");
    }

    #[test]
    fn test_file_writer_commits_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.vcf");
        let header = VcfHeader::parse(HEADER).unwrap();

        let mut writer = VcfFileWriter::create(&target).unwrap();
        writer.write_header(&header).unwrap();
        writer
            .accept(Variant::new("1", 0, 7, "A", vec!["C".to_string()]))
            .unwrap();
        assert!(!target.exists());
        assert!(dir.path().join("out.vcf.partial").exists());

        assert_eq!(writer.finish().unwrap(), 1);
        assert!(target.exists());
        assert!(!dir.path().join("out.vcf.partial").exists());
        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.ends_with("1\t7\t.\tA\tC\t.\t.\t.\n"));
    }
}
