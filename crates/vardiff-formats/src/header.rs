use nom::{
    branch::alt,
    bytes::complete::{escaped, is_not, take_till, take_till1},
    character::complete::{char, one_of},
    combinator::{map, opt},
    multi::separated_list0,
    sequence::{delimited, separated_pair},
    IResult,
};
use vardiff_core::{Contig, SequenceDictionary};

use crate::FormatError;

const CONTIG_PREFIX: &str = "##contig=";
const COLUMNS_PREFIX: &str = "#CHROM";
const FIXED_COLUMNS: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

/// A `##` line, kept verbatim so it can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetaLine {
    Contig { contig: Contig, raw: String },
    Other(String),
}

impl MetaLine {
    fn raw(&self) -> &str {
        match self {
            MetaLine::Contig { raw, .. } => raw,
            MetaLine::Other(raw) => raw,
        }
    }
}

/// The header of a VCF file: `##` meta lines plus the `#CHROM` column line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfHeader {
    meta: Vec<MetaLine>,
    columns: String,
}

impl VcfHeader {
    /// Parse a complete header, meta lines first and `#CHROM` last.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        Self::from_lines(input.lines())
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self, FormatError> {
        let mut meta = Vec::new();
        let mut columns = None;

        for line in lines {
            let line = line.trim_end_matches(['\r', '\n']);
            if line.starts_with(COLUMNS_PREFIX) {
                columns = Some(line.to_string());
                break;
            } else if line.starts_with(CONTIG_PREFIX) {
                let contig = parse_contig_line(line)?;
                meta.push(MetaLine::Contig {
                    contig,
                    raw: line.to_string(),
                });
            } else if line.starts_with("##") {
                meta.push(MetaLine::Other(line.to_string()));
            } else if line.is_empty() {
                continue;
            } else {
                return Err(FormatError::InvalidHeader(format!(
                    "Expected a meta line or {}, found: {}",
                    COLUMNS_PREFIX, line
                )));
            }
        }

        match meta.first() {
            Some(MetaLine::Other(first)) if first.starts_with("##fileformat=VCF") => {}
            _ => {
                return Err(FormatError::InvalidHeader(
                    "Missing ##fileformat=VCF line".to_string(),
                ))
            }
        }

        let columns = columns.ok_or_else(|| {
            FormatError::InvalidHeader(format!("Missing {} column line", COLUMNS_PREFIX))
        })?;
        if !columns.starts_with(FIXED_COLUMNS) {
            return Err(FormatError::InvalidHeader(format!(
                "Malformed column line: {}",
                columns
            )));
        }

        Ok(Self { meta, columns })
    }

    /// The VCF version string, e.g. `VCFv4.2`.
    pub fn file_format(&self) -> Option<&str> {
        self.meta
            .first()
            .and_then(|m| m.raw().strip_prefix("##fileformat="))
    }

    pub fn contigs(&self) -> Vec<Contig> {
        self.meta
            .iter()
            .filter_map(|m| match m {
                MetaLine::Contig { contig, .. } => Some(contig.clone()),
                MetaLine::Other(_) => None,
            })
            .collect()
    }

    /// The contig order this header declares.
    pub fn dictionary(&self) -> SequenceDictionary {
        self.contigs().into_iter().collect()
    }

    pub fn samples(&self) -> Vec<&str> {
        self.columns.split('\t').skip(9).collect()
    }

    /// Copy of this header whose contig lines come from `dictionary`.
    ///
    /// The new lines take the place of the first existing contig line, or
    /// go after the other meta lines if there were none.
    pub fn with_dictionary(&self, dictionary: &SequenceDictionary) -> Self {
        let replacement: Vec<MetaLine> = dictionary
            .iter()
            .map(|contig| MetaLine::Contig {
                contig: contig.clone(),
                raw: render_contig_line(contig),
            })
            .collect();

        let insert_at = self
            .meta
            .iter()
            .position(|m| matches!(m, MetaLine::Contig { .. }));
        let mut meta: Vec<MetaLine> = self
            .meta
            .iter()
            .filter(|m| matches!(m, MetaLine::Other(_)))
            .cloned()
            .collect();
        let at = insert_at.unwrap_or(meta.len()).min(meta.len());
        meta.splice(at..at, replacement);

        Self {
            meta,
            columns: self.columns.clone(),
        }
    }

    /// Append a meta line recording which command produced the file.
    pub fn add_provenance(&mut self, command_line: &str) {
        let date = chrono::Utc::now().format("%a %b %d %H:%M:%S UTC %Y");
        self.meta.push(MetaLine::Other(format!(
            "##vardiffCommand=<ID=difference,Version=\"{}\",Date=\"{}\",CommandLine=\"{}\">",
            env!("CARGO_PKG_VERSION"),
            date,
            command_line.replace('"', "\\\"")
        )));
    }

    /// Serialize back to text, one line per entry, newline terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.meta {
            out.push_str(line.raw());
            out.push('\n');
        }
        out.push_str(&self.columns);
        out.push('\n');
        out
    }
}

fn render_contig_line(contig: &Contig) -> String {
    match contig.length {
        Some(length) => format!("{}<ID={},length={}>", CONTIG_PREFIX, contig.name, length),
        None => format!("{}<ID={}>", CONTIG_PREFIX, contig.name),
    }
}

/// Parse `##contig=<ID=chr1,length=248956422,...>`.
pub fn parse_contig_line(line: &str) -> Result<Contig, FormatError> {
    let body = line
        .strip_prefix(CONTIG_PREFIX)
        .ok_or_else(|| FormatError::InvalidHeader(format!("Not a contig line: {}", line)))?;

    let (rest, fields) = structured_fields(body.trim_end())
        .map_err(|e| FormatError::InvalidHeader(format!("Malformed contig line {}: {}", line, e)))?;
    if !rest.is_empty() {
        return Err(FormatError::InvalidHeader(format!(
            "Trailing text after contig line: {}",
            line
        )));
    }

    let name = fields
        .iter()
        .find(|(key, _)| *key == "ID")
        .map(|(_, value)| value.to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FormatError::InvalidHeader(format!("Contig line without ID: {}", line)))?;

    let length = match fields.iter().find(|(key, _)| *key == "length") {
        Some((_, value)) => Some(value.parse::<u64>().map_err(|_| {
            FormatError::InvalidHeader(format!("Invalid contig length {:?} in {}", value, line))
        })?),
        None => None,
    };

    Ok(Contig::new(name, length))
}

fn quoted_value(input: &str) -> IResult<&str, &str> {
    delimited(
        char('"'),
        map(opt(escaped(is_not("\\\""), '\\', one_of("\"\\"))), |v| {
            v.unwrap_or("")
        }),
        char('"'),
    )(input)
}

fn bare_value(input: &str) -> IResult<&str, &str> {
    take_till(|c| c == ',' || c == '>')(input)
}

fn key_value(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_till1(|c| c == '=' || c == ',' || c == '>'),
        char('='),
        alt((quoted_value, bare_value)),
    )(input)
}

fn structured_fields(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    delimited(char('<'), separated_list0(char(','), key_value), char('>'))(input)
}
