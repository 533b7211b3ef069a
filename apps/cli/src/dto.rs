//! Flat, JSON-friendly DTOs for the files and output the CLI writes.

use serde::{Deserialize, Serialize};
use vardiff_core::{Contig, DiffSummary, SequenceDictionary};

use crate::config::DifferenceConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub first: String,
    pub second: String,
    pub output: String,
    pub order: String,
    pub records_examined: u64,
    pub records_written: u64,
    pub records_suppressed: u64,
    pub second_records_read: u64,
    pub elapsed_seconds: f64,
}

impl SummaryReport {
    pub fn new(config: &DifferenceConfig, summary: &DiffSummary, elapsed_seconds: f64) -> Self {
        Self {
            first: config.first.display().to_string(),
            second: config.second.display().to_string(),
            output: config.output.display().to_string(),
            order: config.order.to_string(),
            records_examined: summary.examined,
            records_written: summary.emitted,
            records_suppressed: summary.suppressed,
            second_records_read: summary.subtrahend_consumed,
            elapsed_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigDto {
    pub index: usize,
    pub name: String,
    pub length: Option<u64>,
}

pub fn dictionary_to_dto(dictionary: &SequenceDictionary) -> Vec<ContigDto> {
    dictionary
        .iter()
        .enumerate()
        .map(|(index, contig)| contig_to_dto(index, contig))
        .collect()
}

fn contig_to_dto(index: usize, contig: &Contig) -> ContigDto {
    ContigDto {
        index,
        name: contig.name.clone(),
        length: contig.length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vardiff_core::VariantOrder;

    #[test]
    fn test_summary_report_uses_camel_case() {
        let mut config = DifferenceConfig::new("a.vcf", "b.vcf", "out.vcf");
        config.order = VariantOrder::LocusAlleles;
        let summary = DiffSummary {
            examined: 6,
            emitted: 4,
            suppressed: 2,
            subtrahend_consumed: 3,
        };
        let json = serde_json::to_value(SummaryReport::new(&config, &summary, 0.5)).unwrap();
        assert_eq!(json["order"], "locus-alleles");
        assert_eq!(json["recordsWritten"], 4);
        assert_eq!(json["secondRecordsRead"], 3);
    }

    #[test]
    fn test_dictionary_dto_keeps_rank() {
        let dict = SequenceDictionary::new(vec![
            Contig::new("chr1", Some(100)),
            Contig::new("chrM", None),
        ]);
        let dto = dictionary_to_dto(&dict);
        assert_eq!(dto[1].index, 1);
        assert_eq!(dto[1].name, "chrM");
        assert_eq!(dto[1].length, None);
    }
}
