use std::path::PathBuf;

use serde::Serialize;
use vardiff_core::VariantOrder;

/// Resolved options for one `difference` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifferenceConfig {
    pub first: PathBuf,
    pub second: PathBuf,
    pub output: PathBuf,
    pub sequence_dictionary: Option<PathBuf>,
    pub order: VariantOrder,
    pub check_order: bool,
    pub progress_interval: u64,
    pub summary: Option<PathBuf>,
}

impl DifferenceConfig {
    pub fn new(first: impl Into<PathBuf>, second: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            output: output.into(),
            sequence_dictionary: None,
            order: VariantOrder::default(),
            check_order: false,
            progress_interval: 10_000,
            summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serializes_for_logging() {
        let config = DifferenceConfig::new("a.vcf", "b.vcf", "out.vcf");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["first"], "a.vcf");
        assert_eq!(json["order"], "locus");
        assert_eq!(json["sequence_dictionary"], serde_json::Value::Null);
    }
}
