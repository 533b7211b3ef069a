use std::path::Path;

use anyhow::{Context, Result};
use vardiff_formats::extract_dictionary;

use crate::dto::dictionary_to_dto;

/// Render the sequence dictionary of `path` as pretty-printed JSON.
pub fn run(path: &Path) -> Result<String> {
    let dictionary = extract_dictionary(path)
        .with_context(|| format!("Failed to read sequence dictionary from {}", path.display()))?;
    let json = serde_json::to_string_pretty(&dictionary_to_dto(&dictionary))?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ContigDto;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dictionary_json_from_vcf_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.vcf");
        std::fs::write(
            &path,
            "##fileformat=VCFv4.2\n##contig=<ID=chr1,length=1000>\n##contig=<ID=chrM>\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n",
        )
        .unwrap();

        let contigs: Vec<ContigDto> = serde_json::from_str(&run(&path).unwrap()).unwrap();
        assert_eq!(
            contigs,
            vec![
                ContigDto {
                    index: 0,
                    name: "chr1".to_string(),
                    length: Some(1000),
                },
                ContigDto {
                    index: 1,
                    name: "chrM".to_string(),
                    length: None,
                },
            ]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("nope.dict")).unwrap_err();
        assert!(err.to_string().contains("nope.dict"));
    }
}
