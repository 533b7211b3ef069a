use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vardiff_core::VariantOrder;

use crate::config::DifferenceConfig;

#[derive(Debug, Parser)]
#[command(name = "vardiff")]
#[command(about = "Outputs records present in the first VCF but not the second", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the records of FIRST that have no match in SECOND.
    /// Both files must be sorted in the same contig order.
    Difference(DifferenceArgs),

    /// Print the sequence dictionary of a .dict or VCF file as JSON
    Dictionary {
        /// Input file
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct DifferenceArgs {
    /// First VCF; the result is this file minus SECOND
    #[arg(short = 'a', long)]
    pub first: PathBuf,

    /// Second VCF; records matching it are removed from FIRST
    #[arg(short = 'b', long)]
    pub second: PathBuf,

    /// Output VCF
    #[arg(short, long)]
    pub output: PathBuf,

    /// Sequence dictionary (.dict or VCF) written to the output header
    #[arg(short = 's', long)]
    pub sequence_dictionary: Option<PathBuf>,

    /// Which fields make two records the same
    #[arg(long, value_enum, default_value_t = OrderArg::Locus)]
    pub order: OrderArg,

    /// Fail on the first out-of-order record instead of assuming sorted input
    #[arg(long)]
    pub check_order: bool,

    /// Log progress every N records written (0 disables)
    #[arg(long, default_value_t = 10_000, env = "VARDIFF_PROGRESS_INTERVAL")]
    pub progress_interval: u64,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl DifferenceArgs {
    pub fn to_config(&self) -> DifferenceConfig {
        DifferenceConfig {
            first: self.first.clone(),
            second: self.second.clone(),
            output: self.output.clone(),
            sequence_dictionary: self.sequence_dictionary.clone(),
            order: self.order.into(),
            check_order: self.check_order,
            progress_interval: self.progress_interval,
            summary: self.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Contig and position
    Locus,
    /// Contig, position, reference and alternate alleles; inputs must also
    /// be sorted by allele within each position
    LocusAlleles,
}

impl From<OrderArg> for VariantOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Locus => VariantOrder::Locus,
            OrderArg::LocusAlleles => VariantOrder::LocusAlleles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn difference_config(cli: &Cli) -> DifferenceConfig {
        match &cli.command {
            Commands::Difference(args) => args.to_config(),
            other => panic!("expected difference, got {:?}", other),
        }
    }

    #[test]
    fn test_difference_defaults() {
        let cli = Cli::try_parse_from([
            "vardiff", "difference", "-a", "a.vcf", "-b", "b.vcf", "-o", "out.vcf",
        ])
        .unwrap();
        let config = difference_config(&cli);
        assert_eq!(config.first, PathBuf::from("a.vcf"));
        assert_eq!(config.order, VariantOrder::Locus);
        assert!(!config.check_order);
        assert_eq!(config.sequence_dictionary, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_difference_options() {
        let cli = Cli::try_parse_from([
            "vardiff",
            "difference",
            "--first",
            "a.vcf",
            "--second",
            "b.vcf",
            "--output",
            "out.vcf",
            "--sequence-dictionary",
            "hg38.dict",
            "--order",
            "locus-alleles",
            "--check-order",
            "--progress-interval",
            "0",
            "--summary",
            "run.json",
            "-v",
        ])
        .unwrap();
        let config = difference_config(&cli);
        assert_eq!(config.order, VariantOrder::LocusAlleles);
        assert!(config.check_order);
        assert_eq!(config.progress_interval, 0);
        assert_eq!(config.summary, Some(PathBuf::from("run.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_required_input() {
        assert!(Cli::try_parse_from(["vardiff", "difference", "-a", "a.vcf", "-o", "o.vcf"]).is_err());
    }

    #[test]
    fn test_dictionary_command() {
        let cli = Cli::try_parse_from(["vardiff", "dictionary", "ref.dict"]).unwrap();
        assert!(matches!(cli.command, Commands::Dictionary { .. }));
    }
}
