use std::time::Instant;

use anyhow::{bail, Context, Result};
use vardiff_core::{difference, DiffSummary, ForwardCursor, OrderChecked, SequenceDictionary, Side};
use vardiff_formats::{extract_dictionary, VcfFileWriter, VcfReader};

use crate::config::DifferenceConfig;
use crate::dto::SummaryReport;
use crate::progress::ProgressSink;

/// Write the records of `config.first` with no match in `config.second`
/// to `config.output`.
///
/// `command_line` is recorded in the output header.
pub fn run(config: &DifferenceConfig, command_line: &str) -> Result<DiffSummary> {
    let started = Instant::now();
    tracing::debug!(config = ?config, "starting difference");

    let override_dictionary = config
        .sequence_dictionary
        .as_ref()
        .map(|path| {
            extract_dictionary(path)
                .with_context(|| format!("Failed to read sequence dictionary {}", path.display()))
        })
        .transpose()?;

    let first = VcfReader::open(&config.first)
        .with_context(|| format!("Failed to open {}", config.first.display()))?;
    let dictionary = order_domain(first.header().dictionary(), override_dictionary.as_ref())
        .with_context(|| format!("Cannot order the records of {}", config.first.display()))?;

    let second = VcfReader::open(&config.second)
        .with_context(|| format!("Failed to open {}", config.second.display()))?;
    dictionary
        .check_compatible(&second.header().contigs())
        .with_context(|| {
            format!(
                "{} and {} do not share a contig order",
                config.first.display(),
                config.second.display()
            )
        })?;

    let mut header = match &override_dictionary {
        Some(replacement) => first.header().with_dictionary(replacement),
        None => first.header().clone(),
    };
    header.add_provenance(command_line);

    let mut writer = VcfFileWriter::create(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;
    writer.write_header(&header)?;
    let mut sink = ProgressSink::new(writer, config.progress_interval);

    let mut a = ForwardCursor::new(first.records(&dictionary));
    let mut b = ForwardCursor::new(second.records(&dictionary));
    let order = config.order;
    let outcome = if config.check_order {
        let mut a = OrderChecked::new(&mut a, &order, Side::Minuend);
        let mut b = OrderChecked::new(&mut b, &order, Side::Subtrahend);
        difference(&mut a, &mut b, &order, &mut sink)
    } else {
        difference(&mut a, &mut b, &order, &mut sink)
    };
    let summary = outcome.with_context(|| {
        format!(
            "Failed to subtract {} from {}",
            config.second.display(),
            config.first.display()
        )
    })?;

    let written = sink
        .finish()
        .finish()
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    tracing::info!(
        output = %config.output.display(),
        examined = summary.examined,
        written,
        suppressed = summary.suppressed,
        "difference complete"
    );

    if let Some(path) = &config.summary {
        let report = SummaryReport::new(config, &summary, started.elapsed().as_secs_f64());
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
    }

    Ok(summary)
}

/// The dictionary records are ranked by: the first file's own contigs, or
/// the override when the first file declares none.
fn order_domain(
    own: SequenceDictionary,
    override_dictionary: Option<&SequenceDictionary>,
) -> Result<SequenceDictionary> {
    if own.is_empty() {
        return match override_dictionary {
            Some(replacement) => Ok(replacement.clone()),
            None => bail!("no contig lines in the header and no sequence dictionary given"),
        };
    }

    if let Some(replacement) = override_dictionary {
        if let Err(e) = replacement.check_compatible(own.contigs()) {
            tracing::warn!(error = %e, "sequence dictionary does not match the input contig order");
        }
    }
    Ok(own)
}
