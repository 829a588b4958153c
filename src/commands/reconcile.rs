//! Reconcile two datasets and render the report

use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::Context;
use log::info;

use reconciler::adapters::writers::WriterOptions;
use reconciler::adapters::{CsvDataset, CsvOptions};
use reconciler::config::AppConfig;
use reconciler::core::models::Dataset;
use reconciler::core::ports::DatasetSource;
use reconciler::core::services::DuplicatePolicy;
use reconciler::output::Status;
use reconciler::registry::{ReconcilerRegistry, WriterRegistry};

use crate::cli::Cli;

/// Run one reconciliation from the parsed command line
pub fn reconcile(cli: &Cli, status: &Status) -> anyhow::Result<()> {
    let (Some(source_path), Some(target_path)) = (cli.source.as_deref(), cli.target.as_deref())
    else {
        anyhow::bail!("both SOURCE and TARGET are required");
    };

    let config = effective_config(cli)?;

    // Resolve writer and reconciler before loading any data
    let color = cli.output.is_none() && io::stdout().is_terminal();
    let writer = WriterRegistry::with_builtin().create(&config.writer, WriterOptions { color })?;
    let engine = ReconcilerRegistry::with_builtin().create(&config.reconciler, &config.reconcile)?;

    let options = CsvOptions {
        delimiter: config.delimiter_byte()?,
        skip_malformed: config.skip_malformed,
    };
    status.info(format!(
        "Reconciling {} against {}",
        source_path.display(),
        target_path.display()
    ));
    let source = load(source_path, options)?;
    let target = load(target_path, options)?;

    let report = engine.reconcile(&source, &target)?;
    let rendered = writer.render(&report)?;

    match &cli.output {
        Some(path) => fs::write(path, rendered.as_str())
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => rendered
            .write_to(&mut io::stdout().lock())
            .context("writing report to stdout")?,
    }

    status.success(format!("Done: {}", report.summary()));
    Ok(())
}

fn load(path: &Path, options: CsvOptions) -> anyhow::Result<Dataset> {
    let source = CsvDataset::new(path, options);
    let dataset = source
        .load()
        .with_context(|| format!("loading {}", source.path().display()))?;
    info!("{}: {} row(s)", source.name(), dataset.len());
    Ok(dataset)
}

/// Configuration file values with command line overrides applied
fn effective_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if let Some(writer) = &cli.writer {
        config.writer.clone_from(writer);
    }
    if let Some(reconciler) = &cli.reconciler {
        config.reconciler.clone_from(reconciler);
    }
    if !cli.keys.is_empty() {
        config.reconcile.key.clone_from(&cli.keys);
    }
    for (field, comparator) in &cli.comparators {
        config.reconcile.comparators.insert(field.clone(), *comparator);
    }
    for field in &cli.ignore {
        if !config.reconcile.ignore.contains(field) {
            config.reconcile.ignore.push(field.clone());
        }
    }
    if cli.strict_duplicates {
        config.reconcile.duplicates = DuplicatePolicy::Error;
    }
    if cli.skip_malformed {
        config.skip_malformed = true;
    }
    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(parallelism) = cli.parallelism {
        config.reconcile.parallelism = parallelism;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
