use std::fs;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, info_span, warn};

use survival_core::analyze;
use survival_ingest::{IngestOptions, load_dataset};

use survival_cli::report::{AnalysisReport, render_csv, render_json};
use survival_cli::summary::{render_schema, render_tables};

use crate::cli::{AnalyzeArgs, OutputFormatArg};

pub fn run_schema() -> Result<()> {
    println!("{}", render_schema());
    Ok(())
}

pub fn ingest_options(args: &AnalyzeArgs) -> Result<IngestOptions> {
    let Some(delimiter) = u8::try_from(args.delimiter).ok().filter(u8::is_ascii) else {
        bail!("delimiter must be an ASCII character, got {:?}", args.delimiter);
    };
    Ok(IngestOptions::default()
        .with_delimiter(delimiter)
        .with_failure_marker(args.failure_marker.clone()))
}

/// Read, analyze and render one source file.
pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisReport> {
    let span = info_span!("analyze", input = %args.input.display());
    let _guard = span.enter();
    let options = ingest_options(args)?;
    let start = Instant::now();

    let dataset = load_dataset(&args.input, &options)
        .with_context(|| format!("load input: {}", args.input.display()))?;
    let bytes = fs::read(&args.input)
        .with_context(|| format!("hash input: {}", args.input.display()))?;

    let analysis = analyze(&dataset);
    if let Err(error) = &analysis.weibull {
        warn!(%error, "weibull fit unavailable");
    }
    info!(
        records = analysis.summary.records,
        failures = analysis.summary.failures,
        kaplan_meier_points = analysis.kaplan_meier.len(),
        weibull_fitted = analysis.weibull.is_ok(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(AnalysisReport::new(&args.input, &bytes, &analysis, Utc::now()))
}

/// Render the report in the requested format.
pub fn render_report(report: &AnalysisReport, format: OutputFormatArg) -> Result<String> {
    match format {
        OutputFormatArg::Table => Ok(render_tables(report)),
        OutputFormatArg::Json => render_json(report).context("serialize report"),
        OutputFormatArg::Csv => Ok(render_csv(report)),
    }
}

/// Write rendered output to `--output` or stdout.
pub fn emit_report(report: &AnalysisReport, args: &AnalyzeArgs) -> Result<()> {
    let rendered = render_report(report, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("write output: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn analyze_args(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["analyze", "failures.csv"];
        argv.extend_from_slice(extra);
        AnalyzeArgs::try_parse_from(argv).expect("parse args")
    }

    #[test]
    fn default_options_use_semicolon_and_f() {
        let options = ingest_options(&analyze_args(&[])).expect("options");
        assert_eq!(options, IngestOptions::default());
    }

    #[test]
    fn ascii_delimiter_and_marker_are_applied() {
        let options =
            ingest_options(&analyze_args(&["--delimiter", ",", "--failure-marker", "X"]))
                .expect("options");
        assert_eq!(options.delimiter, b',');
        assert_eq!(options.failure_marker, "X");
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        for delimiter in ["é", "§"] {
            let err = ingest_options(&analyze_args(&["--delimiter", delimiter])).unwrap_err();
            assert!(err.to_string().contains("ASCII"), "{err}");
        }
    }
}
